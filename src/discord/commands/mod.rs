mod forcecheck;
mod myplayers;
mod settings;
mod status;
mod track;
mod untrack;

pub use forcecheck::forcecheck;
pub use myplayers::myplayers;
pub use settings::settings;
pub use status::status;
pub use track::{cancel, confirm, track};
pub use untrack::untrack;
