mod bot;
pub mod commands;

pub use bot::{Context, Data, DiscordPoller, create_framework};
