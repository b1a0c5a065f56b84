mod match_poller;

use thiserror::Error;

use crate::db::StoreError;
use crate::tracking::IdentityError;

pub use match_poller::{CycleReport, MatchPoller, PollerStatus};

#[derive(Debug, Error)]
pub enum PollerError {
    #[error("a polling cycle is already running, try again in a moment")]
    CycleInProgress,
    #[error("{0} is not tracked")]
    NotTracked(String),
    #[error("invalid Riot ID: {0}")]
    InvalidIdentity(#[from] IdentityError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
