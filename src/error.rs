use thiserror::Error;

use crate::db::StoreError;
use crate::poller::PollerError;
use crate::tracking::EnrollmentError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Enrollment(#[from] EnrollmentError),

    #[error(transparent)]
    Poller(#[from] PollerError),

    #[error("Database error: {0}")]
    Store(#[from] StoreError),

    #[error("Discord error: {0}")]
    Discord(Box<serenity::Error>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::Discord(Box::new(err))
    }
}
