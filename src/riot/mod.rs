//! Riot Games API access, reduced to what the tracker needs: a profile
//! snapshot (identity, ranked standing, latest match) per account.

use async_trait::async_trait;
use thiserror::Error;

use crate::tracking::{ProfileSnapshot, RiotId};

mod client;
mod endpoints;
mod metrics;
mod profile;
mod region;
pub mod types;

pub use client::RiotClient;
pub use metrics::{MetricsSnapshot, RequestMetrics};
pub use region::{InvalidRegion, Region};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no account matches this Riot ID")]
    NotFound,
    #[error("the Riot API rate limit was reached, try again later")]
    RateLimited,
    #[error("the Riot API is unavailable (HTTP {status})")]
    Unavailable { status: u16 },
    #[error("the Riot API did not answer in time")]
    Timeout,
    #[error("could not reach the Riot API: {0}")]
    Transport(reqwest::Error),
    #[error("unexpected Riot API response: {0}")]
    Decode(reqwest::Error),
    #[error("match {match_id} does not list the tracked account")]
    MissingParticipant { match_id: String },
}

impl ProviderError {
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            404 => Self::NotFound,
            429 => Self::RateLimited,
            status => Self::Unavailable { status },
        }
    }

    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }

    /// Errors raised while reading a successful response. The request timeout
    /// also covers the body.
    fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err)
        } else {
            Self::Transport(err)
        }
    }
}

/// Source of fresh profile snapshots, consumed by enrollment and polling.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn fetch_profile(
        &self,
        riot_id: &RiotId,
        region: Region,
    ) -> Result<ProfileSnapshot, ProviderError>;
}
