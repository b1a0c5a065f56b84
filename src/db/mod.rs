//! Durable roster of tracked players and pending enrollment sessions.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

use crate::tracking::{PendingSession, PlayerSettings, TrackedPlayer};

mod migrations;
mod models;
mod repository;

pub use migrations::run_migrations;
pub use repository::Repository;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a record with key {0} already exists")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("could not encode snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Storage contract used by enrollment and polling. Every write targets a
/// single key so concurrent callers never interleave on one record.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn get_player(&self, key: &str) -> Result<Option<TrackedPlayer>, StoreError>;

    async fn list_players(&self) -> Result<Vec<TrackedPlayer>, StoreError>;

    /// Players enrolled by `owner_id`, oldest first.
    async fn list_players_by_owner(&self, owner_id: u64)
    -> Result<Vec<TrackedPlayer>, StoreError>;

    async fn count_players(&self) -> Result<usize, StoreError>;

    /// Insert `player` and drop the pending session sharing its key, atomically.
    async fn promote_session(&self, player: &TrackedPlayer) -> Result<(), StoreError>;

    /// Persist the last match and rank of `player`. Only the enrollment the
    /// check started from is updated: returns `false` when that player was
    /// untracked (or untracked and enrolled again), writing nothing.
    async fn record_check(&self, player: &TrackedPlayer) -> Result<bool, StoreError>;

    async fn update_settings(&self, key: &str, settings: PlayerSettings)
    -> Result<bool, StoreError>;

    async fn remove_player(&self, key: &str) -> Result<bool, StoreError>;

    /// Insert or replace the pending session for `session.key`.
    async fn put_session(&self, session: &PendingSession) -> Result<(), StoreError>;

    async fn get_session(&self, key: &str) -> Result<Option<PendingSession>, StoreError>;

    async fn delete_session(&self, key: &str) -> Result<bool, StoreError>;

    async fn delete_sessions_by_owner(&self, owner_id: u64) -> Result<u64, StoreError>;
}

/// Open a pool on `url`, creating the database file when needed.
pub async fn connect(url: &str) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}
