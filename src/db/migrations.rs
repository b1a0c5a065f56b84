use sqlx::SqlitePool;
use tracing::info;

use super::StoreError;

/// `created_at` columns hold unix milliseconds.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tracked_players (
    key TEXT PRIMARY KEY NOT NULL,
    game_name TEXT NOT NULL,
    tag_line TEXT NOT NULL,
    owner_id INTEGER NOT NULL,
    region TEXT NOT NULL,
    notify_channel_id INTEGER NOT NULL,
    last_match_id TEXT,
    last_rank_tier TEXT,
    last_rank_division TEXT,
    last_rank_points INTEGER,
    mention_on_notify INTEGER NOT NULL DEFAULT 1,
    include_extra_analysis INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL DEFAULT (unixepoch() * 1000)
);

CREATE TABLE IF NOT EXISTS pending_sessions (
    key TEXT PRIMARY KEY NOT NULL,
    owner_id INTEGER NOT NULL,
    region TEXT NOT NULL,
    snapshot TEXT NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (unixepoch() * 1000)
);

CREATE INDEX IF NOT EXISTS idx_tracked_players_owner ON tracked_players(owner_id);
CREATE INDEX IF NOT EXISTS idx_pending_sessions_owner ON pending_sessions(owner_id);
"#;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("🗄️ Database migrations completed");
    Ok(())
}
