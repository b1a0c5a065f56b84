use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use super::models::{PendingSessionRow, TrackedPlayerRow};
use super::{PlayerStore, StoreError};
use crate::tracking::{PendingSession, PlayerSettings, TrackedPlayer};

const PLAYER_COLUMNS: &str = "key, game_name, tag_line, owner_id, region, notify_channel_id, \
     last_match_id, last_rank_tier, last_rank_division, last_rank_points, \
     mention_on_notify, include_extra_analysis, created_at";

const SESSION_COLUMNS: &str = "key, owner_id, region, snapshot, created_at";

#[derive(Clone, Debug)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_players(
        &self,
        query: &str,
        owner_id: Option<u64>,
    ) -> Result<Vec<TrackedPlayer>, StoreError> {
        let mut q = sqlx::query_as::<_, TrackedPlayerRow>(query);
        if let Some(owner_id) = owner_id {
            q = q.bind(owner_id as i64);
        }

        q.fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(TrackedPlayer::try_from)
            .collect()
    }
}

fn conflict_or(err: sqlx::Error, key: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(key.to_string())
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl PlayerStore for Repository {
    // === Tracked players ===

    async fn get_player(&self, key: &str) -> Result<Option<TrackedPlayer>, StoreError> {
        let row = sqlx::query_as::<_, TrackedPlayerRow>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM tracked_players WHERE key = ?"
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TrackedPlayer::try_from).transpose()
    }

    async fn list_players(&self) -> Result<Vec<TrackedPlayer>, StoreError> {
        self.fetch_players(
            &format!("SELECT {PLAYER_COLUMNS} FROM tracked_players ORDER BY created_at, key"),
            None,
        )
        .await
    }

    async fn list_players_by_owner(
        &self,
        owner_id: u64,
    ) -> Result<Vec<TrackedPlayer>, StoreError> {
        self.fetch_players(
            &format!(
                "SELECT {PLAYER_COLUMNS} FROM tracked_players WHERE owner_id = ? ORDER BY created_at, key"
            ),
            Some(owner_id),
        )
        .await
    }

    async fn count_players(&self) -> Result<usize, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tracked_players")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    async fn promote_session(&self, player: &TrackedPlayer) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!(
            "INSERT INTO tracked_players ({PLAYER_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&player.key)
        .bind(&player.riot_id.game_name)
        .bind(&player.riot_id.tag_line)
        .bind(player.owner_id as i64)
        .bind(player.region.as_str())
        .bind(player.notify_channel as i64)
        .bind(player.last_match_id.as_deref())
        .bind(player.last_rank.as_ref().map(|r| &r.tier))
        .bind(player.last_rank.as_ref().map(|r| &r.division))
        .bind(player.last_rank.as_ref().map(|r| r.points))
        .bind(player.settings.mention_on_notify)
        .bind(player.settings.include_extra_analysis)
        .bind(player.created_at.timestamp_millis())
        .execute(&mut *tx)
        .await
        .map_err(|err| conflict_or(err, &player.key))?;

        sqlx::query("DELETE FROM pending_sessions WHERE key = ?")
            .bind(&player.key)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(key = %player.key, "🗄️ session promoted to tracked player");
        Ok(())
    }

    async fn record_check(&self, player: &TrackedPlayer) -> Result<bool, StoreError> {
        let rank = player.last_rank.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE tracked_players SET
                last_match_id = ?,
                last_rank_tier = ?,
                last_rank_division = ?,
                last_rank_points = ?
            WHERE key = ? AND owner_id = ? AND created_at = ?
            "#,
        )
        .bind(player.last_match_id.as_deref())
        .bind(rank.map(|r| &r.tier))
        .bind(rank.map(|r| &r.division))
        .bind(rank.map(|r| r.points))
        .bind(&player.key)
        .bind(player.owner_id as i64)
        .bind(player.created_at.timestamp_millis())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_settings(
        &self,
        key: &str,
        settings: PlayerSettings,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE tracked_players SET mention_on_notify = ?, include_extra_analysis = ? WHERE key = ?",
        )
        .bind(settings.mention_on_notify)
        .bind(settings.include_extra_analysis)
        .bind(key)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_player(&self, key: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tracked_players WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // === Pending sessions ===

    async fn put_session(&self, session: &PendingSession) -> Result<(), StoreError> {
        let snapshot = serde_json::to_string(&session.snapshot)?;

        sqlx::query(
            r#"
            INSERT INTO pending_sessions (key, owner_id, region, snapshot, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                owner_id = excluded.owner_id,
                region = excluded.region,
                snapshot = excluded.snapshot,
                created_at = excluded.created_at
            "#,
        )
        .bind(&session.key)
        .bind(session.owner_id as i64)
        .bind(session.region.as_str())
        .bind(snapshot)
        .bind(session.created_at.timestamp_millis())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_session(&self, key: &str) -> Result<Option<PendingSession>, StoreError> {
        let row = sqlx::query_as::<_, PendingSessionRow>(&format!(
            "SELECT {SESSION_COLUMNS} FROM pending_sessions WHERE key = ?"
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PendingSession::try_from).transpose()
    }

    async fn delete_session(&self, key: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM pending_sessions WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_sessions_by_owner(&self, owner_id: u64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM pending_sessions WHERE owner_id = ?")
            .bind(owner_id as i64)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
