use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::StoreError;
use crate::riot::Region;
use crate::tracking::{PendingSession, PlayerSettings, ProfileSnapshot, Rank, RiotId, TrackedPlayer};

#[derive(Debug, Clone, FromRow)]
pub struct TrackedPlayerRow {
    pub key: String,
    pub game_name: String,
    pub tag_line: String,
    pub owner_id: i64,
    pub region: String,
    pub notify_channel_id: i64,
    pub last_match_id: Option<String>,
    pub last_rank_tier: Option<String>,
    pub last_rank_division: Option<String>,
    pub last_rank_points: Option<i32>,
    pub mention_on_notify: bool,
    pub include_extra_analysis: bool,
    pub created_at: i64,
}

impl TrackedPlayerRow {
    fn last_rank(&self) -> Option<Rank> {
        match (
            &self.last_rank_tier,
            &self.last_rank_division,
            self.last_rank_points,
        ) {
            (Some(tier), Some(division), Some(points)) => {
                Some(Rank::new(tier.clone(), division.clone(), points))
            }
            _ => None,
        }
    }
}

impl TryFrom<TrackedPlayerRow> for TrackedPlayer {
    type Error = StoreError;

    fn try_from(row: TrackedPlayerRow) -> Result<Self, Self::Error> {
        let last_rank = row.last_rank();
        let region = parse_region(&row.region)?;

        Ok(TrackedPlayer {
            riot_id: RiotId::new(row.game_name, row.tag_line),
            key: row.key,
            owner_id: row.owner_id as u64,
            region,
            notify_channel: row.notify_channel_id as u64,
            last_match_id: row.last_match_id,
            last_rank,
            settings: PlayerSettings {
                mention_on_notify: row.mention_on_notify,
                include_extra_analysis: row.include_extra_analysis,
            },
            created_at: from_unix_millis(row.created_at)?,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PendingSessionRow {
    pub key: String,
    pub owner_id: i64,
    pub region: String,
    pub snapshot: String,
    pub created_at: i64,
}

impl TryFrom<PendingSessionRow> for PendingSession {
    type Error = StoreError;

    fn try_from(row: PendingSessionRow) -> Result<Self, Self::Error> {
        let snapshot: ProfileSnapshot = serde_json::from_str(&row.snapshot)?;

        Ok(PendingSession {
            region: parse_region(&row.region)?,
            created_at: from_unix_millis(row.created_at)?,
            key: row.key,
            owner_id: row.owner_id as u64,
            snapshot,
        })
    }
}

fn parse_region(raw: &str) -> Result<Region, StoreError> {
    raw.parse()
        .map_err(|_| StoreError::Corrupt(format!("unknown region {raw}")))
}

fn from_unix_millis(millis: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| StoreError::Corrupt(format!("timestamp out of range: {millis}")))
}
