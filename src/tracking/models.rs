use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identity::RiotId;
use super::rank::Rank;
use crate::riot::Region;

/// Per-player notification preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSettings {
    pub mention_on_notify: bool,
    pub include_extra_analysis: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            mention_on_notify: true,
            include_extra_analysis: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedPlayer {
    /// Normalized `name#tag`, unique across the roster.
    pub key: String,
    pub riot_id: RiotId,
    pub owner_id: u64,
    pub region: Region,
    pub notify_channel: u64,
    pub last_match_id: Option<String>,
    pub last_rank: Option<Rank>,
    pub settings: PlayerSettings,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSession {
    pub key: String,
    pub owner_id: u64,
    pub region: Region,
    pub snapshot: ProfileSnapshot,
    pub created_at: DateTime<Utc>,
}

impl PendingSession {
    pub fn expires_at(&self, ttl: chrono::Duration) -> DateTime<Utc> {
        self.created_at + ttl
    }

    /// A session stays valid up to and including `created_at + ttl`.
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        now - self.created_at > ttl
    }
}

/// What the data provider knows about an account at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    /// Identity with the casing reported by the provider.
    pub riot_id: RiotId,
    pub rank: Option<Rank>,
    pub latest_match: Option<MatchSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: String,
    pub placement: u8,
    pub finished_at: DateTime<Utc>,
    #[serde(default)]
    pub composition: Composition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    pub level: u8,
    pub traits: Vec<TraitSummary>,
    pub units: Vec<UnitSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitSummary {
    pub name: String,
    pub num_units: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSummary {
    pub name: String,
    pub stars: u8,
}
