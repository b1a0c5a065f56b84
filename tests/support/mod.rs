#![allow(dead_code)]

mod memory;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use poise::serenity_prelude::{self as serenity, ChannelId, CreateMessage};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;

use tft_tracker::db::{Repository, run_migrations};
use tft_tracker::notify::MessageSender;
use tft_tracker::riot::{ProfileProvider, ProviderError, Region};
use tft_tracker::tracking::{
    Enrollment, MatchSummary, PlayerSettings, ProfileSnapshot, Rank, RiotId, TrackedPlayer,
};

pub use memory::MemoryStore;

pub const OWNER: u64 = 1001;
pub const OTHER_OWNER: u64 = 2002;
pub const CHANNEL: u64 = 555;

pub async fn store() -> Arc<Repository> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    Arc::new(Repository::new(pool))
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn snapshot(identity: &str, match_id: Option<&str>, rank: Option<Rank>) -> ProfileSnapshot {
    snapshot_with_placement(identity, match_id, 4, rank)
}

pub fn snapshot_with_placement(
    identity: &str,
    match_id: Option<&str>,
    placement: u8,
    rank: Option<Rank>,
) -> ProfileSnapshot {
    ProfileSnapshot {
        riot_id: identity.parse().unwrap(),
        rank,
        latest_match: match_id.map(|id| MatchSummary {
            match_id: id.to_string(),
            placement,
            finished_at: at(0),
            composition: Default::default(),
        }),
    }
}

/// A tracked player as confirm would have stored it.
pub fn tracked(identity: &str, last_match_id: Option<&str>, created_secs: i64) -> TrackedPlayer {
    let riot_id: RiotId = identity.parse().unwrap();
    TrackedPlayer {
        key: riot_id.key(),
        riot_id,
        owner_id: OWNER,
        region: Region::Vn,
        notify_channel: CHANNEL,
        last_match_id: last_match_id.map(str::to_string),
        last_rank: None,
        settings: PlayerSettings::default(),
        created_at: at(created_secs),
    }
}

#[derive(Debug, Clone)]
pub enum Reply {
    Profile(ProfileSnapshot),
    NotFound,
    RateLimited,
    Down,
}

/// Provider answering from a script keyed by identity key.
#[derive(Default)]
pub struct FakeProvider {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, identity: &str, reply: Reply) {
        let key = identity.parse::<RiotId>().unwrap().key();
        self.replies.lock().unwrap().insert(key, reply);
    }

    pub fn profile(&self, snapshot: ProfileSnapshot) {
        let key = snapshot.riot_id.key();
        self.replies
            .lock()
            .unwrap()
            .insert(key, Reply::Profile(snapshot));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileProvider for FakeProvider {
    async fn fetch_profile(
        &self,
        riot_id: &RiotId,
        _region: Region,
    ) -> Result<ProfileSnapshot, ProviderError> {
        let key = riot_id.key();
        self.calls.lock().unwrap().push(key.clone());

        let reply = self.replies.lock().unwrap().get(&key).cloned();
        match reply {
            Some(Reply::Profile(snapshot)) => Ok(snapshot),
            Some(Reply::RateLimited) => Err(ProviderError::RateLimited),
            Some(Reply::Down) => Err(ProviderError::Unavailable { status: 503 }),
            Some(Reply::NotFound) | None => Err(ProviderError::NotFound),
        }
    }
}

/// Message sender keeping every card as JSON.
#[derive(Clone, Default)]
pub struct RecordingSender {
    missing: Arc<Mutex<HashSet<u64>>>,
    sent: Arc<Mutex<Vec<(u64, Value)>>>,
}

impl RecordingSender {
    pub fn remove_channel(&self, channel: u64) {
        self.missing.lock().unwrap().insert(channel);
    }

    pub fn sent(&self) -> Vec<(u64, Value)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn has_channel(&self, channel_id: ChannelId) -> bool {
        !self.missing.lock().unwrap().contains(&channel_id.get())
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        msg: CreateMessage,
    ) -> serenity::Result<()> {
        let json = serde_json::to_value(&msg).unwrap();
        self.sent.lock().unwrap().push((channel_id.get(), json));
        Ok(())
    }
}

pub fn enrollment(
    store: &Arc<Repository>,
    provider: &Arc<FakeProvider>,
) -> Enrollment<Repository, FakeProvider> {
    Enrollment::new(
        store.clone(),
        provider.clone(),
        chrono::Duration::minutes(30),
        8,
    )
}

/// Run the whole lookup + confirm flow for `snapshot`.
pub async fn enroll(
    store: &Arc<Repository>,
    provider: &Arc<FakeProvider>,
    snapshot: ProfileSnapshot,
    owner: u64,
    channel: u64,
) -> TrackedPlayer {
    let identity = snapshot.riot_id.to_string();
    provider.profile(snapshot);

    let enrollment = enrollment(store, provider);
    enrollment
        .lookup_at(&identity, Region::Vn, owner, at(0))
        .await
        .unwrap();
    enrollment
        .confirm_at(&identity, owner, channel, at(60))
        .await
        .unwrap()
}
