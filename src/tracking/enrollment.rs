use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;
use tracing::{info, instrument};

use super::identity::{IdentityError, RiotId};
use super::models::{PendingSession, PlayerSettings, TrackedPlayer};
use crate::db::{PlayerStore, StoreError};
use crate::riot::{ProfileProvider, ProviderError, Region};

#[derive(Debug, Error)]
pub enum EnrollmentError {
    #[error("invalid Riot ID: {0}")]
    InvalidFormat(#[from] IdentityError),
    #[error("no account matches this Riot ID")]
    NotFound,
    #[error("{0}")]
    ProviderUnavailable(ProviderError),
    #[error("{0} is already tracked")]
    AlreadyTracked(String),
    #[error("no pending confirmation for {0}, use /track first")]
    NoSession(String),
    #[error("this confirmation belongs to another user")]
    OwnerMismatch,
    #[error("the confirmation for {0} expired, use /track again")]
    SessionExpired(String),
    #[error("the roster is full ({0} players), untrack someone first")]
    RosterFull(usize),
    #[error("you are not tracking {0}")]
    NotTracked(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ProviderError> for EnrollmentError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound => Self::NotFound,
            other => Self::ProviderUnavailable(other),
        }
    }
}

/// Which of a requester's players `untrack` should remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UntrackTarget {
    Identity(RiotId),
    /// 1-based position in the requester's list.
    Index(usize),
}

impl FromStr for UntrackTarget {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<usize>() {
            Ok(index) => Ok(Self::Index(index)),
            Err(_) => s.parse().map(Self::Identity),
        }
    }
}

/// Lookup → pending → confirm flow, plus roster maintenance for owners.
pub struct Enrollment<S, P> {
    store: Arc<S>,
    provider: Arc<P>,
    session_ttl: chrono::Duration,
    max_players: usize,
}

impl<S: PlayerStore, P: ProfileProvider> Enrollment<S, P> {
    pub fn new(
        store: Arc<S>,
        provider: Arc<P>,
        session_ttl: chrono::Duration,
        max_players: usize,
    ) -> Self {
        Self {
            store,
            provider,
            session_ttl,
            max_players,
        }
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        self.session_ttl
    }

    pub async fn lookup(
        &self,
        identity: &str,
        region: Region,
        requester: u64,
    ) -> Result<PendingSession, EnrollmentError> {
        self.lookup_at(identity, region, requester, Utc::now()).await
    }

    /// Fetch a profile and park it as a pending session awaiting confirmation.
    /// A new lookup replaces any earlier session for the same identity.
    #[instrument(skip(self, now))]
    pub async fn lookup_at(
        &self,
        identity: &str,
        region: Region,
        requester: u64,
        now: DateTime<Utc>,
    ) -> Result<PendingSession, EnrollmentError> {
        let riot_id: RiotId = identity.parse()?;
        let key = riot_id.key();

        if self.store.get_player(&key).await?.is_some() {
            return Err(EnrollmentError::AlreadyTracked(riot_id.to_string()));
        }

        let snapshot = self.provider.fetch_profile(&riot_id, region).await?;

        let session = PendingSession {
            key,
            owner_id: requester,
            region,
            snapshot,
            // Stored with millisecond precision.
            created_at: now.trunc_subsecs(3),
        };
        self.store.put_session(&session).await?;

        info!(key = %session.key, "📝 pending session opened");
        Ok(session)
    }

    pub async fn confirm(
        &self,
        identity: &str,
        requester: u64,
        notify_channel: u64,
    ) -> Result<TrackedPlayer, EnrollmentError> {
        self.confirm_at(identity, requester, notify_channel, Utc::now())
            .await
    }

    /// Turn the requester's pending session into a tracked player. The
    /// snapshot seeds the last match and rank so nothing is re-announced.
    #[instrument(skip(self, now))]
    pub async fn confirm_at(
        &self,
        identity: &str,
        requester: u64,
        notify_channel: u64,
        now: DateTime<Utc>,
    ) -> Result<TrackedPlayer, EnrollmentError> {
        let riot_id: RiotId = identity.parse()?;
        let key = riot_id.key();

        let session = self
            .store
            .get_session(&key)
            .await?
            .ok_or_else(|| EnrollmentError::NoSession(riot_id.to_string()))?;

        if session.owner_id != requester {
            return Err(EnrollmentError::OwnerMismatch);
        }
        if session.is_expired_at(now, self.session_ttl) {
            self.store.delete_session(&key).await?;
            return Err(EnrollmentError::SessionExpired(riot_id.to_string()));
        }
        if self.store.count_players().await? >= self.max_players {
            return Err(EnrollmentError::RosterFull(self.max_players));
        }

        let player = TrackedPlayer {
            key: session.key,
            riot_id: session.snapshot.riot_id,
            owner_id: requester,
            region: session.region,
            notify_channel,
            last_match_id: session.snapshot.latest_match.map(|m| m.match_id),
            last_rank: session.snapshot.rank,
            settings: PlayerSettings::default(),
            created_at: now.trunc_subsecs(3),
        };

        self.store
            .promote_session(&player)
            .await
            .map_err(|err| match err {
                StoreError::Conflict(_) => {
                    EnrollmentError::AlreadyTracked(player.riot_id.to_string())
                }
                other => other.into(),
            })?;

        info!(key = %player.key, region = %player.region, "✅ player tracked");
        Ok(player)
    }

    /// Drop the requester's pending session for `identity`. Sessions owned by
    /// someone else are left alone.
    pub async fn cancel(&self, identity: &str, requester: u64) -> Result<bool, EnrollmentError> {
        let riot_id: RiotId = identity.parse()?;
        let key = riot_id.key();

        match self.store.get_session(&key).await? {
            Some(session) if session.owner_id == requester => {
                Ok(self.store.delete_session(&key).await?)
            }
            _ => Ok(false),
        }
    }

    pub async fn cancel_all(&self, requester: u64) -> Result<u64, EnrollmentError> {
        Ok(self.store.delete_sessions_by_owner(requester).await?)
    }

    /// Remove one of the requester's players. Returns the removed record, or
    /// `None` when nothing owned by the requester matches.
    #[instrument(skip(self))]
    pub async fn untrack(
        &self,
        target: &UntrackTarget,
        requester: u64,
    ) -> Result<Option<TrackedPlayer>, EnrollmentError> {
        let player = match target {
            UntrackTarget::Identity(riot_id) => self
                .store
                .get_player(&riot_id.key())
                .await?
                .filter(|p| p.owner_id == requester),
            UntrackTarget::Index(0) => None,
            UntrackTarget::Index(index) => self
                .list_owned(requester)
                .await?
                .into_iter()
                .nth(index - 1),
        };

        let Some(player) = player else {
            return Ok(None);
        };

        if !self.store.remove_player(&player.key).await? {
            return Ok(None);
        }

        info!(key = %player.key, "🗑️ player untracked");
        Ok(Some(player))
    }

    pub async fn list_owned(&self, requester: u64) -> Result<Vec<TrackedPlayer>, EnrollmentError> {
        Ok(self.store.list_players_by_owner(requester).await?)
    }

    /// Toggle notification settings on a player owned by the requester.
    /// `None` leaves a setting unchanged.
    pub async fn update_settings(
        &self,
        identity: &str,
        requester: u64,
        mention_on_notify: Option<bool>,
        include_extra_analysis: Option<bool>,
    ) -> Result<PlayerSettings, EnrollmentError> {
        let riot_id: RiotId = identity.parse()?;

        let player = self
            .store
            .get_player(&riot_id.key())
            .await?
            .filter(|p| p.owner_id == requester)
            .ok_or_else(|| EnrollmentError::NotTracked(riot_id.to_string()))?;

        let settings = PlayerSettings {
            mention_on_notify: mention_on_notify.unwrap_or(player.settings.mention_on_notify),
            include_extra_analysis: include_extra_analysis
                .unwrap_or(player.settings.include_extra_analysis),
        };

        if !self.store.update_settings(&player.key, settings).await? {
            return Err(EnrollmentError::NotTracked(riot_id.to_string()));
        }
        Ok(settings)
    }
}
