use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{Span, debug, error, info, instrument, warn};

use super::PollerError;
use crate::db::{PlayerStore, StoreError};
use crate::notify::{MessageSender, Notifier, group_events};
use crate::riot::{ProfileProvider, ProviderError};
use crate::tracking::{DiffPolicy, Event, RiotId, TrackedPlayer, diff};

/// Summary of one polling cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub checked: usize,
    pub failed: usize,
    pub events: usize,
    pub notifications: usize,
    pub dispatch_failures: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollerStatus {
    pub cycles: u64,
    pub last_report: Option<CycleReport>,
}

#[derive(Debug, thiserror::Error)]
enum CheckError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Periodically checks every tracked player, persists what changed and
/// announces new matches and rank moves.
pub struct MatchPoller<S, P, M> {
    store: Arc<S>,
    provider: Arc<P>,
    notifier: Notifier<M>,
    policy: DiffPolicy,
    pacing: Duration,
    /// Held for the whole duration of a cycle.
    cycle: Mutex<()>,
    status: RwLock<PollerStatus>,
}

impl<S, P, M> MatchPoller<S, P, M>
where
    S: PlayerStore,
    P: ProfileProvider,
    M: MessageSender,
{
    pub fn new(
        store: Arc<S>,
        provider: Arc<P>,
        notifier: Notifier<M>,
        policy: DiffPolicy,
        pacing: Duration,
    ) -> Self {
        Self {
            store,
            provider,
            notifier,
            policy,
            pacing,
            cycle: Mutex::new(()),
            status: RwLock::new(PollerStatus::default()),
        }
    }

    pub async fn start_polling(self: Arc<Self>, interval_secs: u64) {
        let mut interval = interval(Duration::from_secs(interval_secs));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(interval_secs, "🔄 Match poller started");

        loop {
            interval.tick().await;

            match self.poll_once().await {
                Ok(_) => {}
                Err(PollerError::CycleInProgress) => {
                    debug!("🔄 Previous cycle still running, skipping tick");
                }
                Err(e) => error!(error = ?e, "🔄 ❌ Polling cycle failed"),
            }
        }
    }

    /// Run one cycle over the whole roster.
    pub async fn poll_once(&self) -> Result<CycleReport, PollerError> {
        let _guard = self
            .cycle
            .try_lock()
            .map_err(|_| PollerError::CycleInProgress)?;

        let players = self.store.list_players().await?;
        Ok(self.run_cycle(players).await)
    }

    /// Run a cycle right away, over one player or everyone.
    pub async fn force_check(&self, identity: Option<&str>) -> Result<CycleReport, PollerError> {
        let _guard = self
            .cycle
            .try_lock()
            .map_err(|_| PollerError::CycleInProgress)?;

        let players = match identity {
            Some(identity) => {
                let riot_id: RiotId = identity.parse()?;
                let player = self
                    .store
                    .get_player(&riot_id.key())
                    .await?
                    .ok_or_else(|| PollerError::NotTracked(riot_id.to_string()))?;
                vec![player]
            }
            None => self.store.list_players().await?,
        };

        Ok(self.run_cycle(players).await)
    }

    pub async fn status(&self) -> PollerStatus {
        self.status.read().await.clone()
    }

    #[instrument(skip_all, fields(player_count))]
    async fn run_cycle(&self, players: Vec<TrackedPlayer>) -> CycleReport {
        let started_at = Utc::now();
        let mut report = CycleReport {
            checked: 0,
            failed: 0,
            events: 0,
            notifications: 0,
            dispatch_failures: 0,
            started_at,
            finished_at: started_at,
        };

        if players.is_empty() {
            debug!("🔄 No players tracked, skipping poll cycle");
        } else {
            Span::current().record("player_count", players.len());
            info!(count = players.len(), "🔄 Polling {} player(s)", players.len());
        }

        let mut collected = Vec::new();
        let total = players.len();

        for (i, player) in players.into_iter().enumerate() {
            match self.check_player(&player).await {
                Ok(Some((updated, events))) => {
                    report.checked += 1;
                    if !events.is_empty() {
                        report.events += events.len();
                        collected.push((updated, events));
                    }
                }
                Ok(None) => {
                    report.checked += 1;
                    debug!(key = %player.key, "🔄 Player untracked during the cycle");
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        error = %e,
                        riot_id = %player.riot_id,
                        "🔄 ⚠️ Failed to check player"
                    );
                }
            }

            if i + 1 < total && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
        }

        for notification in group_events(collected) {
            report.notifications += 1;
            if let Err(e) = self.notifier.dispatch(&notification).await {
                report.dispatch_failures += 1;
                error!(error = %e, "🎮 ❌ Failed to send notification");
            }
        }

        report.finished_at = Utc::now();
        info!(
            checked = report.checked,
            failed = report.failed,
            notifications = report.notifications,
            "🔄 Cycle finished"
        );

        let mut status = self.status.write().await;
        status.cycles += 1;
        status.last_report = Some(report.clone());

        report
    }

    /// Fetch, diff and persist one player. Returns `None` when the player was
    /// removed while the cycle was running; its events are then dropped.
    #[instrument(
        skip(self, player),
        fields(riot_id = %player.riot_id, region = %player.region)
    )]
    async fn check_player(
        &self,
        player: &TrackedPlayer,
    ) -> Result<Option<(TrackedPlayer, Vec<Event>)>, CheckError> {
        let fresh = self
            .provider
            .fetch_profile(&player.riot_id, player.region)
            .await?;

        let outcome = diff(player, &fresh, &self.policy);

        if outcome.changed(player) {
            let still_tracked = self.store.record_check(&outcome.updated).await?;

            if !still_tracked {
                return Ok(None);
            }
        }

        if !outcome.events.is_empty() {
            info!(events = outcome.events.len(), "🔄 ✅ Changes detected");
        }

        Ok(Some((outcome.updated, outcome.events)))
    }
}
