use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use tft_tracker::db::{PlayerStore, StoreError};
use tft_tracker::tracking::{PendingSession, PlayerSettings, TrackedPlayer};

/// Store kept in plain maps. Makes no timer or I/O calls, so it is safe
/// under a paused tokio clock.
#[derive(Default)]
pub struct MemoryStore {
    players: Mutex<HashMap<String, TrackedPlayer>>,
    sessions: Mutex<HashMap<String, PendingSession>>,
}

impl MemoryStore {
    pub fn with_players(players: impl IntoIterator<Item = TrackedPlayer>) -> Self {
        let store = Self::default();
        store
            .players
            .lock()
            .unwrap()
            .extend(players.into_iter().map(|p| (p.key.clone(), p)));
        store
    }
}

fn oldest_first(mut players: Vec<TrackedPlayer>) -> Vec<TrackedPlayer> {
    players.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.key.cmp(&b.key)));
    players
}

#[async_trait]
impl PlayerStore for MemoryStore {
    async fn get_player(&self, key: &str) -> Result<Option<TrackedPlayer>, StoreError> {
        Ok(self.players.lock().unwrap().get(key).cloned())
    }

    async fn list_players(&self) -> Result<Vec<TrackedPlayer>, StoreError> {
        let players = self.players.lock().unwrap().values().cloned().collect();
        Ok(oldest_first(players))
    }

    async fn list_players_by_owner(
        &self,
        owner_id: u64,
    ) -> Result<Vec<TrackedPlayer>, StoreError> {
        let players = self
            .players
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(oldest_first(players))
    }

    async fn count_players(&self) -> Result<usize, StoreError> {
        Ok(self.players.lock().unwrap().len())
    }

    async fn promote_session(&self, player: &TrackedPlayer) -> Result<(), StoreError> {
        let mut players = self.players.lock().unwrap();
        if players.contains_key(&player.key) {
            return Err(StoreError::Conflict(player.key.clone()));
        }
        players.insert(player.key.clone(), player.clone());
        self.sessions.lock().unwrap().remove(&player.key);
        Ok(())
    }

    async fn record_check(&self, player: &TrackedPlayer) -> Result<bool, StoreError> {
        let mut players = self.players.lock().unwrap();
        match players.get_mut(&player.key) {
            Some(stored)
                if stored.owner_id == player.owner_id
                    && stored.created_at == player.created_at =>
            {
                stored.last_match_id = player.last_match_id.clone();
                stored.last_rank = player.last_rank.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_settings(
        &self,
        key: &str,
        settings: PlayerSettings,
    ) -> Result<bool, StoreError> {
        let mut players = self.players.lock().unwrap();
        Ok(players
            .get_mut(key)
            .map(|p| p.settings = settings)
            .is_some())
    }

    async fn remove_player(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.players.lock().unwrap().remove(key).is_some())
    }

    async fn put_session(&self, session: &PendingSession) -> Result<(), StoreError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.key.clone(), session.clone());
        Ok(())
    }

    async fn get_session(&self, key: &str) -> Result<Option<PendingSession>, StoreError> {
        Ok(self.sessions.lock().unwrap().get(key).cloned())
    }

    async fn delete_session(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.sessions.lock().unwrap().remove(key).is_some())
    }

    async fn delete_sessions_by_owner(&self, owner_id: u64) -> Result<u64, StoreError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| s.owner_id != owner_id);
        Ok((before - sessions.len()) as u64)
    }
}
