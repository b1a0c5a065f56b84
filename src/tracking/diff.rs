use std::cmp::Ordering;

use super::models::{MatchSummary, ProfileSnapshot, TrackedPlayer};
use super::rank::{Rank, RankLadder};

/// A notifiable change detected between two checks of the same player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    NewMatch(MatchSummary),
    RankUp { from: Rank, to: Rank },
    RankDown { from: Rank, to: Rank },
}

/// Knobs used when comparing ranks.
#[derive(Debug, Clone)]
pub struct DiffPolicy {
    pub ladder: RankLadder,
    /// Point swings within the same tier and division must exceed this to
    /// be reported.
    pub points_threshold: i32,
}

impl Default for DiffPolicy {
    fn default() -> Self {
        Self {
            ladder: RankLadder::default(),
            points_threshold: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOutcome {
    pub events: Vec<Event>,
    /// The stored record with the fresh snapshot applied, whether or not an
    /// event fired.
    pub updated: TrackedPlayer,
}

impl DiffOutcome {
    pub fn changed(&self, stored: &TrackedPlayer) -> bool {
        self.updated != *stored
    }
}

pub fn diff(stored: &TrackedPlayer, fresh: &ProfileSnapshot, policy: &DiffPolicy) -> DiffOutcome {
    let mut events = Vec::new();
    let mut updated = stored.clone();

    if let Some(latest) = &fresh.latest_match {
        match stored.last_match_id.as_deref() {
            // Nothing seeded yet: remember the id without announcing an old game.
            None => {}
            Some(known) if known == latest.match_id => {}
            Some(_) => events.push(Event::NewMatch(latest.clone())),
        }
        updated.last_match_id = Some(latest.match_id.clone());
    }

    if let (Some(old), Some(new)) = (&stored.last_rank, &fresh.rank) {
        if let Some(event) = rank_event(old, new, policy) {
            events.push(event);
        }
    }
    updated.last_rank = fresh.rank.clone();

    DiffOutcome { events, updated }
}

fn rank_event(old: &Rank, new: &Rank, policy: &DiffPolicy) -> Option<Event> {
    let ordering = policy.ladder.compare(new, old)?;

    if policy.ladder.same_step(old, new)
        && (new.points - old.points).abs() <= policy.points_threshold
    {
        return None;
    }

    let (from, to) = (old.clone(), new.clone());
    match ordering {
        Ordering::Greater => Some(Event::RankUp { from, to }),
        Ordering::Less => Some(Event::RankDown { from, to }),
        Ordering::Equal => None,
    }
}
