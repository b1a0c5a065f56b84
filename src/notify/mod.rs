//! Turning detected events into Discord cards.

use std::collections::HashMap;

use crate::tracking::{Event, MatchSummary, Rank, TrackedPlayer};

mod cards;
mod dispatcher;
mod sender;

pub use cards::render;
pub use dispatcher::{DispatchError, Notifier};
pub use sender::MessageSender;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry {
    pub player: TrackedPlayer,
    pub summary: MatchSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMove {
    Up,
    Down,
}

/// One card to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Every tracked player of one match announced in one channel.
    Match {
        channel: u64,
        match_id: String,
        entries: Vec<MatchEntry>,
    },
    Rank {
        player: TrackedPlayer,
        from: Rank,
        to: Rank,
        movement: RankMove,
    },
}

impl Notification {
    pub fn channel(&self) -> u64 {
        match self {
            Notification::Match { channel, .. } => *channel,
            Notification::Rank { player, .. } => player.notify_channel,
        }
    }
}

/// Coalesce the events of one cycle.
///
/// New matches sharing a match id and a notify channel become a single
/// notification; rank changes always stay per player. Output follows the
/// order in which groups were first seen, match groups before rank changes.
pub fn group_events(checked: Vec<(TrackedPlayer, Vec<Event>)>) -> Vec<Notification> {
    let mut matches: Vec<Notification> = Vec::new();
    let mut index: HashMap<(u64, String), usize> = HashMap::new();
    let mut ranks = Vec::new();

    for (player, events) in checked {
        for event in events {
            match event {
                Event::NewMatch(summary) => {
                    let group = (player.notify_channel, summary.match_id.clone());
                    let entry = MatchEntry {
                        player: player.clone(),
                        summary,
                    };

                    match index.get(&group) {
                        Some(&i) => {
                            if let Notification::Match { entries, .. } = &mut matches[i] {
                                entries.push(entry);
                            }
                        }
                        None => {
                            index.insert(group.clone(), matches.len());
                            matches.push(Notification::Match {
                                channel: group.0,
                                match_id: group.1,
                                entries: vec![entry],
                            });
                        }
                    }
                }
                Event::RankUp { from, to } => ranks.push(Notification::Rank {
                    player: player.clone(),
                    from,
                    to,
                    movement: RankMove::Up,
                }),
                Event::RankDown { from, to } => ranks.push(Notification::Rank {
                    player: player.clone(),
                    from,
                    to,
                    movement: RankMove::Down,
                }),
            }
        }
    }

    matches.extend(ranks);
    matches
}
