use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A ranked standing as reported by the league endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    pub tier: String,
    pub division: String,
    pub points: i32,
}

impl Rank {
    pub fn new(tier: impl Into<String>, division: impl Into<String>, points: i32) -> Self {
        Self {
            tier: tier.into(),
            division: division.into(),
            points,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tier = capitalize(&self.tier);
        if self.division.is_empty() {
            write!(f, "{} - {} LP", tier, self.points)
        } else {
            write!(f, "{} {} - {} LP", tier, self.division, self.points)
        }
    }
}

fn capitalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Total order over ranks: tier, then division, then points.
///
/// Tiers are listed low to high and divisions coarse to fine, so a larger
/// index is always the better standing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankLadder {
    tiers: Vec<String>,
    divisions: Vec<String>,
}

impl RankLadder {
    pub fn new<T, D>(tiers: T, divisions: D) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            tiers: tiers.into_iter().map(Into::into).collect(),
            divisions: divisions.into_iter().map(Into::into).collect(),
        }
    }

    fn tier_index(&self, tier: &str) -> Option<usize> {
        self.tiers.iter().position(|t| t.eq_ignore_ascii_case(tier))
    }

    fn division_index(&self, division: &str) -> Option<usize> {
        self.divisions
            .iter()
            .position(|d| d.eq_ignore_ascii_case(division))
    }

    /// Position of the rank on the ladder, or `None` if its tier or division
    /// is not part of it.
    fn position(&self, rank: &Rank) -> Option<(usize, usize)> {
        Some((
            self.tier_index(&rank.tier)?,
            self.division_index(&rank.division)?,
        ))
    }

    /// Compare two ranks, `None` when either one is off the ladder.
    pub fn compare(&self, a: &Rank, b: &Rank) -> Option<Ordering> {
        let (pa, pb) = (self.position(a)?, self.position(b)?);
        Some(pa.cmp(&pb).then(a.points.cmp(&b.points)))
    }

    /// Whether both ranks sit on the same tier and division.
    pub fn same_step(&self, a: &Rank, b: &Rank) -> bool {
        matches!((self.position(a), self.position(b)), (Some(pa), Some(pb)) if pa == pb)
    }
}

impl Default for RankLadder {
    fn default() -> Self {
        Self::new(
            [
                "IRON",
                "BRONZE",
                "SILVER",
                "GOLD",
                "PLATINUM",
                "EMERALD",
                "DIAMOND",
                "MASTER",
                "GRANDMASTER",
                "CHALLENGER",
            ],
            ["IV", "III", "II", "I"],
        )
    }
}
