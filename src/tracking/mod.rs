//! Domain core: identities, ranks, the enrollment flow and match/rank diffing.

mod diff;
mod enrollment;
mod identity;
mod models;
mod rank;

pub use diff::{DiffOutcome, DiffPolicy, Event, diff};
pub use enrollment::{Enrollment, EnrollmentError, UntrackTarget};
pub use identity::{IdentityError, RiotId};
pub use models::{
    Composition, MatchSummary, PendingSession, PlayerSettings, ProfileSnapshot, TrackedPlayer,
    TraitSummary, UnitSummary,
};
pub use rank::{Rank, RankLadder};
