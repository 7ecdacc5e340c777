//! Neutral objective timers.
//!
//! ```text
//! previous ObjectiveState ──┐
//!                           ├──► track() ──► next ObjectiveState
//!        MatchSnapshot ─────┘
//! ```
//!
//! The tracker is a pure function: the caller owns the running state and
//! threads it from tick to tick, dropping it when the match session ends.

mod state;
mod tracker;


pub use state::{ObjectiveState, ObjectiveTimer, TeamKillCounts};
pub use tracker::{
    BARON_RESPAWN_SECS, DRAGON_RESPAWN_SECS, ELDER_DRAGON_KILL_THRESHOLD, ELDER_RESPAWN_SECS,
    first_spawn, track,
};
