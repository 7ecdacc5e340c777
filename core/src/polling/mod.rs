//! Live client polling.
//!
//! ```text
//! Scheduler ──tick──► PollingStateMachine ──► GameDataPort
//!                           │
//!                           ├─ SnapshotAssembler (dedup)
//!                           ├─ objectives::track
//!                           └─► EventBus (started / tick / ended / stopped)
//! ```

mod machine;
mod service;


pub use machine::{MatchPhase, PollingStateMachine, TickOutcome};
pub use service::PollingService;
