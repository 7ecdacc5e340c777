pub mod context;
pub mod cues;
pub mod events;
pub mod game;
pub mod objectives;
pub mod playback;
pub mod polling;
pub mod ports;
pub mod scheduler;
pub mod snapshot;
pub mod storage;

#[cfg(test)]
mod pipeline_tests;

// Re-exports for convenience
pub use cues::{Cue, CueDispatcher, CueTrigger, due_cues};
pub use events::{EventBus, MatchEvent, MatchEventKind};
pub use game::{GameState, MatchSnapshot, Objective};
pub use objectives::{ObjectiveState, track};
pub use playback::CuePlaybackQueue;
pub use polling::{PollingService, PollingStateMachine};
pub use ports::{AudioPlayer, AudioRef, GameDataPort, TextToSpeech};
pub use scheduler::Scheduler;
pub use snapshot::{RawSnapshot, SnapshotAssembler, assemble};
