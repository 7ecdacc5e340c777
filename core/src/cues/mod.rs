//! Spoken cues: definitions, persistence, trigger evaluation and the wiring
//! that turns match ticks into playback.

mod definition;
mod dispatcher;
mod repository;
mod service;
mod triggers;

pub use definition::{Cue, CueEvent, CueFile, CueTrigger};
pub use dispatcher::CueDispatcher;
pub use repository::{CueRepository, MemoryCueRepository, TomlCueRepository};
pub use service::{CueError, CueService, NewCue};
pub use triggers::{due_cues, is_due};
