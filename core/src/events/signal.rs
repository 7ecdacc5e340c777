use std::sync::Arc;

use crate::game::GameState;

/// Lifecycle events published by the polling state machine.
#[derive(Debug, Clone)]
pub enum MatchEvent {
    /// A match was detected at game time zero.
    GameStarted { game_time: u32 },
    /// Fresh state for a live match.
    GameTick { state: Arc<GameState> },
    /// The live client stopped serving match data.
    GameEnded,
    /// Polling was stopped while a match was active.
    GameStopped,
}

impl MatchEvent {
    pub fn kind(&self) -> MatchEventKind {
        match self {
            Self::GameStarted { .. } => MatchEventKind::GameStarted,
            Self::GameTick { .. } => MatchEventKind::GameTick,
            Self::GameEnded => MatchEventKind::GameEnded,
            Self::GameStopped => MatchEventKind::GameStopped,
        }
    }
}

/// Subscription key on the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchEventKind {
    GameStarted,
    GameTick,
    GameEnded,
    GameStopped,
}

impl MatchEventKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::GameStarted => "game-started",
            Self::GameTick => "game-tick",
            Self::GameEnded => "game-ended",
            Self::GameStopped => "game-stopped",
        }
    }
}
