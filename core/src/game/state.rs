use crate::objectives::{ObjectiveState, ObjectiveTimer};

use super::{DomainEvent, Objective};

/// The local player's view, as needed by cue triggers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivePlayer {
    pub is_alive: bool,
    /// Whole seconds until respawn (rounded up). Zero while alive.
    pub respawns_in: u32,
    pub mana: Option<f64>,
    pub gold: Option<f64>,
    /// Item ids. `None` when the player was not found in the roster.
    pub items: Option<Vec<u32>>,
}

/// Output of one successful assembly, before objective tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSnapshot {
    /// Whole game seconds.
    pub game_time: u32,
    /// Events not delivered by any earlier assembly in this session.
    pub events: Vec<DomainEvent>,
    pub active_player: ActivePlayer,
}

/// Complete match state for one tick. Never mutated after construction;
/// shared with subscribers behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub game_time: u32,
    pub events: Vec<DomainEvent>,
    pub active_player: ActivePlayer,
    pub objectives: ObjectiveState,
}

impl GameState {
    pub fn new(snapshot: MatchSnapshot, objectives: ObjectiveState) -> Self {
        Self {
            game_time: snapshot.game_time,
            events: snapshot.events,
            active_player: snapshot.active_player,
            objectives,
        }
    }

    pub fn objective(&self, objective: Objective) -> &ObjectiveTimer {
        self.objectives.get(objective)
    }
}
