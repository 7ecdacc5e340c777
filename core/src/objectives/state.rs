use crate::game::{Objective, Team};

use super::tracker::first_spawn;

/// Spawn state of one objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectiveTimer {
    pub is_alive: bool,
    /// Game second at which the objective (re)spawns. `None` while alive or
    /// when it will not spawn again this match.
    pub next_spawn: Option<u32>,
}

impl ObjectiveTimer {
    pub fn pending(spawn_at: u32) -> Self {
        Self {
            is_alive: false,
            next_spawn: Some(spawn_at),
        }
    }

    pub fn alive() -> Self {
        Self {
            is_alive: true,
            next_spawn: None,
        }
    }

    pub fn gone() -> Self {
        Self {
            is_alive: false,
            next_spawn: None,
        }
    }
}

/// Dragons taken per team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamKillCounts {
    pub blue: u32,
    pub red: u32,
}

impl TeamKillCounts {
    pub fn get(&self, team: Team) -> u32 {
        match team {
            Team::Blue => self.blue,
            Team::Red => self.red,
        }
    }

    pub fn increment(&mut self, team: Team) {
        match team {
            Team::Blue => self.blue += 1,
            Team::Red => self.red += 1,
        }
    }

    pub fn max(&self) -> u32 {
        self.blue.max(self.red)
    }
}

/// Timers for every tracked objective at one point of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveState {
    pub dragon: ObjectiveTimer,
    pub baron: ObjectiveTimer,
    pub herald: ObjectiveTimer,
    pub grubs: ObjectiveTimer,
    pub atakhan: ObjectiveTimer,
    /// Dragon kills per team (drives the elder dragon respawn rule).
    pub dragon_kills: TeamKillCounts,
    /// Game second this state was computed for. `None` before the first
    /// evaluation of a session.
    pub evaluated_at: Option<u32>,
}

impl Default for ObjectiveState {
    /// Start-of-match state: nothing alive, first spawn times pending.
    fn default() -> Self {
        Self {
            dragon: ObjectiveTimer::pending(first_spawn(Objective::Dragon)),
            baron: ObjectiveTimer::pending(first_spawn(Objective::Baron)),
            herald: ObjectiveTimer::pending(first_spawn(Objective::Herald)),
            grubs: ObjectiveTimer::pending(first_spawn(Objective::Grubs)),
            atakhan: ObjectiveTimer::pending(first_spawn(Objective::Atakhan)),
            dragon_kills: TeamKillCounts::default(),
            evaluated_at: None,
        }
    }
}

impl ObjectiveState {
    pub fn get(&self, objective: Objective) -> &ObjectiveTimer {
        match objective {
            Objective::Dragon => &self.dragon,
            Objective::Baron => &self.baron,
            Objective::Herald => &self.herald,
            Objective::Grubs => &self.grubs,
            Objective::Atakhan => &self.atakhan,
        }
    }

    pub(crate) fn get_mut(&mut self, objective: Objective) -> &mut ObjectiveTimer {
        match objective {
            Objective::Dragon => &mut self.dragon,
            Objective::Baron => &mut self.baron,
            Objective::Herald => &mut self.herald,
            Objective::Grubs => &mut self.grubs,
            Objective::Atakhan => &mut self.atakhan,
        }
    }

    /// Objectives with their timers, in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (Objective, &ObjectiveTimer)> {
        Objective::ALL.into_iter().map(|o| (o, self.get(o)))
    }
}
