//! Objective timer derivation.
//!
//! `track` folds one snapshot into the previous objective state. Evaluation
//! order within a call:
//!
//! 1. Scripted map-phase transitions crossed since the previous evaluation
//! 2. Kill events carried by the snapshot
//! 3. Respawn check for everything not alive

use tracing::debug;

use crate::game::{MatchSnapshot, Objective};

use super::state::{ObjectiveState, ObjectiveTimer};

/// Seconds between a dragon kill and the next dragon.
pub const DRAGON_RESPAWN_SECS: u32 = 300;

/// Respawn delay once a team has reached the elder dragon threshold.
pub const ELDER_RESPAWN_SECS: u32 = 360;

/// Dragon kills by one team after which the elder dragon respawn applies.
pub const ELDER_DRAGON_KILL_THRESHOLD: u32 = 4;

/// Seconds between a baron kill and the next baron.
pub const BARON_RESPAWN_SECS: u32 = 360;

/// Grubs leave the pit and the herald takes over.
const HERALD_PHASE_SECS: u32 = 900;

/// The herald leaves the pit and baron takes over.
const BARON_PHASE_SECS: u32 = 1500;

/// First spawn time of each objective.
pub fn first_spawn(objective: Objective) -> u32 {
    match objective {
        Objective::Dragon => 300,
        Objective::Baron => 1500,
        Objective::Herald => 900,
        Objective::Grubs => 480,
        Objective::Atakhan => 1200,
    }
}

/// Respawn delay after a kill, or `None` for objectives that do not come back.
fn respawn_delay(objective: Objective, state: &ObjectiveState) -> Option<u32> {
    match objective {
        Objective::Dragon if state.dragon_kills.max() >= ELDER_DRAGON_KILL_THRESHOLD => {
            Some(ELDER_RESPAWN_SECS)
        }
        Objective::Dragon => Some(DRAGON_RESPAWN_SECS),
        Objective::Baron => Some(BARON_RESPAWN_SECS),
        Objective::Herald | Objective::Grubs | Objective::Atakhan => None,
    }
}

/// Derive the objective state for `snapshot` from the `previous` one.
///
/// `previous` is `None` at the start of a session; the start-of-match
/// defaults are used then. Pure: the same inputs always give the same output.
pub fn track(previous: Option<&ObjectiveState>, snapshot: &MatchSnapshot) -> ObjectiveState {
    let mut state = previous.cloned().unwrap_or_default();
    let now = snapshot.game_time;

    apply_phase_transitions(&mut state, now);

    for event in &snapshot.events {
        let Some((objective, team)) = event.killed_objective() else {
            continue;
        };
        let killed_at = event.timestamp.max(0.0).floor() as u32;

        if objective == Objective::Dragon
            && let Some(team) = team
        {
            state.dragon_kills.increment(team);
        }

        // A respawn past the end of representable game time never happens.
        let next_spawn =
            respawn_delay(objective, &state).and_then(|delay| killed_at.checked_add(delay));
        *state.get_mut(objective) = ObjectiveTimer {
            is_alive: false,
            next_spawn,
        };

        debug!(
            %objective,
            ?team,
            killed_at,
            ?next_spawn,
            "Objective killed"
        );
    }

    for objective in Objective::ALL {
        let timer = state.get_mut(objective);
        if !timer.is_alive && timer.next_spawn.is_some_and(|at| now >= at) {
            *timer = ObjectiveTimer::alive();
        }
    }

    state.evaluated_at = Some(now);
    state
}

/// Apply the scripted pit handovers whose threshold lies in
/// `(previous evaluation, now]`. A state evaluated for the first time crosses
/// every threshold at or below `now`.
fn apply_phase_transitions(state: &mut ObjectiveState, now: u32) {
    let crossed = |threshold: u32| {
        now >= threshold && state.evaluated_at.is_none_or(|prev| prev < threshold)
    };
    let herald_phase = crossed(HERALD_PHASE_SECS);
    let baron_phase = crossed(BARON_PHASE_SECS);

    if herald_phase {
        state.grubs = ObjectiveTimer::gone();
        state.herald = ObjectiveTimer::alive();
    }
    if baron_phase {
        state.herald = ObjectiveTimer::gone();
        state.baron = ObjectiveTimer::alive();
    }
}
