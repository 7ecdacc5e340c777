//! Cue trigger evaluation.
//!
//! Pure functions of the current game state. A cue whose trigger cannot be
//! evaluated (unknown event, zero interval, objective with no known spawn) is
//! simply never due.

use crate::game::GameState;

use super::definition::{Cue, CueEvent, CueTrigger};

/// Minion waves spawn every this many seconds.
const WAVE_INTERVAL_SECS: u32 = 30;

/// Spawn time of the first minion wave.
const FIRST_WAVE_SECS: u32 = 65;

/// End of the cannon wave window. Waves from here on are never due.
const CANNON_WINDOW_END_SECS: u32 = 900;

const EARLY_CANNON_WAVE_PERIOD: u32 = 3;

/// Cues due at `state.game_time`, in input order.
pub fn due_cues<'a>(state: &GameState, cues: &'a [Cue]) -> Vec<&'a Cue> {
    cues.iter().filter(|cue| is_due(cue, state)).collect()
}

pub fn is_due(cue: &Cue, state: &GameState) -> bool {
    let now = state.game_time;

    match &cue.trigger {
        CueTrigger::Interval { interval } => {
            now > 0 && *interval > 0 && now.is_multiple_of(*interval)
        }
        CueTrigger::OneTime { trigger_at } => now == *trigger_at,
        CueTrigger::Event { event } => match event {
            CueEvent::Respawn => state.active_player.respawns_in == 1,
            CueEvent::CannonWave => is_cannon_wave(now),
            CueEvent::Unknown(_) => false,
        },
        CueTrigger::Objective {
            objective,
            seconds_before_objective,
        } => state
            .objective(*objective)
            .next_spawn
            .and_then(|spawn| spawn.checked_sub(*seconds_before_objective))
            .is_some_and(|at| at == now),
    }
}

/// Whether a wave carrying a cannon minion spawns at `now`. Only every third
/// wave inside `[FIRST_WAVE_SECS, CANNON_WINDOW_END_SECS)` counts.
fn is_cannon_wave(now: u32) -> bool {
    if !(FIRST_WAVE_SECS..CANNON_WINDOW_END_SECS).contains(&now) {
        return false;
    }
    let since_first = now - FIRST_WAVE_SECS;
    if !since_first.is_multiple_of(WAVE_INTERVAL_SECS) {
        return false;
    }
    let wave = since_first / WAVE_INTERVAL_SECS + 1;
    wave.is_multiple_of(EARLY_CANNON_WAVE_PERIOD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ActivePlayer, Objective};
    use crate::objectives::{ObjectiveState, ObjectiveTimer};
    use crate::ports::AudioRef;

    fn state_at(game_time: u32) -> GameState {
        GameState {
            game_time,
            events: Vec::new(),
            active_player: ActivePlayer {
                is_alive: true,
                ..Default::default()
            },
            objectives: ObjectiveState::default(),
        }
    }

    fn cue(id: &str, trigger: CueTrigger) -> Cue {
        Cue {
            id: id.to_string(),
            text: id.to_string(),
            audio: AudioRef::new(format!("{id}.wav")),
            trigger,
        }
    }

    fn due_ids(state: &GameState, cues: &[Cue]) -> Vec<String> {
        due_cues(state, cues)
            .into_iter()
            .map(|c| c.id.clone())
            .collect()
    }

    #[test]
    fn test_interval_fires_on_multiples_only() {
        let cues = [cue("ward", CueTrigger::Interval { interval: 60 })];
        for t in [60, 120, 180] {
            assert_eq!(due_ids(&state_at(t), &cues), vec!["ward"], "t={t}");
        }
        for t in [0, 59, 61, 119] {
            assert!(due_cues(&state_at(t), &cues).is_empty(), "t={t}");
        }
    }

    #[test]
    fn test_zero_interval_never_fires() {
        let cues = [cue("broken", CueTrigger::Interval { interval: 0 })];
        for t in [0, 1, 60] {
            assert!(due_cues(&state_at(t), &cues).is_empty());
        }
    }

    #[test]
    fn test_one_time_fires_once() {
        let cues = [cue("once", CueTrigger::OneTime { trigger_at: 150 })];
        assert_eq!(due_ids(&state_at(150), &cues), vec!["once"]);
        assert!(due_cues(&state_at(149), &cues).is_empty());
        assert!(due_cues(&state_at(151), &cues).is_empty());
    }

    #[test]
    fn test_objective_lead_time() {
        let cues = [cue(
            "drake",
            CueTrigger::Objective {
                objective: Objective::Dragon,
                seconds_before_objective: 30,
            },
        )];
        let mut state = state_at(570);
        state.objectives.dragon = ObjectiveTimer::pending(600);

        assert_eq!(due_ids(&state, &cues), vec!["drake"]);
        state.game_time = 571;
        assert!(due_cues(&state, &cues).is_empty());
    }

    #[test]
    fn test_objective_without_spawn_is_not_due() {
        let cues = [cue(
            "herald",
            CueTrigger::Objective {
                objective: Objective::Herald,
                seconds_before_objective: 60,
            },
        )];
        let mut state = state_at(840);
        state.objectives.herald = ObjectiveTimer::alive();
        assert!(due_cues(&state, &cues).is_empty());
    }

    #[test]
    fn test_objective_lead_longer_than_spawn_time() {
        let cues = [cue(
            "early",
            CueTrigger::Objective {
                objective: Objective::Dragon,
                seconds_before_objective: 400,
            },
        )];
        // 300 - 400 underflows: never due rather than wrapping.
        for t in [0, 1, 300] {
            assert!(due_cues(&state_at(t), &cues).is_empty());
        }
    }

    #[test]
    fn test_respawn_event() {
        let cues = [cue(
            "respawn",
            CueTrigger::Event {
                event: CueEvent::Respawn,
            },
        )];
        let mut state = state_at(700);
        state.active_player.is_alive = false;
        state.active_player.respawns_in = 2;
        assert!(due_cues(&state, &cues).is_empty());

        state.active_player.respawns_in = 1;
        assert_eq!(due_ids(&state, &cues), vec!["respawn"]);
    }

    #[test]
    fn test_cannon_waves() {
        // Waves: 65, 95, 125 (cannon), 155, 185, 215 (cannon), ...
        assert!(!is_cannon_wave(65));
        assert!(!is_cannon_wave(95));
        assert!(is_cannon_wave(125));
        assert!(!is_cannon_wave(126));
        assert!(is_cannon_wave(215));
        assert!(!is_cannon_wave(0));

        // Last cannon wave inside the window is wave 27 at 845.
        assert!(is_cannon_wave(845));
        assert!(!is_cannon_wave(875));
    }

    #[test]
    fn test_cannon_waves_stop_at_window_end() {
        let late: Vec<u32> = (CANNON_WINDOW_END_SECS..4000)
            .filter(|t| is_cannon_wave(*t))
            .collect();
        assert!(late.is_empty(), "late cannon waves: {late:?}");

        let cues = [cue(
            "cannon",
            CueTrigger::Event {
                event: CueEvent::CannonWave,
            },
        )];
        for t in [905, 935, 995, 1805] {
            assert!(due_cues(&state_at(t), &cues).is_empty(), "t={t}");
        }
    }

    #[test]
    fn test_unknown_event_never_due() {
        let cues = [cue(
            "mystery",
            CueTrigger::Event {
                event: CueEvent::Unknown("dance".to_string()),
            },
        )];
        for t in [0, 65, 125, 600] {
            assert!(due_cues(&state_at(t), &cues).is_empty());
        }
    }

    #[test]
    fn test_preserves_input_order() {
        let cues = [
            cue("b", CueTrigger::Interval { interval: 30 }),
            cue("a", CueTrigger::OneTime { trigger_at: 60 }),
            cue("c", CueTrigger::Interval { interval: 7 }),
            cue("d", CueTrigger::Interval { interval: 20 }),
        ];
        assert_eq!(due_ids(&state_at(60), &cues), vec!["b", "a", "d"]);
    }
}
