use std::fmt;

use serde::{Deserialize, Serialize};

use crate::snapshot::RawEvent;

/// Neutral map objectives with tracked spawn timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Dragon,
    Baron,
    Herald,
    Grubs,
    Atakhan,
}

impl Objective {
    pub const ALL: [Objective; 5] = [
        Objective::Dragon,
        Objective::Baron,
        Objective::Herald,
        Objective::Grubs,
        Objective::Atakhan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dragon => "dragon",
            Self::Baron => "baron",
            Self::Herald => "herald",
            Self::Grubs => "grubs",
            Self::Atakhan => "atakhan",
        }
    }

    /// Map a live client kill event name to the objective it refers to.
    fn from_kill_event(name: &str) -> Option<Self> {
        match name {
            "DragonKill" => Some(Self::Dragon),
            "BaronKill" => Some(Self::Baron),
            "HeraldKill" => Some(Self::Herald),
            "HordeKill" => Some(Self::Grubs),
            "AtakhanKill" => Some(Self::Atakhan),
            _ => None,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    /// Parse the live client side name (`ORDER` is blue, `CHAOS` is red).
    pub fn from_side(side: &str) -> Option<Self> {
        match side {
            "ORDER" => Some(Self::Blue),
            "CHAOS" => Some(Self::Red),
            _ => None,
        }
    }
}

/// A telemetry event, deduplicated and mapped out of the raw document.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainEvent {
    /// Unique within a match session.
    pub id: u64,
    pub kind: EventKind,
    /// Game time (seconds) at which the event happened.
    pub timestamp: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    GameStart,
    MinionsSpawning,
    ObjectiveKilled {
        objective: Objective,
        /// Killing team. `None` when the killer could not be resolved
        /// (e.g. the last hit came from a minion or the roster was empty).
        team: Option<Team>,
        stolen: bool,
    },
    ChampionKill {
        killer: String,
        victim: String,
    },
    Other {
        name: String,
    },
}

impl DomainEvent {
    /// Build a domain event from its raw form. `team_of` resolves a player
    /// name to their team.
    pub fn from_raw(raw: &RawEvent, team_of: impl Fn(&str) -> Option<Team>) -> Self {
        let kind = match raw.event_name.as_str() {
            "GameStart" => EventKind::GameStart,
            "MinionsSpawning" => EventKind::MinionsSpawning,
            "ChampionKill" => EventKind::ChampionKill {
                killer: raw.killer_name.clone().unwrap_or_default(),
                victim: raw.victim_name.clone().unwrap_or_default(),
            },
            name => match Objective::from_kill_event(name) {
                Some(objective) => EventKind::ObjectiveKilled {
                    objective,
                    team: raw.killer_name.as_deref().and_then(team_of),
                    stolen: raw.was_stolen(),
                },
                None => EventKind::Other {
                    name: name.to_string(),
                },
            },
        };

        Self {
            id: raw.event_id,
            kind,
            timestamp: raw.event_time,
        }
    }

    pub fn killed_objective(&self) -> Option<(Objective, Option<Team>)> {
        match self.kind {
            EventKind::ObjectiveKilled {
                objective, team, ..
            } => Some((objective, team)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: u64, name: &str, time: f64, killer: Option<&str>) -> RawEvent {
        RawEvent {
            event_id: id,
            event_name: name.to_string(),
            event_time: time,
            killer_name: killer.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_kill_events_map_to_objectives() {
        let cases = [
            ("DragonKill", Objective::Dragon),
            ("BaronKill", Objective::Baron),
            ("HeraldKill", Objective::Herald),
            ("HordeKill", Objective::Grubs),
            ("AtakhanKill", Objective::Atakhan),
        ];
        for (name, expected) in cases {
            let event = DomainEvent::from_raw(&raw(1, name, 10.0, None), |_| None);
            assert_eq!(event.killed_objective(), Some((expected, None)), "{name}");
        }
    }

    #[test]
    fn test_killer_team_is_resolved() {
        let event = DomainEvent::from_raw(&raw(7, "DragonKill", 300.0, Some("Jungler")), |name| {
            (name == "Jungler").then_some(Team::Red)
        });
        assert_eq!(event.id, 7);
        assert_eq!(event.timestamp, 300.0);
        assert_eq!(
            event.killed_objective(),
            Some((Objective::Dragon, Some(Team::Red)))
        );
    }

    #[test]
    fn test_unknown_event_is_kept_as_other() {
        let event = DomainEvent::from_raw(&raw(3, "FirstBrick", 600.0, None), |_| None);
        assert_eq!(
            event.kind,
            EventKind::Other {
                name: "FirstBrick".to_string()
            }
        );
    }
}
