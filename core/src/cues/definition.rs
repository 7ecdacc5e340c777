//! Cue definition types
//!
//! Cues and reminders share one shape and one on-disk format: a TOML file of
//! `[[cue]]` tables, each with a tagged `trigger` table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Objective;
use crate::ports::AudioRef;

// ═══════════════════════════════════════════════════════════════════════════
// Cue
// ═══════════════════════════════════════════════════════════════════════════

/// A spoken audio cue bound to a trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Unique within its repository (e.g. "cue-3")
    pub id: String,

    /// Text the audio was generated from
    pub text: String,

    /// Pre-generated audio artifact
    pub audio: AudioRef,

    pub trigger: CueTrigger,
}

/// When a cue fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CueTrigger {
    /// Every `interval` game seconds
    Interval { interval: u32 },

    /// Exactly once, at `trigger_at` game seconds
    OneTime { trigger_at: u32 },

    /// On a game occurrence derived from the match state
    Event { event: CueEvent },

    /// `seconds_before_objective` seconds before the objective's next spawn
    Objective {
        objective: Objective,
        seconds_before_objective: u32,
    },
}

// ═══════════════════════════════════════════════════════════════════════════
// Event names
// ═══════════════════════════════════════════════════════════════════════════

/// Named game occurrences usable as event triggers.
///
/// Unrecognized names are kept (so the file round-trips) but never fire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CueEvent {
    /// One second before the local player respawns
    Respawn,
    /// A minion wave carrying a cannon minion spawns
    CannonWave,
    Unknown(String),
}

impl CueEvent {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Respawn => "respawn",
            Self::CannonWave => "cannon-wave",
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for CueEvent {
    fn from(name: String) -> Self {
        match name.as_str() {
            "respawn" => Self::Respawn,
            "cannon-wave" => Self::CannonWave,
            _ => Self::Unknown(name),
        }
    }
}

impl From<CueEvent> for String {
    fn from(event: CueEvent) -> Self {
        match event {
            CueEvent::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CueEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CueTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interval { interval } => write!(f, "every {interval}s"),
            Self::OneTime { trigger_at } => {
                write!(f, "at {}", warden_types::formatting::format_game_time(*trigger_at))
            }
            Self::Event { event } => write!(f, "on {event}"),
            Self::Objective {
                objective,
                seconds_before_objective,
            } => write!(f, "{seconds_before_objective}s before {objective}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// File format
// ═══════════════════════════════════════════════════════════════════════════

/// Root of a cue (or reminder) TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CueFile {
    #[serde(rename = "cue", default)]
    pub cues: Vec<Cue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[cue]]
id = "cue-1"
text = "Check the map"
audio = "/tmp/cue-1.wav"
trigger = { type = "interval", interval = 90 }

[[cue]]
id = "cue-2"
text = "Dragon soon"
audio = "/tmp/cue-2.wav"

[cue.trigger]
type = "objective"
objective = "dragon"
seconds_before_objective = 30

[[cue]]
id = "cue-3"
text = "Cannon"
audio = "/tmp/cue-3.wav"
trigger = { type = "event", event = "cannon-wave" }

[[cue]]
id = "cue-4"
text = "???"
audio = "/tmp/cue-4.wav"
trigger = { type = "event", event = "baron-buff-expiring" }
"#;

    #[test]
    fn test_parse_cue_file() {
        let file: CueFile = toml::from_str(SAMPLE).unwrap();
        assert_eq!(file.cues.len(), 4);
        assert_eq!(file.cues[0].trigger, CueTrigger::Interval { interval: 90 });
        assert_eq!(file.cues[0].audio, AudioRef::new("/tmp/cue-1.wav"));
        assert_eq!(
            file.cues[1].trigger,
            CueTrigger::Objective {
                objective: Objective::Dragon,
                seconds_before_objective: 30
            }
        );
        assert_eq!(
            file.cues[2].trigger,
            CueTrigger::Event {
                event: CueEvent::CannonWave
            }
        );
        assert_eq!(
            file.cues[3].trigger,
            CueTrigger::Event {
                event: CueEvent::Unknown("baron-buff-expiring".to_string())
            }
        );
    }

    #[test]
    fn test_unknown_event_name_is_preserved_on_save() {
        let file: CueFile = toml::from_str(SAMPLE).unwrap();
        let written = toml::to_string_pretty(&file).unwrap();
        assert!(written.contains("baron-buff-expiring"));
        assert!(written.contains("cannon-wave"));
    }

    #[test]
    fn test_empty_file_has_no_cues() {
        let file: CueFile = toml::from_str("").unwrap();
        assert!(file.cues.is_empty());
    }

    #[test]
    fn test_trigger_display() {
        assert_eq!(
            CueTrigger::OneTime { trigger_at: 150 }.to_string(),
            "at 2:30"
        );
        assert_eq!(
            CueTrigger::Event {
                event: CueEvent::Respawn
            }
            .to_string(),
            "on respawn"
        );
    }
}
