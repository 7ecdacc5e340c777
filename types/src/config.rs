//! Application configuration shared between the core and the front ends.
//!
//! Every field has a default so a partially written (or older) config file
//! still loads.

use serde::{Deserialize, Serialize};

/// Default volume on the 0-100 scale.
pub const DEFAULT_VOLUME: u8 = 70;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub polling: PollingSettings,
    pub audio: AudioSettings,
    /// Cue file override. `None` uses `<config_dir>/warden/cues.toml`.
    pub cues_file: Option<String>,
    /// Reminder file override. `None` uses `<config_dir>/warden/reminders.toml`.
    pub reminders_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            polling: PollingSettings::default(),
            audio: AudioSettings::default(),
            cues_file: None,
            reminders_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    /// Target time between two polls of the live client.
    pub interval_ms: u64,
    /// Upper bound on a single live client request. `None` waits indefinitely.
    pub timeout_ms: Option<u64>,
    /// Endpoint serving the live client "all game data" document.
    pub live_client_url: String,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            timeout_ms: Some(2000),
            live_client_url: "https://127.0.0.1:2999/liveclientdata/allgamedata".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub enabled: bool,
    /// 0-100
    pub volume: u8,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl AudioSettings {
    /// Volume as a linear gain in `0.0..=1.0`. Disabled audio is silent.
    pub fn gain(&self) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        f32::from(self.volume.min(100)) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[audio]
volume = 40
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.audio.volume, 40);
        assert!(config.audio.enabled);
        assert_eq!(config.polling.interval_ms, 1000);
        assert_eq!(config.cues_file, None);
    }

    #[test]
    fn test_gain() {
        let mut audio = AudioSettings { enabled: true, volume: 50 };
        assert_eq!(audio.gain(), 0.5);
        audio.volume = 250;
        assert_eq!(audio.gain(), 1.0);
        audio.enabled = false;
        assert_eq!(audio.gain(), 0.0);
    }
}
