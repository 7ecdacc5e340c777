use std::path::PathBuf;
use std::time::Duration;

use warden_types::AppConfig;

use crate::storage::RepositoryError;

/// Name under which confy stores the config (`<config_dir>/warden/`).
pub const APP_NAME: &str = "warden";

/// `<config_dir>/warden`, if the platform has a config directory.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME))
}

/// Loading, saving and derived values for [`AppConfig`].
pub trait AppConfigExt: Sized {
    /// Load from disk, falling back to defaults if the file is missing or
    /// unreadable.
    fn load() -> Self;
    fn save(&self) -> Result<(), RepositoryError>;
    fn poll_interval(&self) -> Duration;
    fn port_timeout(&self) -> Option<Duration>;
    fn cues_path(&self) -> PathBuf;
    fn reminders_path(&self) -> PathBuf;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        match confy::load::<AppConfig>(APP_NAME, None) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load config, using defaults");
                AppConfig::default()
            }
        }
    }

    fn save(&self) -> Result<(), RepositoryError> {
        confy::store(APP_NAME, None, self).map_err(RepositoryError::Config)
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.polling.interval_ms.max(1))
    }

    fn port_timeout(&self) -> Option<Duration> {
        self.polling.timeout_ms.map(Duration::from_millis)
    }

    fn cues_path(&self) -> PathBuf {
        data_file(self.cues_file.as_deref(), "cues.toml")
    }

    fn reminders_path(&self) -> PathBuf {
        data_file(self.reminders_file.as_deref(), "reminders.toml")
    }
}

fn data_file(configured: Option<&str>, default_name: &str) -> PathBuf {
    match configured {
        Some(path) => PathBuf::from(path),
        None => default_config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(default_name),
    }
}
