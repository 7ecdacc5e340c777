//! Where the playback queue reads the current volume from.
//!
//! Settings are re-read for every cue so a volume change applies to the next
//! playback without restarting anything.

use std::future::Future;

use warden_types::{AppConfig, AudioSettings};

use crate::storage::RepositoryError;

use super::config::APP_NAME;

pub trait SettingsRepository: Send + Sync + 'static {
    fn load(&self) -> impl Future<Output = Result<AudioSettings, RepositoryError>> + Send;
}

/// Fixed settings.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings(pub AudioSettings);

impl SettingsRepository for StaticSettings {
    async fn load(&self) -> Result<AudioSettings, RepositoryError> {
        Ok(self.0.clone())
    }
}

/// Settings read from the confy config file on every call.
#[derive(Debug, Clone, Default)]
pub struct ConfigFileSettings;

impl SettingsRepository for ConfigFileSettings {
    async fn load(&self) -> Result<AudioSettings, RepositoryError> {
        let config = tokio::task::spawn_blocking(|| confy::load::<AppConfig>(APP_NAME, None))
            .await
            .map_err(|e| RepositoryError::Task(e.to_string()))?
            .map_err(RepositoryError::Config)?;
        Ok(config.audio)
    }
}
