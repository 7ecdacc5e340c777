mod config;
mod settings;

pub use config::{APP_NAME, AppConfigExt, default_config_dir};
pub use settings::{ConfigFileSettings, SettingsRepository, StaticSettings};
pub use warden_types::{AppConfig, AudioSettings, PollingSettings};
