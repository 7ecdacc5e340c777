//! Shared configuration and display types for Warden.

pub mod config;
pub mod formatting;

pub use config::{AppConfig, AudioSettings, PollingSettings};
