//! Capabilities the pipeline consumes but does not implement.
//!
//! Adapters (live client HTTP, audio output, speech synthesis) live outside
//! the core and are injected at construction.

use std::future::Future;
use std::path::PathBuf;

use thiserror::Error;

use crate::snapshot::RawSnapshot;

/// Reference to a playable audio artifact (a file on disk).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AudioRef(pub PathBuf);

impl AudioRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.0
    }
}

impl std::fmt::Display for AudioRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[derive(Debug, Error)]
pub enum PortError {
    #[error("live client request failed: {0}")]
    Request(String),
    #[error("live client returned an unreadable document: {0}")]
    Decode(String),
    #[error("live client did not answer within {0} ms")]
    Timeout(u64),
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio file {path} not found")]
    NotFound { path: PathBuf },
    #[error("audio output unavailable: {0}")]
    Output(String),
    #[error("could not decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
    #[error("could not write speech output: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of live match data.
pub trait GameDataPort: Send + Sync + 'static {
    /// `Ok(None)` when no match is running.
    fn game_data(&self) -> impl Future<Output = Result<Option<RawSnapshot>, PortError>> + Send;
}

/// Plays an audio artifact to completion.
pub trait AudioPlayer: Send + Sync + 'static {
    /// `volume` is a linear gain in `0.0..=1.0`.
    fn play(
        &self,
        audio: &AudioRef,
        volume: f32,
    ) -> impl Future<Output = Result<(), PlaybackError>> + Send;
}

/// Renders cue text to an audio artifact.
pub trait TextToSpeech: Send + Sync {
    fn generate(&self, text: &str) -> impl Future<Output = Result<AudioRef, SpeechError>> + Send;
}
