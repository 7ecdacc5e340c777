//! Audio output adapters.

use tracing::info;
use warden_core::AudioRef;
use warden_core::ports::{AudioPlayer, PlaybackError, SpeechError, TextToSpeech};

/// Logs each cue instead of playing it. Used when built without the `rodio`
/// feature and for dry runs.
#[derive(Debug, Clone, Default)]
pub struct LogPlayer;

impl AudioPlayer for LogPlayer {
    async fn play(&self, audio: &AudioRef, volume: f32) -> Result<(), PlaybackError> {
        info!(audio = %audio, volume, "Cue");
        Ok(())
    }
}

/// Speech "synthesis" that hands back a recording the user already made.
#[derive(Debug, Clone, Default)]
pub struct Prerecorded(Option<AudioRef>);

impl Prerecorded {
    pub fn new(audio: AudioRef) -> Self {
        Self(Some(audio))
    }
}

impl TextToSpeech for Prerecorded {
    async fn generate(&self, _text: &str) -> Result<AudioRef, SpeechError> {
        let audio = self
            .0
            .clone()
            .ok_or_else(|| SpeechError::Synthesis("no audio file given".to_string()))?;
        if !audio.path().exists() {
            return Err(SpeechError::Synthesis(format!("{audio} does not exist")));
        }
        Ok(audio)
    }
}

#[cfg(feature = "rodio")]
pub use self::rodio_player::RodioPlayer;

#[cfg(feature = "rodio")]
mod rodio_player {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::PathBuf;

    use rodio::{Decoder, OutputStream, Sink};
    use warden_core::AudioRef;
    use warden_core::ports::{AudioPlayer, PlaybackError};

    /// Plays audio files on the default output device.
    #[derive(Debug, Clone, Default)]
    pub struct RodioPlayer;

    impl AudioPlayer for RodioPlayer {
        async fn play(&self, audio: &AudioRef, volume: f32) -> Result<(), PlaybackError> {
            let path = audio.path().to_path_buf();
            tokio::task::spawn_blocking(move || play_blocking(path, volume))
                .await
                .map_err(|e| PlaybackError::Output(e.to_string()))?
        }
    }

    /// The output stream is not `Send`, so it lives and dies on the
    /// blocking thread.
    fn play_blocking(path: PathBuf, volume: f32) -> Result<(), PlaybackError> {
        if !path.exists() {
            return Err(PlaybackError::NotFound { path });
        }

        let (_stream, stream_handle) =
            OutputStream::try_default().map_err(|e| PlaybackError::Output(e.to_string()))?;
        let file = File::open(&path).map_err(|e| PlaybackError::Decode {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let sink = Sink::try_new(&stream_handle).map_err(|e| PlaybackError::Output(e.to_string()))?;

        sink.set_volume(volume);
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prerecorded_requires_existing_file() {
        let missing = Prerecorded::new(AudioRef::new("/nonexistent/warden/cue.wav"));
        assert!(missing.generate("ward").await.is_err());
        assert!(Prerecorded::default().generate("ward").await.is_err());

        let path = std::env::temp_dir().join(format!("warden-cli-{}.wav", std::process::id()));
        std::fs::write(&path, b"RIFF").unwrap();
        let present = Prerecorded::new(AudioRef::new(&path));
        assert_eq!(present.generate("ward").await.unwrap(), AudioRef::new(&path));
        let _ = std::fs::remove_file(&path);
    }
}
