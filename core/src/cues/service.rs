//! Creating and deleting cues.

use thiserror::Error;
use tracing::info;

use crate::ports::{SpeechError, TextToSpeech};
use crate::storage::RepositoryError;

use super::definition::{Cue, CueEvent, CueTrigger};
use super::repository::CueRepository;

const ID_PREFIX: &str = "cue-";

#[derive(Debug, Error)]
pub enum CueError {
    #[error("cue text is empty")]
    EmptyText,
    #[error("invalid trigger: {0}")]
    InvalidTrigger(String),
    #[error("cue {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Speech(#[from] SpeechError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Request to create a cue. The id and audio are assigned on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCue {
    pub text: String,
    pub trigger: CueTrigger,
}

pub struct CueService<R, T> {
    repository: R,
    speech: T,
}

impl<R: CueRepository, T: TextToSpeech> CueService<R, T> {
    pub fn new(repository: R, speech: T) -> Self {
        Self { repository, speech }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validate, synthesize and persist a new cue.
    pub async fn create(&self, request: NewCue) -> Result<Cue, CueError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(CueError::EmptyText);
        }
        validate_trigger(&request.trigger)?;

        let audio = self.speech.generate(text).await?;
        let cue = Cue {
            id: self.next_id()?,
            text: text.to_string(),
            audio,
            trigger: request.trigger,
        };
        self.repository.save(cue.clone())?;

        info!(cue_id = %cue.id, trigger = %cue.trigger, "Created cue");
        Ok(cue)
    }

    pub fn delete(&self, id: &str) -> Result<(), CueError> {
        if !self.repository.remove(id)? {
            return Err(CueError::NotFound(id.to_string()));
        }
        info!(cue_id = id, "Deleted cue");
        Ok(())
    }

    /// `cue-<n>` with `n` one past the highest number in use.
    fn next_id(&self) -> Result<String, CueError> {
        let highest = self
            .repository
            .all()?
            .iter()
            .filter_map(|cue| cue.id.strip_prefix(ID_PREFIX)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Ok(format!("{ID_PREFIX}{}", highest + 1))
    }
}

fn validate_trigger(trigger: &CueTrigger) -> Result<(), CueError> {
    match trigger {
        CueTrigger::Interval { interval: 0 } => Err(CueError::InvalidTrigger(
            "interval must be at least one second".to_string(),
        )),
        CueTrigger::Event {
            event: CueEvent::Unknown(name),
        } => Err(CueError::InvalidTrigger(format!("unknown event {name:?}"))),
        _ => Ok(()),
    }
}
