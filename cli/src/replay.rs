//! Replays a recorded session: one live client document per line, `null`
//! for a poll that found no match.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use warden_core::RawSnapshot;
use warden_core::ports::{GameDataPort, PortError};

#[derive(Clone)]
pub struct ReplayClient {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl ReplayClient {
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        Ok(Self::from_lines(&contents))
    }

    pub fn from_lines(contents: &str) -> Self {
        let lines = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            lines: Arc::new(Mutex::new(lines)),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl GameDataPort for ReplayClient {
    /// Once the recording is exhausted every poll reports no match.
    async fn game_data(&self) -> Result<Option<RawSnapshot>, PortError> {
        let line = self
            .lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match line {
            Some(line) => RawSnapshot::from_json_optional(&line),
            None => Ok(None),
        }
    }
}
