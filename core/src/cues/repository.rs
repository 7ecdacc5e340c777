//! Cue persistence.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use crate::storage::{self, RepositoryError};

use super::definition::{Cue, CueFile};

/// Storage for cues (or reminders).
///
/// Calls are synchronous and `all` runs on every tick from inside
/// `EventBus::publish`, so implementations must not do more than a stat per
/// call on the hot path. Disk-backed ones cache the parsed list.
pub trait CueRepository: Send + Sync + 'static {
    fn all(&self) -> Result<Vec<Cue>, RepositoryError>;

    /// Insert `cue`, replacing any cue with the same id.
    fn save(&self, cue: Cue) -> Result<(), RepositoryError>;

    /// Returns whether a cue was removed.
    fn remove(&self, id: &str) -> Result<bool, RepositoryError>;
}

impl<T: CueRepository> CueRepository for Arc<T> {
    fn all(&self) -> Result<Vec<Cue>, RepositoryError> {
        (**self).all()
    }

    fn save(&self, cue: Cue) -> Result<(), RepositoryError> {
        (**self).save(cue)
    }

    fn remove(&self, id: &str) -> Result<bool, RepositoryError> {
        (**self).remove(id)
    }
}

fn upsert(cues: &mut Vec<Cue>, cue: Cue) {
    match cues.iter_mut().find(|existing| existing.id == cue.id) {
        Some(existing) => *existing = cue,
        None => cues.push(cue),
    }
}

fn remove_by_id(cues: &mut Vec<Cue>, id: &str) -> bool {
    let before = cues.len();
    cues.retain(|cue| cue.id != id);
    cues.len() != before
}

#[derive(Debug, Default)]
pub struct MemoryCueRepository {
    cues: Mutex<Vec<Cue>>,
}

impl MemoryCueRepository {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self {
            cues: Mutex::new(cues),
        }
    }

    fn cues(&self) -> std::sync::MutexGuard<'_, Vec<Cue>> {
        self.cues.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CueRepository for MemoryCueRepository {
    fn all(&self) -> Result<Vec<Cue>, RepositoryError> {
        Ok(self.cues().clone())
    }

    fn save(&self, cue: Cue) -> Result<(), RepositoryError> {
        upsert(&mut self.cues(), cue);
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<bool, RepositoryError> {
        Ok(remove_by_id(&mut self.cues(), id))
    }
}

/// Cues stored in a TOML file of `[[cue]]` tables. A missing file holds no
/// cues.
///
/// The parsed list is cached and re-read only when the file's modification
/// time or length changes, so edits made while a match is running apply on
/// the next tick without re-parsing every poll.
#[derive(Debug, Clone)]
pub struct TomlCueRepository {
    path: PathBuf,
    cache: Arc<Mutex<Option<CachedFile>>>,
}

#[derive(Debug)]
struct CachedFile {
    stamp: FileStamp,
    cues: Vec<Cue>,
}

/// Modification time and length, `None` when the file does not exist.
type FileStamp = Option<(Option<SystemTime>, u64)>;

impl TomlCueRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Arc::new(Mutex::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn stamp(&self) -> FileStamp {
        fs::metadata(&self.path)
            .ok()
            .map(|meta| (meta.modified().ok(), meta.len()))
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, Option<CachedFile>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self) -> Result<CueFile, RepositoryError> {
        storage::load_file(&self.path)
    }

    fn store(&self, file: &CueFile) -> Result<(), RepositoryError> {
        let result = storage::save_file(&self.path, file);
        *self.cache() = None;
        result
    }
}

impl CueRepository for TomlCueRepository {
    fn all(&self) -> Result<Vec<Cue>, RepositoryError> {
        let stamp = self.stamp();
        let mut cache = self.cache();
        if let Some(cached) = cache.as_ref()
            && cached.stamp == stamp
        {
            return Ok(cached.cues.clone());
        }

        let cues = self.load()?.cues;
        *cache = Some(CachedFile {
            stamp,
            cues: cues.clone(),
        });
        Ok(cues)
    }

    fn save(&self, cue: Cue) -> Result<(), RepositoryError> {
        let mut file = self.load()?;
        upsert(&mut file.cues, cue);
        self.store(&file)
    }

    fn remove(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut file = self.load()?;
        if !remove_by_id(&mut file.cues, id) {
            return Ok(false);
        }
        self.store(&file)?;
        Ok(true)
    }
}
