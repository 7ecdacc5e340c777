//! TOML file storage shared by the cue and reminder repositories.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("IO error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("config error: {0}")]
    Config(#[from] confy::ConfyError),
    #[error("background task failed: {0}")]
    Task(String),
}

/// Load a TOML document. A missing file yields `T::default()`.
pub fn load_file<T>(path: &Path) -> Result<T, RepositoryError>
where
    T: DeserializeOwned + Default,
{
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(RepositoryError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    toml::from_str(&contents).map_err(|e| RepositoryError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a TOML document, creating the parent directory if needed.
pub fn save_file<T: Serialize>(path: &Path, value: &T) -> Result<(), RepositoryError> {
    let contents = toml::to_string_pretty(value).map_err(|e| RepositoryError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| RepositoryError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, contents).map_err(|e| RepositoryError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
