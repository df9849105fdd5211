//! Local score store.
//!
//! Keeps a cumulative score per game key in a small JSON file:
//!
//! ```json
//! {"scores":{"tone_puzzle":120}}
//! ```
//!
//! Writes go to a sibling temp file that is then renamed over the original, so
//! a crash mid-write never leaves a truncated document behind.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("score file I/O failed for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("score file {path:?} could not be parsed as a score file: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    scores: BTreeMap<String, u64>,
}

/// Cumulative scores backed by a JSON file.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
    data: ScoreFile,
}

impl ScoreStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "score file missing, starting empty");
                ScoreFile::default()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cumulative score for `key` (0 if never recorded).
    pub fn get(&self, key: &str) -> u64 {
        self.data.scores.get(key).copied().unwrap_or(0)
    }

    /// Add `points` to `key` and persist. Returns the new total.
    ///
    /// The in-memory scores only change once the file has been written, so a
    /// failed add leaves `get` agreeing with what is on disk.
    pub fn add(&mut self, key: &str, points: u64) -> Result<u64, StoreError> {
        let total = self.get(key).saturating_add(points);
        let mut next = self.data.clone();
        next.scores.insert(key.to_string(), total);
        self.save(&next)?;
        self.data = next;
        info!(key, points, total, "score recorded");
        Ok(total)
    }

    fn save(&self, data: &ScoreFile) -> Result<(), StoreError> {
        let json = serde_json::to_string(data).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.tmp_path();
        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
