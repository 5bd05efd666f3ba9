//! Resume positions keyed by file identity.
//!
//! The store is a flat JSON object mapping absolute paths to elapsed seconds.
//! Reading and writing it never fails from the caller's point of view: a
//! missing or corrupt file yields an empty store and write errors are logged.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the default store, placed in the user's home directory.
pub const DEFAULT_FILE_NAME: &str = ".pp_timestamps.json";

/// Last-known playback positions.
#[derive(Debug, Default)]
pub struct TimestampStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, f64>,
}

impl TimestampStore {
    /// Default location: `$HOME/.pp_timestamps.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_FILE_NAME))
    }

    /// Load the store from `path`, falling back to an empty map.
    pub fn load(path: &Path) -> Self {
        let entries = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, f64>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt timestamp file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read timestamp file");
                BTreeMap::new()
            }
        };
        tracing::debug!(count = entries.len(), "loaded timestamps");

        Self {
            path: Some(path.to_path_buf()),
            entries,
        }
    }

    /// Store that is never persisted.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn get(&self, identity: &str) -> Option<f64> {
        self.entries.get(identity).copied()
    }

    /// Record `seconds` for `identity`. Negative or non-finite values become 0.
    pub fn set(&mut self, identity: impl Into<String>, seconds: f64) {
        let seconds = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        self.entries.insert(identity.into(), seconds);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the whole map back to disk. Errors are logged and swallowed.
    pub fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };

        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "cannot serialize timestamps");
                return;
            }
        };

        if let Err(e) = fs::write(path, json) {
            tracing::warn!(path = %path.display(), error = %e, "cannot save timestamps");
        } else {
            tracing::debug!(path = %path.display(), count = self.entries.len(), "saved timestamps");
        }
    }
}
