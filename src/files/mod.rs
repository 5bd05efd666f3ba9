//! Playlist discovery.
//!
//! Collects the video files that live next to (or inside) the path given on
//! the command line and keeps them in a stable, sorted order.

use std::fs;
use std::path::{Path, PathBuf};

/// File extensions recognized as video, compared lowercase.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v"];

/// Errors that make playback impossible before it starts.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Path {} does not exist", path.display())]
    PathNotFound { path: PathBuf },

    #[error("No video files found in {}", dir.display())]
    NoVideoFiles { dir: PathBuf },

    #[error("Failed to read directory {}", dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Sorted list of video files plus the index playback should start at.
#[derive(Debug, Clone)]
pub struct Playlist {
    files: Vec<PathBuf>,
    start_index: usize,
}

impl Playlist {
    /// Discover video files for `path`.
    ///
    /// A directory is scanned directly. A file selects its parent directory and
    /// becomes the starting entry when it is itself a video file.
    pub fn discover(path: &Path) -> Result<Self, DiscoveryError> {
        let path = absolute(path);
        let (dir, selected) = if path.is_file() {
            let dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (dir, Some(path.clone()))
        } else {
            (path.clone(), None)
        };

        if !dir.exists() {
            return Err(DiscoveryError::PathNotFound { path: dir });
        }

        let entries = fs::read_dir(&dir).map_err(|source| DiscoveryError::ReadDir {
            dir: dir.clone(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && is_video_file(p))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(DiscoveryError::NoVideoFiles { dir });
        }

        let start_index = selected
            .and_then(|sel| files.iter().position(|f| *f == sel))
            .unwrap_or(0);

        tracing::info!(count = files.len(), dir = %dir.display(), "found video files");
        Ok(Self { files, start_index })
    }

    /// Build a playlist from an explicit list (used by tests and embedders).
    ///
    /// Returns `None` for an empty list.
    pub fn from_files(files: Vec<PathBuf>) -> Option<Self> {
        if files.is_empty() {
            None
        } else {
            Some(Self {
                files,
                start_index: 0,
            })
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn get(&self, index: usize) -> Option<&PathBuf> {
        self.files.get(index)
    }

    /// Index after `index`, wrapping to 0 past the last file.
    pub fn wrap_next(&self, index: usize) -> usize {
        (index + 1) % self.files.len()
    }

    /// Index before `index`, wrapping to the last file before 0.
    pub fn wrap_prev(&self, index: usize) -> usize {
        (index + self.files.len() - 1) % self.files.len()
    }
}

/// Stable identity used as the timestamp key for a file.
pub fn file_identity(path: &Path) -> String {
    absolute(path).to_string_lossy().into_owned()
}

/// File name for display, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| VIDEO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}
