//! In-memory decoder for tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{Decoder, DecoderError, FrameCursor, VideoStream};

/// Serves fixed timelines; paths it does not know fail to open.
#[derive(Debug, Default)]
pub struct FakeDecoder {
    videos: HashMap<PathBuf, (f64, u64)>,
}

impl FakeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video(mut self, path: impl Into<PathBuf>, fps: f64, frames: u64) -> Self {
        self.videos.insert(path.into(), (fps, frames));
        self
    }
}

impl Decoder for FakeDecoder {
    fn open(&self, path: &Path) -> Result<Box<dyn VideoStream>, DecoderError> {
        match self.videos.get(path) {
            Some(&(fps, frames)) => Ok(Box::new(FrameCursor::new(fps, frames))),
            None => Err(DecoderError::Open {
                path: path.to_path_buf(),
                message: "unsupported".to_string(),
            }),
        }
    }
}
