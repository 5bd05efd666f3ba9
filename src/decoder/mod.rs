//! Decoder collaborator.
//!
//! The controller never decodes pictures itself. It drives a [`VideoStream`]
//! obtained from a [`Decoder`], reading one frame per paced tick and moving
//! the position cursor on seeks. Dropping the stream releases it.

mod ffprobe;
#[cfg(test)]
pub(crate) mod testing;

pub use ffprobe::FfprobeDecoder;

use std::path::{Path, PathBuf};

/// Errors opening a video. These are per-file and never fatal.
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Cannot open video {}: {message}", path.display())]
    Open { path: PathBuf, message: String },

    #[error("No video stream in {}", path.display())]
    NoVideoStream { path: PathBuf },

    #[error("Probe tool '{tool}' not found")]
    ToolNotFound { tool: &'static str },
}

/// One advanced frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Zero-based frame index
    pub index: u64,
    /// Presentation time of the frame in milliseconds
    pub timestamp_ms: f64,
}

/// Opens video files.
pub trait Decoder {
    fn open(&self, path: &Path) -> Result<Box<dyn VideoStream>, DecoderError>;
}

/// An open video with a position cursor.
pub trait VideoStream {
    /// Current position in milliseconds.
    fn position_ms(&self) -> f64;

    /// Move the cursor. Out-of-range values are clamped by the stream.
    fn set_position_ms(&mut self, ms: f64);

    /// Frames per second as reported by the container (may be 0).
    fn fps(&self) -> f64;

    fn frame_count(&self) -> u64;

    /// Advance one frame, or `None` at the end of the stream.
    fn read_frame(&mut self) -> Option<Frame>;

    /// Total length in seconds derived from frame count and fps.
    fn duration_seconds(&self) -> f64 {
        let fps = self.fps();
        if fps > 0.0 {
            self.frame_count() as f64 / fps
        } else {
            0.0
        }
    }
}

/// Frame cursor over a known timeline.
///
/// Shared by the ffprobe-backed decoder and tests: it knows fps and frame
/// count and walks frames without producing pixels.
#[derive(Debug, Clone)]
pub struct FrameCursor {
    fps: f64,
    frame_count: u64,
    next_frame: u64,
}

impl FrameCursor {
    pub fn new(fps: f64, frame_count: u64) -> Self {
        Self {
            fps,
            frame_count,
            next_frame: 0,
        }
    }
}

impl VideoStream for FrameCursor {
    fn position_ms(&self) -> f64 {
        if self.fps > 0.0 {
            self.next_frame as f64 / self.fps * 1000.0
        } else {
            0.0
        }
    }

    fn set_position_ms(&mut self, ms: f64) {
        let frame = (ms.max(0.0) / 1000.0 * self.fps).round();
        self.next_frame = (frame as u64).min(self.frame_count);
    }

    fn fps(&self) -> f64 {
        self.fps
    }

    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn read_frame(&mut self) -> Option<Frame> {
        if self.next_frame >= self.frame_count {
            return None;
        }
        let frame = Frame {
            index: self.next_frame,
            timestamp_ms: self.position_ms(),
        };
        self.next_frame += 1;
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_reads_until_end() {
        let mut cursor = FrameCursor::new(10.0, 3);
        assert_eq!(cursor.read_frame().map(|f| f.index), Some(0));
        assert_eq!(cursor.read_frame().map(|f| f.index), Some(1));
        assert_eq!(cursor.read_frame().map(|f| f.index), Some(2));
        assert!(cursor.read_frame().is_none());
    }

    #[test]
    fn cursor_position_tracks_frames() {
        let mut cursor = FrameCursor::new(30.0, 1800);
        cursor.set_position_ms(10_000.0);
        assert!((cursor.position_ms() - 10_000.0).abs() < 1.0);

        let frame = cursor.read_frame().unwrap();
        assert_eq!(frame.index, 300);
    }

    #[test]
    fn cursor_clamps_position() {
        let mut cursor = FrameCursor::new(30.0, 300);
        cursor.set_position_ms(-500.0);
        assert_eq!(cursor.position_ms(), 0.0);

        cursor.set_position_ms(1_000_000.0);
        assert!((cursor.position_ms() - 10_000.0).abs() < 1.0);
        assert!(cursor.read_frame().is_none());
    }

    #[test]
    fn duration_from_fps_and_count() {
        let cursor = FrameCursor::new(30.0, 1800);
        assert_eq!(cursor.duration_seconds(), 60.0);

        let no_fps = FrameCursor::new(0.0, 1800);
        assert_eq!(no_fps.duration_seconds(), 0.0);
    }
}
