//! ffprobe-backed decoder.
//!
//! Reads frame rate, frame count and duration of the first video stream and
//! exposes them as a [`FrameCursor`].

use std::path::Path;
use std::process::{Command, Stdio};

use serde::Deserialize;

use super::{Decoder, DecoderError, FrameCursor, VideoStream};

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    nb_frames: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Decoder that shells out to `ffprobe` for stream metadata.
#[derive(Debug, Clone)]
pub struct FfprobeDecoder {
    program: String,
}

impl FfprobeDecoder {
    pub fn new() -> Self {
        Self::with_program("ffprobe")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FfprobeDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FfprobeDecoder {
    fn open(&self, path: &Path) -> Result<Box<dyn VideoStream>, DecoderError> {
        let output = Command::new(&self.program)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=avg_frame_rate,r_frame_rate,nb_frames:format=duration",
                "-of",
                "json",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DecoderError::ToolNotFound { tool: "ffprobe" }
                } else {
                    DecoderError::Open {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    }
                }
            })?;

        if !output.status.success() {
            return Err(DecoderError::Open {
                path: path.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let cursor = parse_probe(&String::from_utf8_lossy(&output.stdout), path)?;
        tracing::debug!(
            path = %path.display(),
            fps = cursor.fps(),
            frames = cursor.frame_count(),
            "probed video"
        );
        Ok(Box::new(cursor))
    }
}

/// Turn ffprobe JSON into a frame cursor.
fn parse_probe(json: &str, path: &Path) -> Result<FrameCursor, DecoderError> {
    let probe: ProbeOutput = serde_json::from_str(json).map_err(|e| DecoderError::Open {
        path: path.to_path_buf(),
        message: format!("unreadable probe output: {}", e),
    })?;

    let stream = probe
        .streams
        .first()
        .ok_or_else(|| DecoderError::NoVideoStream {
            path: path.to_path_buf(),
        })?;

    let fps = stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_rate)
        .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_rate))
        .unwrap_or(0.0);

    let frame_count = stream
        .nb_frames
        .as_deref()
        .and_then(|n| n.parse::<u64>().ok())
        .or_else(|| {
            let duration = probe
                .format
                .as_ref()
                .and_then(|f| f.duration.as_deref())
                .and_then(|d| d.parse::<f64>().ok())?;
            Some((duration * fps).round() as u64)
        })
        .unwrap_or(0);

    Ok(FrameCursor::new(fps, frame_count))
}

/// Parse an ffprobe rational like `30000/1001`. Zero rates are rejected.
fn parse_rate(rate: &str) -> Option<f64> {
    let value = match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse().ok()?,
    };
    (value > 0.0).then_some(value)
}
