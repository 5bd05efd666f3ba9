//! AudioTool and AudioHandle traits.

use std::path::PathBuf;
use std::time::Duration;

use super::error::AudioError;

/// Parameters an audio process was launched with.
///
/// Any change to one of these requires a restart; running processes are
/// never updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBinding {
    /// File the audio is read from
    pub file: PathBuf,
    /// Offset in seconds the process starts at
    pub start_seconds: f64,
    /// Tempo multiplier (1.0 = normal)
    pub speed: f64,
    /// Whether the volume filter silences output
    pub muted: bool,
}

/// An external program that can play the audio track of a file.
pub trait AudioTool: Send {
    /// Tool name for display/logging.
    fn name(&self) -> &'static str;

    /// Probe whether the tool can be run at all.
    ///
    /// Called once per session; the result is cached by the caller.
    fn is_available(&self) -> bool;

    /// Launch a process for `binding`.
    fn launch(&self, binding: &AudioBinding) -> Result<Box<dyn AudioHandle>, AudioError>;
}

/// A running audio process.
pub trait AudioHandle: Send {
    /// Suspend output without losing the playback position.
    fn pause(&mut self) -> Result<(), AudioError>;

    /// Continue after [`AudioHandle::pause`].
    fn resume(&mut self) -> Result<(), AudioError>;

    /// Terminate the process, waiting at most `timeout` for it to exit.
    ///
    /// A process that is already gone, or one that outlives the timeout,
    /// counts as stopped.
    fn stop(&mut self, timeout: Duration) -> Result<(), AudioError>;
}
