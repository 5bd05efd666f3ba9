//! Audio process errors.

/// Errors controlling the external audio player.
///
/// None of these reach the playback state machine: [`super::AudioSync`]
/// logs them and carries on with video-only playback.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Failed to launch '{tool}': {source}")]
    Launch {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to signal audio process {pid}: {message}")]
    Signal { pid: u32, message: String },

    #[error("Operation not supported on this platform")]
    Unsupported,

    #[error("Audio process I/O error: {0}")]
    Io(#[from] std::io::Error),
}
