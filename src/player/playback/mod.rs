//! Playback timing for the player.
//!
//! This module handles frame pacing and seek throttling.

mod pacing;
mod seeking;

pub use pacing::{frame_interval, frames_due, should_advance_frame, DEFAULT_FRAME_INTERVAL};
pub use seeking::{
    AggregatedSeek, DebounceTimer, SeekAggregator, DEFAULT_THROTTLE, FAST_SEEK_MULTIPLIER,
    FAST_SEEK_THRESHOLD,
};
