//! Audio playback through an external process.
//!
//! Video and audio are decoded independently: the controller owns the video
//! cursor and keeps a separate audio player (ffplay) aligned by restarting it
//! whenever position, speed, mute state or file change.
//!
//! - `tool`: the [`AudioTool`] / [`AudioHandle`] seam
//! - `ffplay`: the production tool
//! - `sync`: [`AudioSync`], the single-process owner

mod error;
mod ffplay;
mod sync;
#[cfg(test)]
pub(crate) mod testing;
mod tool;

pub use error::AudioError;
pub use ffplay::{audio_filters, format_speed, Ffplay, ProcessHandle};
pub use sync::{AudioSettings, AudioSync};
pub use tool::{AudioBinding, AudioHandle, AudioTool};
