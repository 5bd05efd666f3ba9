//! pp - terminal video playlist player
//!
//! Plays the videos of a directory one after another, remembers where each
//! one was left, and keeps an external ffplay audio process in step with
//! seeking, speed and mute changes.

pub mod audio;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod files;
pub mod logging;
pub mod player;
pub mod timestamps;

pub use cli::Cli;
pub use config::Config;
pub use files::{DiscoveryError, Playlist};
pub use timestamps::TimestampStore;
