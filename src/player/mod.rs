//! Video playlist player.
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `state`: playback data, play/pause/end state and the command set
//! - `status`: transient status messages with timed fade-out
//! - `playback/`: frame pacing and seek aggregation
//! - `controller`: owns playback state and coordinates decoder, audio and seeks
//! - `input/`: keyboard handling for the terminal front end
//! - `render/`: title, progress bar, status bar, overlay and help screen
//! - `native`: the terminal loop tying everything together
//!
//! # Usage
//!
//! ```no_run
//! use pp::config::Config;
//! use pp::player::{play_directory, PlaybackResult};
//! use std::path::Path;
//!
//! let config = Config::default();
//! match play_directory(&config, Path::new("videos")).unwrap() {
//!     PlaybackResult::Quit => println!("Bye"),
//!     PlaybackResult::Interrupted => eprintln!("Stopped by signal"),
//! }
//! ```

pub mod controller;
pub mod input;
mod native;
pub mod playback;
pub mod render;
pub mod state;
pub mod status;

pub use controller::{ControllerSettings, PlaybackController, TickOutcome};
pub use native::{play_directory, play_playlist, render_screen, PlaybackResult};
pub use state::{InputResult, PlayState, PlaybackState, PlayerCommand, ViewState};
pub use status::{Overlay, StatusChannel};
