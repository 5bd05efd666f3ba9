//! Command-line interface definition.
//!
//! Lives in the library so the man page generator can reuse it.

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::config::Config;

/// Version string with git commit and build date.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("PP_BUILD_DATE"),
    ")"
);

/// Version string with build date.
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PP_BUILD_DATE"), ")");

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "pp",
    version = VERSION,
    about = "Play a directory of videos with resume positions and synced audio",
    long_about = "Play every video in a directory (or the directory of the given file).\n\n\
                  Playback positions are remembered per file, and audio is played\n\
                  through ffplay in sync with seeking, speed and mute changes."
)]
pub struct Cli {
    /// Video file or directory to play
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Seconds to seek with Left/Right
    #[arg(long, value_name = "SECS")]
    pub seek_short: Option<f64>,

    /// Seconds to seek with Up/Down
    #[arg(long, value_name = "SECS")]
    pub seek_long: Option<f64>,

    /// Quiet period before a burst of seeks is applied
    #[arg(long, value_name = "SECS")]
    pub seek_throttle: Option<f64>,

    /// Advance to the next video when one finishes
    #[arg(short, long)]
    pub continuous: bool,

    /// Play video without starting an audio process
    #[arg(long)]
    pub no_audio: bool,

    /// Config file to use instead of ~/.config/pp/config.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Resume position file to use instead of ~/.pp_timestamps.json
    #[arg(long, value_name = "FILE")]
    pub timestamps: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Apply command-line overrides on top of file settings.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(v) = self.seek_short {
            config.playback.seek_short = v;
        }
        if let Some(v) = self.seek_long {
            config.playback.seek_long = v;
        }
        if let Some(v) = self.seek_throttle {
            config.playback.seek_throttle = v;
        }
        if self.continuous {
            config.playback.continuous = true;
        }
        if self.no_audio {
            config.audio.enabled = false;
        }
        if let Some(path) = &self.timestamps {
            config.storage.timestamps = Some(path.clone());
        }
        config.validate();
    }
}
