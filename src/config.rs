//! Configuration file handling.
//!
//! Settings live in `~/.config/pp/config.toml`. Every field has a default,
//! so a missing file or a file with only some sections is valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::audio::AudioSettings;
use crate::player::controller::ControllerSettings;
use crate::player::input::KeyBindings;
use crate::timestamps::TimestampStore;

/// Smallest accepted seek step in seconds.
pub const MIN_SEEK_STEP: f64 = 1.0;

/// Upper bound for the throttle and status durations in seconds.
pub const MAX_DELAY_SECONDS: f64 = 60.0;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub audio: AudioConfig,
    pub storage: StorageConfig,
}

/// Seeking, speed and playlist behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Seconds per Left/Right press
    pub seek_short: f64,
    /// Seconds per Up/Down press
    pub seek_long: f64,
    /// Quiet period in seconds before a burst of seeks is applied
    pub seek_throttle: f64,
    /// Move on to the next file when one finishes
    pub continuous: bool,
    /// Seconds a status message stays visible
    pub status_duration: f64,
    /// Speed change per +/- press
    pub speed_step: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seek_short: 10.0,
            seek_long: 60.0,
            seek_throttle: 0.2,
            continuous: false,
            status_duration: 2.0,
            speed_step: 0.1,
        }
    }
}

/// External audio process settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    /// Executable used for audio playback
    pub command: String,
    /// Delay between stopping and relaunching the audio process
    pub settle_ms: u64,
    /// How long to wait for a stopped process to exit
    pub stop_timeout_ms: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "ffplay".to_string(),
            settle_ms: 100,
            stop_timeout_ms: 1000,
        }
    }
}

/// Where persistent state is written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Resume position file; defaults to `~/.pp_timestamps.json`
    pub timestamps: Option<PathBuf>,
}

impl Config {
    /// Default config file location.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("pp").join("config.toml"))
    }

    /// Load from the default location, or defaults if the file is missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, or defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse TOML content and validate it.
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.validate();
        Ok(config)
    }

    /// Clamp values into usable ranges.
    pub fn validate(&mut self) {
        let p = &mut self.playback;
        p.seek_short = sanitize(p.seek_short, 10.0).max(MIN_SEEK_STEP);
        p.seek_long = sanitize(p.seek_long, 60.0).max(MIN_SEEK_STEP);
        p.seek_throttle = sanitize(p.seek_throttle, 0.2).clamp(0.0, MAX_DELAY_SECONDS);
        p.status_duration = sanitize(p.status_duration, 2.0).clamp(0.0, MAX_DELAY_SECONDS);
        p.speed_step = sanitize(p.speed_step, 0.1).max(0.01);
    }

    pub fn key_bindings(&self) -> KeyBindings {
        KeyBindings {
            seek_short: self.playback.seek_short,
            seek_long: self.playback.seek_long,
            speed_step: self.playback.speed_step,
        }
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        let status_duration = Duration::from_secs_f64(self.playback.status_duration);
        ControllerSettings {
            seek_throttle: Duration::from_secs_f64(self.playback.seek_throttle),
            continuous: self.playback.continuous,
            status_duration,
            fade_window: crate::player::status::DEFAULT_FADE_WINDOW.min(status_duration),
        }
    }

    pub fn audio_settings(&self) -> AudioSettings {
        AudioSettings {
            settle: Duration::from_millis(self.audio.settle_ms),
            stop_timeout: Duration::from_millis(self.audio.stop_timeout_ms),
        }
    }

    /// Resume file location: configured path or the default.
    pub fn timestamps_path(&self) -> Option<PathBuf> {
        self.storage
            .timestamps
            .clone()
            .or_else(TimestampStore::default_path)
    }
}

fn sanitize(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
