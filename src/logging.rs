//! Log file setup.
//!
//! The terminal is owned by the player UI, so log output goes to
//! `pp.log` in the user's state directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `pp=trace`).
pub const LOG_ENV: &str = "PP_LOG";

/// Filter used when `PP_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Directory for the log file: state dir, falling back to the cache dir.
pub fn log_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|dir| dir.join("pp"))
}

/// Build a filter from a directive string, falling back to the default on
/// parse errors.
pub fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to the log file.
///
/// Returns the log file path.
pub fn init() -> Result<PathBuf> {
    let dir = log_dir().context("Could not determine log directory")?;
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join("pp.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = build_filter(std::env::var(LOG_ENV).ok().as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_when_unset() {
        assert_eq!(build_filter(None).to_string(), "info");
    }

    #[test]
    fn custom_filter_is_used() {
        assert_eq!(build_filter(Some("debug")).to_string(), "debug");
    }

    #[test]
    fn invalid_filter_falls_back() {
        assert_eq!(build_filter(Some("pp=notalevel")).to_string(), "info");
    }

    #[test]
    fn log_dir_ends_with_pp() {
        if let Some(dir) = log_dir() {
            assert!(dir.ends_with("pp"));
        }
    }
}
