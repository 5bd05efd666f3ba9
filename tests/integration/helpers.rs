//! Shared helpers for integration tests.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Create a temp directory containing empty files with the given names.
pub fn temp_dir_with(names: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for name in names {
        fs::write(dir.path().join(name), b"").expect("Failed to create file");
    }
    dir
}

/// Canonical path of `name` inside `dir`.
pub fn path_in(dir: &TempDir, name: &str) -> PathBuf {
    dir.path()
        .canonicalize()
        .expect("Failed to canonicalize temp dir")
        .join(name)
}

/// Run the pp binary and capture (stdout, stderr, exit code).
///
/// `HOME` and the XDG directories point into `home` so nothing touches the
/// real user's files.
pub fn run_pp(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_pp"))
        .args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("XDG_STATE_HOME", home.path().join(".local/state"))
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute pp");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}
