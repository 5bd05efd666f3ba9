//! Integration tests for the pp command line

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{run_pp, temp_dir_with};

fn pp(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pp").expect("pp binary");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("XDG_STATE_HOME", home.path().join(".local/state"));
    cmd
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn help_exits_0_and_lists_options() {
    let home = TempDir::new().unwrap();
    pp(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: pp"))
        .stdout(predicate::str::contains("--seek-short"))
        .stdout(predicate::str::contains("--continuous"))
        .stdout(predicate::str::contains("--no-audio"));
}

#[test]
fn version_includes_package_version() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_pp(&home, &["--version"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with(concat!("pp ", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn completions_are_printed_for_bash() {
    let home = TempDir::new().unwrap();
    pp(&home)
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_pp()"));
}

#[test]
fn unknown_shell_is_rejected() {
    let home = TempDir::new().unwrap();
    pp(&home).args(["--completions", "tcsh"]).assert().failure();
}

// ============================================================================
// Fatal startup errors
// ============================================================================

#[test]
fn missing_path_exits_1() {
    let home = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_pp(&home, &["/definitely/not/here.mp4"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("does not exist"), "stderr: {}", stderr);
}

#[test]
fn directory_without_videos_exits_1() {
    let home = TempDir::new().unwrap();
    let dir = temp_dir_with(&["notes.txt", "cover.jpg"]);

    pp(&home)
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No video files found"));
}

#[test]
fn non_terminal_output_is_refused_after_discovery() {
    let home = TempDir::new().unwrap();
    let dir = temp_dir_with(&["a.mp4"]);

    pp(&home)
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("interactive terminal"));
}

#[test]
fn invalid_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    let dir = temp_dir_with(&["a.mp4"]);
    let config = home.path().join("bad.toml");
    std::fs::write(&config, "[playback\n").unwrap();

    pp(&home)
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn invalid_number_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    pp(&home)
        .args(["--seek-short", "fast"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}
