//! Integration tests for resume positions and configuration on disk

use std::fs;

use pp::files::file_identity;
use pp::{Config, TimestampStore};
use tempfile::TempDir;

use crate::helpers::{path_in, temp_dir_with};

#[test]
fn positions_survive_a_reload() {
    let videos = temp_dir_with(&["a.mp4", "b.mp4"]);
    let state = TempDir::new().unwrap();
    let store_path = state.path().join("timestamps.json");

    let a = file_identity(&path_in(&videos, "a.mp4"));
    let b = file_identity(&path_in(&videos, "b.mp4"));

    let mut store = TimestampStore::load(&store_path);
    assert!(store.is_empty());
    store.set(a.clone(), 42.5);
    store.set(b.clone(), 0.0);
    store.save();

    let reloaded = TimestampStore::load(&store_path);
    assert_eq!(reloaded.get(&a), Some(42.5));
    assert_eq!(reloaded.get(&b), Some(0.0));
}

#[test]
fn corrupt_store_starts_empty() {
    let state = TempDir::new().unwrap();
    let store_path = state.path().join("timestamps.json");
    fs::write(&store_path, "{ not json").unwrap();

    let store = TimestampStore::load(&store_path);
    assert!(store.is_empty());
}

#[test]
fn unwritable_store_does_not_fail() {
    let state = TempDir::new().unwrap();
    let mut store = TimestampStore::load(&state.path().join("missing-dir").join("ts.json"));
    store.set("/v/a.mp4", 3.0);
    store.save();
    assert_eq!(store.get("/v/a.mp4"), Some(3.0));
}

#[test]
fn identity_is_stable_across_relative_and_absolute_paths() {
    let videos = temp_dir_with(&["a.mp4"]);
    let absolute = path_in(&videos, "a.mp4");
    let dotted = videos.path().join(".").join("a.mp4");

    assert_eq!(file_identity(&absolute), file_identity(&dotted));
}

#[test]
fn config_file_sets_playback_options() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[playback]
seek_short = 5.0
continuous = true

[audio]
command = "/opt/ffmpeg/bin/ffplay"

[storage]
timestamps = "/tmp/pp-test.json"
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.playback.seek_short, 5.0);
    assert!(config.playback.continuous);
    assert_eq!(config.audio.command, "/opt/ffmpeg/bin/ffplay");
    assert_eq!(
        config.timestamps_path(),
        Some(std::path::PathBuf::from("/tmp/pp-test.json"))
    );
}
