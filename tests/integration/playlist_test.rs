//! Integration tests for playlist discovery

use pp::files::{display_name, VIDEO_EXTENSIONS};
use pp::{DiscoveryError, Playlist};

use crate::helpers::{path_in, temp_dir_with};

#[test]
fn directory_playlist_is_sorted_and_filtered() {
    let dir = temp_dir_with(&["c.mkv", "a.mp4", "notes.txt", "b.MOV", "d.webm.part"]);

    let playlist = Playlist::discover(dir.path()).unwrap();
    let names: Vec<String> = playlist.files().iter().map(|p| display_name(p)).collect();

    assert_eq!(names, vec!["a.mp4", "b.MOV", "c.mkv"]);
    assert_eq!(playlist.start_index(), 0);
}

#[test]
fn file_argument_selects_starting_entry() {
    let dir = temp_dir_with(&["a.mp4", "b.mp4", "c.mp4"]);

    let playlist = Playlist::discover(&dir.path().join("b.mp4")).unwrap();

    assert_eq!(playlist.len(), 3);
    assert_eq!(playlist.start_index(), 1);
    assert_eq!(playlist.get(1), Some(&path_in(&dir, "b.mp4")));
}

#[test]
fn subdirectories_are_not_scanned() {
    let dir = temp_dir_with(&["top.mp4"]);
    std::fs::create_dir(dir.path().join("nested.mp4")).unwrap();
    std::fs::write(dir.path().join("nested.mp4").join("inner.mp4"), b"").unwrap();

    let playlist = Playlist::discover(dir.path()).unwrap();
    assert_eq!(playlist.len(), 1);
}

#[test]
fn every_known_extension_is_accepted() {
    let names: Vec<String> = VIDEO_EXTENSIONS
        .iter()
        .map(|ext| format!("clip.{}", ext))
        .collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let dir = temp_dir_with(&refs);

    let playlist = Playlist::discover(dir.path()).unwrap();
    assert_eq!(playlist.len(), VIDEO_EXTENSIONS.len());
}

#[test]
fn empty_directory_is_an_error() {
    let dir = temp_dir_with(&[]);
    let err = Playlist::discover(dir.path()).unwrap_err();
    assert!(matches!(err, DiscoveryError::NoVideoFiles { .. }));
}

#[test]
fn wrap_navigation_cycles_both_ways() {
    let dir = temp_dir_with(&["a.mp4", "b.mp4", "c.mp4"]);
    let playlist = Playlist::discover(dir.path()).unwrap();

    assert_eq!(playlist.wrap_next(2), 0);
    assert_eq!(playlist.wrap_prev(0), 2);
    assert_eq!(playlist.wrap_next(0), 1);
}
