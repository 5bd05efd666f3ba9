//! Integration tests for pp.

mod cli_test;
mod helpers;
mod playlist_test;
mod resume_test;
