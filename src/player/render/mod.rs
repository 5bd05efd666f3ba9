//! Rendering components for the terminal player.
//!
//! This module contains the UI rendering functions for the player: title
//! line, progress bar, status bar, fading status overlay and help screen.

mod help;
mod overlay;
mod progress;
mod status;

pub use help::{help_lines, render_help};
pub use overlay::{fit_width, opacity_to_grey, render_overlay, render_title};
pub use progress::{build_progress_bar_chars, format_duration, render_progress_bar};
pub use status::{
    build_status_bar, count_digits, render_separator_line, render_status_bar, StatusBarInfo,
};
