//! Progress bar rendering for the terminal player.
//!
//! Displays the playback position within the current file.

use std::io::Write;

use anyhow::Result;

/// Format a duration in seconds to MM:SS format.
///
/// # Arguments
/// * `seconds` - Duration in seconds
///
/// # Returns
/// A string in MM:SS format
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Build the progress bar character array.
///
/// # Arguments
/// * `bar_width` - Width of the bar in characters
/// * `position` - Current playback position in seconds
/// * `duration` - Length of the current file in seconds
///
/// # Returns
/// A tuple of (bar_chars, filled_count) where bar_chars contains the visual
/// representation and filled_count is the number of filled positions.
pub fn build_progress_bar_chars(bar_width: usize, position: f64, duration: f64) -> (Vec<char>, usize) {
    let progress = if duration > 0.0 {
        (position / duration).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec!['─'; bar_width];
    if filled < bar_width {
        bar[filled] = '⏺';
    }

    (bar, filled)
}

/// Render the progress bar.
///
/// # Arguments
/// * `out` - Writer for the terminal
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `position` - Current playback position in seconds
/// * `duration` - Length of the current file in seconds
/// * `seek_pending` - Whether a seek burst is waiting to be applied
pub fn render_progress_bar<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    position: f64,
    duration: f64,
    seek_pending: bool,
) -> Result<()> {
    let bar_width = (width as usize).saturating_sub(16); // Padding, time display and seek mark
    let (bar, filled) = build_progress_bar_chars(bar_width, position, duration);

    let time_display = format!(
        " {}/{}{}",
        format_duration(position),
        format_duration(duration),
        if seek_pending { " »" } else { "  " }
    );

    const GREEN: &str = "\x1b[32m";
    const WHITE: &str = "\x1b[97m";
    const DARK_GREY: &str = "\x1b[90m";
    const GREY: &str = "\x1b[37m";

    let mut output = String::with_capacity(width as usize * 4);
    output.push_str(&format!("\x1b[{};1H", row + 1));
    output.push_str("\x1b[48;5;236m "); // Dark gray background + padding

    output.push_str(GREEN);
    for (i, &c) in bar.iter().enumerate() {
        if i < filled {
            output.push('━');
        } else if i == filled {
            output.push_str(WHITE);
            output.push(c);
        } else {
            output.push_str(DARK_GREY);
            output.push(c);
        }
    }

    output.push_str(GREY);
    output.push_str(&time_display);

    let used_width = 1 + bar_width + time_display.chars().count();
    let remaining = (width as usize).saturating_sub(used_width);
    for _ in 0..remaining {
        output.push(' ');
    }

    output.push_str("\x1b[0m");
    write!(out, "{}", output)?;

    Ok(())
}
