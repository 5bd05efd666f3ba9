//! Status bar rendering for the terminal player.
//!
//! Displays playback state, speed, audio state, playlist position and
//! keyboard shortcuts.

use std::io::Write;

use anyhow::Result;

use crate::player::state::PlayState;

/// Count digits in a number (for width calculation).
///
/// # Arguments
/// * `n` - The number to count digits of
///
/// # Returns
/// The number of digits in the base-10 representation
#[inline]
pub fn count_digits(n: usize) -> usize {
    if n == 0 {
        1
    } else {
        (n as f64).log10().floor() as usize + 1
    }
}

/// Render a separator line.
///
/// # Arguments
/// * `out` - Writer for the terminal
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
pub fn render_separator_line<W: Write>(out: &mut W, width: u16, row: u16) -> Result<()> {
    let mut output = String::with_capacity(width as usize * 3 + 20);
    output.push_str(&format!("\x1b[{};1H\x1b[90m", row + 1)); // Move + dark gray
    for _ in 0..width {
        output.push('─');
    }
    output.push_str("\x1b[0m");
    write!(out, "{}", output)?;
    Ok(())
}

/// Everything the status bar shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusBarInfo {
    pub play_state: PlayState,
    pub speed: f64,
    pub muted: bool,
    pub audio_available: bool,
    pub continuous: bool,
    /// 0-based index of the current file
    pub index: usize,
    pub count: usize,
}

/// Build the status bar content.
///
/// # Returns
/// The ANSI-styled line (without cursor positioning) and its visible width.
pub fn build_status_bar(info: &StatusBarInfo) -> (String, usize) {
    const WHITE: &str = "\x1b[97m";
    const GREEN: &str = "\x1b[32m";
    const DARK_GREY: &str = "\x1b[90m";
    const YELLOW: &str = "\x1b[33m";
    const CYAN: &str = "\x1b[36m";
    const RED: &str = "\x1b[31m";

    let mut output = String::with_capacity(256);
    let mut visible_len: usize = 0; // Track visible width manually

    output.push_str(WHITE);
    output.push(' ');
    visible_len += 1;

    // State icon (▶ and ⏸ are double-width unicode)
    let (state, state_width) = match info.play_state {
        PlayState::Playing => ("⏸  ", 4),
        PlayState::Paused => ("▶  ", 4),
        PlayState::EndOfItem => ("■ ", 2),
    };
    output.push_str(state);
    visible_len += state_width;

    output.push_str(DARK_GREY);
    output.push_str("spd:");
    visible_len += 4;
    output.push_str(WHITE);
    let speed_str = format!("{:.1}x ", info.speed);
    visible_len += speed_str.len();
    output.push_str(&speed_str);

    if !info.audio_available {
        output.push_str(RED);
        output.push_str("[no audio] ");
        visible_len += 11;
    } else if info.muted {
        output.push_str(YELLOW);
        output.push_str("[muted] ");
        visible_len += 8;
    }

    if info.continuous {
        output.push_str(GREEN);
        output.push_str("[C] ");
        visible_len += 4;
    }

    output.push_str(DARK_GREY);
    let position_str = format!("{}/{} ", info.index + 1, info.count);
    visible_len += count_digits(info.index + 1) + 1 + count_digits(info.count) + 1;
    output.push_str(&position_str);

    let play_action = match info.play_state {
        PlayState::Playing => ":pause ",
        _ => ":play ",
    };
    let shortcuts: [(&str, &str); 6] = [
        ("space", play_action),
        ("m", ":mute "),
        ("←→↑↓", ":seek "),
        ("j/k", ":file "),
        ("?", ":hlp "),
        ("q", ":quit"),
    ];

    output.push_str("│ ");
    visible_len += 2;
    for (key, action) in shortcuts {
        output.push_str(CYAN);
        output.push_str(key);
        visible_len += key.chars().count();
        output.push_str(DARK_GREY);
        output.push_str(action);
        visible_len += action.len();
    }

    (output, visible_len)
}

/// Render the status/controls bar.
///
/// # Arguments
/// * `out` - Writer for the terminal
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `info` - Playback details to show
pub fn render_status_bar<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    info: &StatusBarInfo,
) -> Result<()> {
    let (content, visible_len) = build_status_bar(info);

    let mut output = String::with_capacity(content.len() + width as usize + 16);
    output.push_str(&format!("\x1b[{};1H", row + 1));
    output.push_str(&content);

    // Pad to full width to overwrite any leftover content
    let padding = (width as usize).saturating_sub(visible_len);
    for _ in 0..padding {
        output.push(' ');
    }

    output.push_str("\x1b[0m");
    write!(out, "{}", output)?;

    Ok(())
}
