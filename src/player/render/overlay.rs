//! Title line and fading status overlay.

use std::io::Write;

use anyhow::Result;
use unicode_width::UnicodeWidthChar;

use crate::player::status::Overlay;

/// Truncate `text` to at most `width` terminal columns.
///
/// Adds an ellipsis when something was cut.
pub fn fit_width(text: &str, width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Map an opacity in `0.0..=1.0` to a 256-color grayscale index.
///
/// Fully opaque is bright white (255); fully faded is near black (232).
pub fn opacity_to_grey(opacity: f64) -> u8 {
    let opacity = if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    232 + (opacity * 23.0).round() as u8
}

/// Render the title line.
///
/// # Arguments
/// * `out` - Writer for the terminal
/// * `width` - Terminal width
/// * `title` - Title text (file name, playlist position, speed)
pub fn render_title<W: Write>(out: &mut W, width: u16, title: &str) -> Result<()> {
    let text = fit_width(title, (width as usize).saturating_sub(2));
    let text_width: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();

    let mut output = String::with_capacity(width as usize + 32);
    output.push_str("\x1b[1;1H\x1b[1;97m "); // Home + bold white
    output.push_str(&text);
    for _ in 0..(width as usize).saturating_sub(text_width + 1) {
        output.push(' ');
    }
    output.push_str("\x1b[0m");
    write!(out, "{}", output)?;
    Ok(())
}

/// Render the status overlay centered on `row`.
///
/// Passing `None` clears the row.
///
/// # Arguments
/// * `out` - Writer for the terminal
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `overlay` - The message and its opacity, if one is visible
pub fn render_overlay<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    overlay: Option<&Overlay>,
) -> Result<()> {
    let mut output = String::with_capacity(width as usize + 32);
    output.push_str(&format!("\x1b[{};1H\x1b[2K", row + 1)); // Move + clear line

    if let Some(overlay) = overlay {
        let text = fit_width(&overlay.text, width as usize);
        let text_width: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
        let col = (width as usize).saturating_sub(text_width) / 2;

        output.push_str(&format!(
            "\x1b[{};{}H\x1b[1;38;5;{}m{}\x1b[0m",
            row + 1,
            col + 1,
            opacity_to_grey(overlay.opacity),
            text
        ));
    }

    write!(out, "{}", output)?;
    Ok(())
}
