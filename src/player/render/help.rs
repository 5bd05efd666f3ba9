//! Help screen listing the player's keys.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

const TITLE: &str = "pp Player Help";
const FOOTER: &str = "Press any key to close";

/// Key groups shown on the help screen, in display order.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Playback",
        &[
            ("Space", "Pause / Resume"),
            ("m", "Mute / Unmute"),
            ("+/-", "Speed up / down"),
        ],
    ),
    (
        "Seeking",
        &[
            ("<-/->", "Seek short step"),
            ("Up/Down", "Seek long step"),
            ("Home/End", "Go to start / near end"),
            ("", "(3+ quick presses seek 5x)"),
        ],
    ),
    (
        "Playlist",
        &[("j", "Previous file"), ("k/Enter", "Next file")],
    ),
    ("General", &[("?", "Show this help"), ("q/Esc", "Quit player")]),
];

/// Columns between the box borders.
const INNER_WIDTH: usize = 40;
const KEY_COLUMN: usize = 11;

fn framed(content: &str) -> String {
    format!("║{:<width$}║", content, width = INNER_WIDTH)
}

fn centered(content: &str) -> String {
    format!("║{:^width$}║", content, width = INNER_WIDTH)
}

/// The help box, one string per row, every row the same width.
pub fn help_lines() -> Vec<String> {
    let rule = "═".repeat(INNER_WIDTH);
    let mut lines = vec![
        format!("╔{}╗", rule),
        centered(TITLE),
        format!("╠{}╣", rule),
    ];

    for (heading, keys) in SECTIONS {
        lines.push(framed(""));
        lines.push(framed(&format!(" {}", heading)));
        for (key, action) in *keys {
            lines.push(framed(&format!(
                "   {:<width$}{}",
                key,
                action,
                width = KEY_COLUMN
            )));
        }
    }

    lines.push(framed(""));
    lines.push(centered(FOOTER));
    lines.push(format!("╚{}╝", rule));
    lines
}

/// Clear the screen and draw the help box centered in `width` x `height`.
pub fn render_help<W: Write>(out: &mut W, width: u16, height: u16) -> Result<()> {
    let lines = help_lines();
    let box_width = (INNER_WIDTH + 2) as u16;
    let col = width.saturating_sub(box_width) / 2;
    let top = height.saturating_sub(lines.len() as u16) / 2;

    queue!(out, Clear(ClearType::All), SetForegroundColor(Color::Green))?;
    for (i, line) in lines.iter().enumerate() {
        queue!(out, MoveTo(col, top + i as u16), Print(line))?;
    }
    queue!(out, ResetColor)?;

    Ok(())
}
