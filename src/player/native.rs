//! Terminal front end for the player.
//!
//! Owns the terminal (raw mode, alternate screen), polls input, drives the
//! controller once per iteration and redraws the screen.

use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor, event, execute, queue,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};

use crate::audio::{AudioSync, Ffplay};
use crate::config::Config;
use crate::decoder::FfprobeDecoder;
use crate::files::Playlist;
use crate::player::controller::{PlaybackController, TickOutcome};
use crate::player::input::{handle_event, KeyBindings};
use crate::player::render::{
    fit_width, format_duration, render_help, render_overlay, render_progress_bar,
    render_separator_line, render_status_bar, render_title, StatusBarInfo,
};
use crate::player::state::{InputResult, PlayState, ViewState};
use crate::timestamps::TimestampStore;

/// How long to wait for input before running a tick.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Redraw at least this often even when nothing changed.
const IDLE_REDRAW: Duration = Duration::from_millis(250);

/// How a playback session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackResult {
    /// The user quit
    Quit,
    /// A termination signal arrived
    Interrupted,
}

/// Play the directory containing `path` (or `path` itself if a directory).
///
/// # Arguments
/// * `config` - Effective settings (file plus command-line overrides)
/// * `path` - Video file or directory
///
/// # Returns
/// How the session ended. Discovery errors are returned before the terminal
/// is touched.
#[cfg(not(tarpaulin_include))]
pub fn play_directory(config: &Config, path: &Path) -> Result<PlaybackResult> {
    let playlist = Playlist::discover(path)?;
    play_playlist(config, playlist)
}

/// Play an already discovered playlist.
///
/// Fails without touching the terminal when no file in the playlist opens.
#[cfg(not(tarpaulin_include))]
pub fn play_playlist(config: &Config, playlist: Playlist) -> Result<PlaybackResult> {
    tracing::info!(files = playlist.len(), "starting playback");

    let mut controller = build_controller(config, playlist);
    controller
        .open_initial()
        .context("None of the video files could be opened")?;

    let shutdown = Arc::new(AtomicBool::new(false));
    for signal in [
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
        signal_hook::consts::SIGHUP,
    ] {
        signal_hook::flag::register(signal, Arc::clone(&shutdown))
            .context("Failed to register signal handler")?;
    }

    let (cols, rows) = terminal::size().context("Failed to get terminal size")?;
    let mut view = ViewState::new(cols, rows);
    let bindings = config.key_bindings();

    let result = {
        let _guard = TerminalGuard::enter()?;
        run_loop(&mut controller, &mut view, &bindings, &shutdown)
    };

    controller.shutdown();
    result
}

/// Wire the production decoder and audio tool into a controller.
fn build_controller(config: &Config, playlist: Playlist) -> PlaybackController {
    let timestamps = match config.timestamps_path() {
        Some(path) => TimestampStore::load(&path),
        None => TimestampStore::in_memory(),
    };

    let audio = if config.audio.enabled {
        AudioSync::probe(
            Box::new(Ffplay::with_program(config.audio.command.clone())),
            config.audio_settings(),
        )
    } else {
        tracing::info!("audio disabled");
        AudioSync::disabled()
    };

    PlaybackController::new(
        playlist,
        Box::new(FfprobeDecoder::new()),
        audio,
        timestamps,
        config.controller_settings(),
    )
}

/// Raw mode and alternate screen for the lifetime of the value.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(not(tarpaulin_include))]
fn run_loop(
    controller: &mut PlaybackController,
    view: &mut ViewState,
    bindings: &KeyBindings,
    shutdown: &AtomicBool,
) -> Result<PlaybackResult> {
    let mut stdout = io::stdout();
    let mut last_title = String::new();
    let mut last_render = Instant::now();

    loop {
        if shutdown.load(Ordering::Relaxed) {
            tracing::info!("termination signal received");
            return Ok(PlaybackResult::Interrupted);
        }

        if event::poll(POLL_INTERVAL)? {
            let event = event::read()?;
            if handle_event(event, controller, view, bindings) == InputResult::Quit {
                return Ok(PlaybackResult::Quit);
            }
        }

        let now = Instant::now();
        if controller.tick(now) != TickOutcome::Idle {
            view.needs_render = true;
        }

        let title = controller.title();
        if title != last_title {
            queue!(stdout, SetTitle(&title))?;
            last_title = title;
            view.needs_render = true;
        }

        if now.duration_since(last_render) >= IDLE_REDRAW {
            view.needs_render = true;
        }
        if view.needs_render {
            last_render = now;
        }

        render_screen(&mut stdout, controller, view, now)?;
        stdout.flush()?;
    }
}

/// Draw one frame.
///
/// Static parts are redrawn only when `view.needs_render` is set; the
/// status overlay row is redrawn every call so fades progress smoothly.
pub fn render_screen<W: Write>(
    out: &mut W,
    controller: &mut PlaybackController,
    view: &mut ViewState,
    now: Instant,
) -> Result<()> {
    let (width, height) = (view.term_cols, view.term_rows);

    if view.show_help {
        if view.needs_render {
            render_help(out, width, height)?;
            view.needs_render = false;
        }
        return Ok(());
    }

    let middle = height / 2;

    if view.needs_render {
        queue!(out, Clear(ClearType::All))?;
        render_title(out, width, &controller.title())?;
        render_position(out, width, middle.saturating_sub(1), controller)?;

        if height >= 4 {
            let state = controller.state();
            render_separator_line(out, width, height - 3)?;
            render_progress_bar(
                out,
                width,
                height - 2,
                state.position,
                state.duration,
                controller.seek_pending(),
            )?;
            let info = StatusBarInfo {
                play_state: state.play_state,
                speed: state.speed,
                muted: state.muted,
                audio_available: controller.audio_available(),
                continuous: controller.continuous(),
                index: state.current_index,
                count: controller.playlist().len(),
            };
            render_status_bar(out, width, height - 1, &info)?;
        }
        view.needs_render = false;
    }

    let overlay = controller.status_overlay(now);
    render_overlay(out, width, middle + 1, overlay.as_ref())?;

    Ok(())
}

/// Large centered position readout in place of the picture.
fn render_position<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    controller: &PlaybackController,
) -> Result<()> {
    let state = controller.state();
    let marker = match state.play_state {
        PlayState::Playing => "▶",
        PlayState::Paused => "⏸",
        PlayState::EndOfItem => "■",
    };
    let text = format!(
        "{} {} / {}",
        marker,
        format_duration(state.position),
        format_duration(state.duration)
    );
    let text = fit_width(&text, width as usize);
    let col = (width as usize).saturating_sub(text.chars().count()) / 2;

    write!(out, "\x1b[{};{}H\x1b[97m{}\x1b[0m", row + 1, col + 1, text)?;
    Ok(())
}
