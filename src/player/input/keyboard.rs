//! Keyboard input handling for the terminal player.
//!
//! Maps keys to playback commands: pause, mute, seeking, file navigation,
//! speed and the help screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::controller::PlaybackController;
use crate::player::state::{InputResult, PlayerCommand, ViewState};

/// Step sizes bound to the seek and speed keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBindings {
    /// Seconds for Left/Right
    pub seek_short: f64,
    /// Seconds for Up/Down
    pub seek_long: f64,
    /// Speed change for +/-
    pub speed_step: f64,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            seek_short: 10.0,
            seek_long: 60.0,
            speed_step: 0.1,
        }
    }
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Command(PlayerCommand),
    ToggleHelp,
    Ignore,
}

/// Map a key to an action without touching any state.
pub fn map_key(key: KeyEvent, bindings: &KeyBindings) -> KeyAction {
    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => PlayerCommand::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            PlayerCommand::Quit
        }
        KeyCode::Char('?') => return KeyAction::ToggleHelp,

        KeyCode::Char(' ') => PlayerCommand::TogglePause,
        KeyCode::Char('m') => PlayerCommand::ToggleMute,

        KeyCode::Left => PlayerCommand::Seek(-bindings.seek_short),
        KeyCode::Right => PlayerCommand::Seek(bindings.seek_short),
        KeyCode::Down => PlayerCommand::Seek(-bindings.seek_long),
        KeyCode::Up => PlayerCommand::Seek(bindings.seek_long),
        KeyCode::Home => PlayerCommand::JumpToStart,
        KeyCode::End => PlayerCommand::JumpToEnd,

        KeyCode::Char('j') => PlayerCommand::PrevFile,
        KeyCode::Char('k') | KeyCode::Enter => PlayerCommand::NextFile,

        KeyCode::Char('+') | KeyCode::Char('=') => PlayerCommand::ChangeSpeed(bindings.speed_step),
        KeyCode::Char('-') | KeyCode::Char('_') => {
            PlayerCommand::ChangeSpeed(-bindings.speed_step)
        }

        _ => return KeyAction::Ignore,
    };
    KeyAction::Command(command)
}

/// Handle a keyboard event.
///
/// While the help screen is open any key closes it and nothing else
/// happens.
pub fn handle_key_event(
    key: KeyEvent,
    controller: &mut PlaybackController,
    view: &mut ViewState,
    bindings: &KeyBindings,
) -> InputResult {
    // Key repeat on some terminals reports releases as separate events
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    if view.show_help {
        view.toggle_help();
        return InputResult::Continue;
    }

    match map_key(key, bindings) {
        KeyAction::Command(command) => {
            view.needs_render = true;
            controller.handle(command)
        }
        KeyAction::ToggleHelp => {
            view.toggle_help();
            InputResult::Continue
        }
        KeyAction::Ignore => InputResult::Continue,
    }
}
