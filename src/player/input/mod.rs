//! Input handling for the terminal player.
//!
//! Translates crossterm events into controller commands and front-end
//! display changes, returning control flow signals to the main loop.

mod keyboard;

pub use keyboard::{handle_key_event, map_key, KeyAction, KeyBindings};

use crossterm::event::Event;

use crate::player::controller::PlaybackController;
use crate::player::state::{InputResult, ViewState};

/// Handle any input event, dispatching to the appropriate handler.
///
/// # Arguments
/// * `event` - The crossterm event to handle
/// * `controller` - The playback controller receiving commands
/// * `view` - Front-end display state (help screen, terminal size)
/// * `bindings` - Seek and speed step sizes bound to keys
///
/// # Returns
/// `InputResult` indicating whether to continue or quit
pub fn handle_event(
    event: Event,
    controller: &mut PlaybackController,
    view: &mut ViewState,
    bindings: &KeyBindings,
) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, controller, view, bindings),
        Event::Resize(cols, rows) => {
            view.handle_resize(cols, rows);
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore mouse, focus and paste events
    }
}
