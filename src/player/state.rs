//! Player state management
//!
//! Contains the `PlaybackState` data owned by the controller, the explicit
//! play/pause/end state, and the command and control-flow types shared by
//! the input and controller modules.

/// Lowest allowed playback speed.
pub const MIN_SPEED: f64 = 0.1;
/// Highest allowed playback speed.
pub const MAX_SPEED: f64 = 3.0;
/// Speed changes smaller than this are ignored.
pub const SPEED_EPSILON: f64 = 0.01;

/// Result of processing an input event.
///
/// Returned by input handlers to signal control flow decisions to the main
/// loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the player normally
    Quit,
}

/// Where playback of the current file stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Frames advance with wall time
    Playing,
    /// Frames are held, audio is suspended
    Paused,
    /// The current file ran out of frames; only a file switch leaves this
    EndOfItem,
}

/// A user command understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    TogglePause,
    ToggleMute,
    /// Relative seek in seconds, throttled
    Seek(f64),
    JumpToStart,
    JumpToEnd,
    NextFile,
    PrevFile,
    /// Relative speed change
    ChangeSpeed(f64),
    Quit,
}

/// Playback data owned by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Index of the current file in the playlist
    pub current_index: usize,
    /// Current position in seconds, within `0..=duration`
    pub position: f64,
    /// Length of the current file in seconds
    pub duration: f64,
    /// Playback speed multiplier (1.0 = normal)
    pub speed: f64,
    /// Whether audio output is silenced
    pub muted: bool,
    pub play_state: PlayState,
}

impl PlaybackState {
    pub fn new(current_index: usize) -> Self {
        Self {
            current_index,
            position: 0.0,
            duration: 0.0,
            speed: 1.0,
            muted: false,
            play_state: PlayState::Playing,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.play_state == PlayState::Playing
    }

    /// Clamp `seconds` into the current file's range.
    pub fn clamp_position(&self, seconds: f64) -> f64 {
        seconds.clamp(0.0, self.duration.max(0.0))
    }
}

/// Display state owned by the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub show_help: bool,
    pub needs_render: bool,
    pub term_cols: u16,
    pub term_rows: u16,
}

impl ViewState {
    pub fn new(term_cols: u16, term_rows: u16) -> Self {
        Self {
            show_help: false,
            needs_render: true,
            term_cols,
            term_rows,
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.needs_render = true;
    }

    pub fn handle_resize(&mut self, cols: u16, rows: u16) {
        self.term_cols = cols;
        self.term_rows = rows;
        self.needs_render = true;
    }
}

/// Clamp a requested speed into the supported range.
pub fn clamp_speed(speed: f64) -> f64 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}
