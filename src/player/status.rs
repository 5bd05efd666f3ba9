//! Transient status messages.
//!
//! A single slot holding the most recent message. The render loop reads it
//! once per frame; expiry happens lazily on the first read that observes it.

use std::time::{Duration, Instant};

/// Default time a message stays visible.
pub const DEFAULT_STATUS_DURATION: Duration = Duration::from_secs(2);

/// Default length of the fade-out at the end of a message's life.
pub const DEFAULT_FADE_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    start: Instant,
}

/// Visible message with its current opacity in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub text: String,
    pub opacity: f64,
}

/// Single-slot status message with timed expiry and fade.
#[derive(Debug)]
pub struct StatusChannel {
    message: Option<StatusMessage>,
    duration: Duration,
    fade_window: Duration,
}

impl StatusChannel {
    /// Create a channel; a fade window longer than `duration` is clamped.
    pub fn new(duration: Duration, fade_window: Duration) -> Self {
        Self {
            message: None,
            duration,
            fade_window: fade_window.min(duration),
        }
    }

    /// Replace the current message, restarting its timer at `now`.
    pub fn show_at(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        tracing::info!("{}", text);
        self.message = Some(StatusMessage { text, start: now });
    }

    /// Replace the current message, starting now.
    pub fn show(&mut self, text: impl Into<String>) {
        self.show_at(text, Instant::now());
    }

    /// Raw text of the stored message, ignoring expiry.
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    /// The message to draw at `now`, clearing it once expired.
    pub fn current_overlay(&mut self, now: Instant) -> Option<Overlay> {
        let message = self.message.as_ref()?;
        let elapsed = now.saturating_duration_since(message.start);

        if elapsed >= self.duration {
            self.message = None;
            return None;
        }

        let fade_start = self.duration - self.fade_window;
        let opacity = if elapsed < fade_start {
            1.0
        } else {
            let remaining = (self.duration - elapsed).as_secs_f64();
            (remaining / self.fade_window.as_secs_f64()).clamp(0.0, 1.0)
        };

        Some(Overlay {
            text: message.text.clone(),
            opacity,
        })
    }
}

impl Default for StatusChannel {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_DURATION, DEFAULT_FADE_WINDOW)
    }
}
