//! Frame pacing against wall-clock time.
//!
//! Pure functions: the caller keeps the time of the last advanced frame and
//! passes the current speed on every check, so a speed change applies on the
//! next tick without touching time already elapsed.

use std::time::{Duration, Instant};

/// Interval used when fps (or speed) is unusable.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Shortest interval between two frames.
pub const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// Lag beyond one interval that is dropped instead of caught up.
pub const MAX_FRAME_LAG: Duration = Duration::from_millis(250);

/// Wall time one frame should stay on screen at `fps` and `speed`.
pub fn frame_interval(fps: f64, speed: f64) -> Duration {
    let rate = fps * speed;
    if !(fps > 0.0 && speed > 0.0 && rate.is_finite()) {
        return DEFAULT_FRAME_INTERVAL;
    }
    Duration::from_secs_f64(1.0 / rate).max(MIN_FRAME_INTERVAL)
}

/// Whether enough time has passed since `last_frame` to show the next frame.
pub fn should_advance_frame(last_frame: Instant, now: Instant, fps: f64, speed: f64) -> bool {
    now.saturating_duration_since(last_frame) >= frame_interval(fps, speed)
}

/// Frames due at `now` and the frame clock to carry into the next check.
///
/// The clock advances by whole intervals so a loop that wakes late does not
/// lose the remainder. When playback fell more than [`MAX_FRAME_LAG`] behind
/// the backlog is dropped: one frame is due and the clock restarts at `now`.
pub fn frames_due(last_frame: Instant, now: Instant, fps: f64, speed: f64) -> (u32, Instant) {
    if !should_advance_frame(last_frame, now, fps, speed) {
        return (0, last_frame);
    }

    let interval = frame_interval(fps, speed);
    let behind = now.saturating_duration_since(last_frame);
    if behind > interval + MAX_FRAME_LAG {
        return (1, now);
    }

    let count = (behind.as_nanos() / interval.as_nanos().max(1)) as u32;
    (count, last_frame + interval * count)
}
