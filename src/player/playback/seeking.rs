//! Seek throttling.
//!
//! Key repeat produces seek requests faster than restarting the audio player
//! can follow. Requests are collected behind a debounce timer and applied as
//! one consolidated seek once the burst has been quiet for the throttle delay.
//!
//! The timer thread only flips a flag. Applying the seek touches the video
//! cursor, which belongs to the playback loop, so the loop polls
//! [`SeekAggregator::take_ready`] once per iteration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default quiet period before a burst of seeks is applied.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(200);

/// Number of requests in one burst that switches to fast seeking.
pub const FAST_SEEK_THRESHOLD: usize = 3;

/// Multiplier applied to a fast-seek burst.
pub const FAST_SEEK_MULTIPLIER: f64 = 5.0;

/// Owned handle to one pending debounce timer.
///
/// Each timer has its own ready flag. Dropping or replacing the handle
/// cancels the timer, and a timer that fired just before being replaced can
/// only set a flag nobody reads any more.
pub struct DebounceTimer {
    ready: Arc<AtomicBool>,
    cancel_tx: Option<mpsc::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    /// Start a timer that becomes ready after `delay`.
    pub fn start(delay: Duration) -> Self {
        let ready = Arc::new(AtomicBool::new(false));
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let flag = Arc::clone(&ready);

        let spawned = thread::Builder::new()
            .name("seek-debounce".to_string())
            .spawn(move || {
                // A message or a dropped sender both mean cancelled
                if let Err(RecvTimeoutError::Timeout) = cancel_rx.recv_timeout(delay) {
                    flag.store(true, Ordering::Release);
                }
            });

        let thread = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "cannot spawn debounce timer, applying seek immediately");
                ready.store(true, Ordering::Release);
                None
            }
        };

        Self {
            ready,
            cancel_tx: Some(cancel_tx),
            thread,
        }
    }

    /// Whether the delay elapsed without cancellation.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// One consolidated seek produced from a burst of requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedSeek {
    /// Seconds to move, already amplified for fast seeks
    pub total: f64,
    /// Number of requests in the burst
    pub operations: usize,
    /// Whether the burst was amplified
    pub fast: bool,
}

impl AggregatedSeek {
    /// Status text describing the seek.
    pub fn describe(&self) -> String {
        if self.fast {
            format!(
                "Fast seek {}{}s ({}x)",
                if self.total >= 0.0 { "+" } else { "-" },
                format_seconds(self.total.abs()),
                self.operations
            )
        } else if self.total >= 0.0 {
            format!("Seek >> {}s", format_seconds(self.total))
        } else {
            format!("Seek << {}s", format_seconds(-self.total))
        }
    }
}

/// Collects seek deltas and releases them as one [`AggregatedSeek`].
pub struct SeekAggregator {
    delay: Duration,
    pending: Vec<f64>,
    timer: Option<DebounceTimer>,
}

impl SeekAggregator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Vec::new(),
            timer: None,
        }
    }

    /// Queue `delta` seconds and restart the debounce timer.
    pub fn request(&mut self, delta: f64) {
        self.pending.push(delta);
        self.timer = Some(DebounceTimer::start(self.delay));
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Whether the debounce timer has fired.
    pub fn is_ready(&self) -> bool {
        self.timer.as_ref().map(DebounceTimer::is_ready).unwrap_or(false)
    }

    /// Aggregate the pending burst if its timer has fired.
    pub fn take_ready(&mut self) -> Option<AggregatedSeek> {
        if self.is_ready() {
            self.apply_pending()
        } else {
            None
        }
    }

    /// Aggregate and clear the pending burst now, regardless of the timer.
    ///
    /// Returns `None` when nothing is pending.
    pub fn apply_pending(&mut self) -> Option<AggregatedSeek> {
        self.timer = None;
        if self.pending.is_empty() {
            return None;
        }

        let operations = self.pending.len();
        let sum: f64 = self.pending.drain(..).sum();
        let fast = operations >= FAST_SEEK_THRESHOLD;
        let total = if fast {
            sum * FAST_SEEK_MULTIPLIER
        } else {
            sum
        };

        Some(AggregatedSeek {
            total,
            operations,
            fast,
        })
    }

    /// Drop pending requests and the timer.
    pub fn cancel(&mut self) {
        self.timer = None;
        self.pending.clear();
    }
}

/// Seconds without a trailing `.0` for whole values.
fn format_seconds(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{}", seconds as i64)
    } else {
        format!("{:.1}", seconds)
    }
}
