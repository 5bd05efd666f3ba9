//! AudioSync: one external audio process bound to the current position.

use std::path::Path;
use std::thread;
use std::time::Duration;

use super::tool::{AudioBinding, AudioHandle, AudioTool};

/// Timing knobs for process restarts.
#[derive(Debug, Clone, Copy)]
pub struct AudioSettings {
    /// Pause between stopping the old process and launching the new one
    pub settle: Duration,
    /// Upper bound on waiting for a killed process to exit
    pub stop_timeout: Duration,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(100),
            stop_timeout: Duration::from_secs(1),
        }
    }
}

struct Running {
    handle: Box<dyn AudioHandle>,
    binding: AudioBinding,
    paused: bool,
}

/// Keeps at most one audio process alive, matching (file, position, speed, muted).
///
/// Resynchronization is always stop-then-start. When the tool was not found
/// at startup every operation is a no-op. Dropping the value stops the
/// process.
pub struct AudioSync {
    tool: Option<Box<dyn AudioTool>>,
    running: Option<Running>,
    settings: AudioSettings,
}

impl AudioSync {
    /// Probe `tool` once and keep it only if it can run.
    pub fn probe(tool: Box<dyn AudioTool>, settings: AudioSettings) -> Self {
        let tool = if tool.is_available() {
            tracing::info!(tool = tool.name(), "audio enabled");
            Some(tool)
        } else {
            tracing::warn!(
                tool = tool.name(),
                "audio tool not found, playing video without sound"
            );
            None
        };

        Self {
            tool,
            running: None,
            settings,
        }
    }

    /// Audio switched off for the whole session.
    pub fn disabled() -> Self {
        Self {
            tool: None,
            running: None,
            settings: AudioSettings::default(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.tool.is_some()
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.running.as_ref().map(|r| r.paused).unwrap_or(false)
    }

    /// Parameters of the live process, if any.
    #[cfg(test)]
    pub fn binding(&self) -> Option<&AudioBinding> {
        self.running.as_ref().map(|r| &r.binding)
    }

    /// Replace any running process with one starting at `position` seconds.
    pub fn start(&mut self, file: &Path, position: f64, speed: f64, muted: bool) {
        let Some(tool) = self.tool.as_ref() else {
            return;
        };

        stop_running(&mut self.running, self.settings.stop_timeout);
        if !self.settings.settle.is_zero() {
            thread::sleep(self.settings.settle);
        }

        let binding = AudioBinding {
            file: file.to_path_buf(),
            start_seconds: position.max(0.0),
            speed,
            muted,
        };

        match tool.launch(&binding) {
            Ok(handle) => {
                self.running = Some(Running {
                    handle,
                    binding,
                    paused: false,
                });
            }
            Err(e) => tracing::warn!(error = %e, "audio launch failed"),
        }
    }

    /// Kill the running process, if any.
    pub fn stop(&mut self) {
        if self.tool.is_none() {
            return;
        }
        stop_running(&mut self.running, self.settings.stop_timeout);
    }

    /// Suspend the running process without killing it.
    pub fn pause(&mut self) {
        if let Some(running) = self.running.as_mut() {
            if running.paused {
                return;
            }
            match running.handle.pause() {
                Ok(()) => running.paused = true,
                Err(e) => tracing::warn!(error = %e, "audio pause failed"),
            }
        }
    }

    /// Continue a process suspended by [`AudioSync::pause`].
    pub fn resume(&mut self) {
        if let Some(running) = self.running.as_mut() {
            if !running.paused {
                return;
            }
            match running.handle.resume() {
                Ok(()) => running.paused = false,
                Err(e) => tracing::warn!(error = %e, "audio resume failed"),
            }
        }
    }
}

impl Drop for AudioSync {
    fn drop(&mut self) {
        stop_running(&mut self.running, self.settings.stop_timeout);
    }
}

fn stop_running(running: &mut Option<Running>, timeout: Duration) {
    if let Some(mut running) = running.take() {
        if let Err(e) = running.handle.stop(timeout) {
            tracing::warn!(error = %e, "audio stop failed");
        }
    }
}
