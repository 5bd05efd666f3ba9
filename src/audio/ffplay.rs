//! ffplay audio tool.
//!
//! Runs `ffplay` without a window for the audio track only. The child gets
//! its own process group so signals reach anything it forks.

use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::error::AudioError;
use super::tool::{AudioBinding, AudioHandle, AudioTool};

/// Poll interval while waiting for a killed process to exit.
const REAP_POLL: Duration = Duration::from_millis(10);

/// Audio playback through ffplay.
#[derive(Debug, Clone)]
pub struct Ffplay {
    program: String,
}

impl Ffplay {
    pub fn new() -> Self {
        Self::with_program("ffplay")
    }

    /// Use a different executable (path or name on `$PATH`).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments passed to ffplay for `binding`, file path last.
    pub fn args(binding: &AudioBinding) -> Vec<String> {
        let mut args: Vec<String> = ["-nodisp", "-autoexit", "-loglevel", "quiet"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        if binding.start_seconds > 0.0 {
            args.push("-ss".to_string());
            args.push(format!("{:.3}", binding.start_seconds));
        }

        if let Some(filters) = audio_filters(binding.speed, binding.muted) {
            args.push("-af".to_string());
            args.push(filters);
        }

        args.push(binding.file.to_string_lossy().into_owned());
        args
    }
}

impl Default for Ffplay {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioTool for Ffplay {
    fn name(&self) -> &'static str {
        "ffplay"
    }

    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn launch(&self, binding: &AudioBinding) -> Result<Box<dyn AudioHandle>, AudioError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(Self::args(binding))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let child = cmd.spawn().map_err(|source| AudioError::Launch {
            tool: "ffplay",
            source,
        })?;
        tracing::debug!(pid = child.id(), start = binding.start_seconds, "launched ffplay");

        Ok(Box::new(ProcessHandle::new(child)))
    }
}

/// Combined `-af` filter string, or `None` when no filter is needed.
pub fn audio_filters(speed: f64, muted: bool) -> Option<String> {
    let mut filters = Vec::new();
    if muted {
        filters.push("volume=0".to_string());
    }
    if (speed - 1.0).abs() > f64::EPSILON {
        filters.push(format!("atempo={}", format_speed(speed)));
    }
    if filters.is_empty() {
        None
    } else {
        Some(filters.join(","))
    }
}

/// Speed with at most two decimals and no trailing zeros (`1.5`, `2`, `0.25`).
pub fn format_speed(speed: f64) -> String {
    let s = format!("{:.2}", speed);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// A spawned child process, led by its own process group on Unix.
pub struct ProcessHandle {
    child: Child,
    finished: bool,
}

impl ProcessHandle {
    pub fn new(child: Child) -> Self {
        Self {
            child,
            finished: false,
        }
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Send `signal` to the whole process group.
    #[cfg(unix)]
    fn signal_group(&self, signal: libc::c_int) -> Result<(), AudioError> {
        let pgid = self.child.id() as libc::pid_t;
        // SAFETY: killpg has no memory-safety preconditions.
        let rc = unsafe { libc::killpg(pgid, signal) };
        if rc == 0 {
            Ok(())
        } else {
            Err(AudioError::Signal {
                pid: self.child.id(),
                message: std::io::Error::last_os_error().to_string(),
            })
        }
    }

    fn has_exited(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }

    fn wait_bounded(&mut self, timeout: Duration) -> Result<(), AudioError> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.child.try_wait()? {
                Some(_) => return Ok(()),
                None if Instant::now() >= deadline => {
                    tracing::warn!(pid = self.pid(), "audio process did not exit in time, giving up");
                    return Ok(());
                }
                None => thread::sleep(REAP_POLL),
            }
        }
    }
}

impl AudioHandle for ProcessHandle {
    #[cfg(unix)]
    fn pause(&mut self) -> Result<(), AudioError> {
        self.signal_group(libc::SIGSTOP)
    }

    #[cfg(not(unix))]
    fn pause(&mut self) -> Result<(), AudioError> {
        Err(AudioError::Unsupported)
    }

    #[cfg(unix)]
    fn resume(&mut self) -> Result<(), AudioError> {
        self.signal_group(libc::SIGCONT)
    }

    #[cfg(not(unix))]
    fn resume(&mut self) -> Result<(), AudioError> {
        Err(AudioError::Unsupported)
    }

    fn stop(&mut self, timeout: Duration) -> Result<(), AudioError> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        if self.has_exited() {
            return Ok(());
        }

        #[cfg(unix)]
        let group_killed = self.signal_group(libc::SIGKILL).is_ok();
        #[cfg(not(unix))]
        let group_killed = false;

        if !group_killed {
            if let Err(e) = self.child.kill() {
                // Already exited between the check and the kill
                if e.kind() != std::io::ErrorKind::InvalidInput {
                    return Err(e.into());
                }
            }
        }

        self.wait_bounded(timeout)
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stop(Duration::from_millis(200)) {
            tracing::debug!(error = %e, "audio process cleanup failed");
        }
    }
}
