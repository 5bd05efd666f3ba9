//! In-memory audio tool for tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::error::AudioError;
use super::tool::{AudioBinding, AudioHandle, AudioTool};

#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// Launch at the given start offset
    Launch(f64),
    Stop,
    Pause,
    Resume,
}

/// Shared record of everything the fake tool was asked to do.
#[derive(Debug, Clone, Default)]
pub struct AudioLog {
    events: Arc<Mutex<Vec<AudioEvent>>>,
    bindings: Arc<Mutex<Vec<AudioBinding>>>,
}

impl AudioLog {
    fn push(&self, event: AudioEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<AudioEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn bindings(&self) -> Vec<AudioBinding> {
        self.bindings.lock().unwrap().clone()
    }

    pub fn launches(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, AudioEvent::Launch(_)))
            .count()
    }

    pub fn stops(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| **e == AudioEvent::Stop)
            .count()
    }
}

pub struct FakeAudioTool {
    available: bool,
    fail_signals: bool,
    log: AudioLog,
}

impl FakeAudioTool {
    pub fn available() -> (Self, AudioLog) {
        Self::build(true, false)
    }

    pub fn unavailable() -> (Self, AudioLog) {
        Self::build(false, false)
    }

    pub fn failing_signals() -> (Self, AudioLog) {
        Self::build(true, true)
    }

    fn build(available: bool, fail_signals: bool) -> (Self, AudioLog) {
        let log = AudioLog::default();
        (
            Self {
                available,
                fail_signals,
                log: log.clone(),
            },
            log,
        )
    }
}

impl AudioTool for FakeAudioTool {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn launch(&self, binding: &AudioBinding) -> Result<Box<dyn AudioHandle>, AudioError> {
        self.log.push(AudioEvent::Launch(binding.start_seconds));
        self.log.bindings.lock().unwrap().push(binding.clone());
        Ok(Box::new(FakeHandle {
            fail_signals: self.fail_signals,
            log: self.log.clone(),
        }))
    }
}

struct FakeHandle {
    fail_signals: bool,
    log: AudioLog,
}

impl FakeHandle {
    fn signal(&self, event: AudioEvent) -> Result<(), AudioError> {
        if self.fail_signals {
            return Err(AudioError::Signal {
                pid: 0,
                message: "no such process".to_string(),
            });
        }
        self.log.push(event);
        Ok(())
    }
}

impl AudioHandle for FakeHandle {
    fn pause(&mut self) -> Result<(), AudioError> {
        self.signal(AudioEvent::Pause)
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        self.signal(AudioEvent::Resume)
    }

    fn stop(&mut self, _timeout: Duration) -> Result<(), AudioError> {
        self.signal(AudioEvent::Stop)
    }
}
