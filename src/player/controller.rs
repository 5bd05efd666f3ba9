//! Playback controller.
//!
//! Owns the playback state and orchestrates the decoder stream, the seek
//! aggregator, the audio process and the status channel. Commands arrive
//! through [`PlaybackController::handle`]; the render loop calls
//! [`PlaybackController::tick`] once per iteration.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::audio::AudioSync;
use crate::decoder::{Decoder, DecoderError, VideoStream};
use crate::files::{display_name, file_identity, Playlist};
use crate::player::playback::{frames_due, AggregatedSeek, SeekAggregator};
use crate::player::state::{
    clamp_speed, InputResult, PlayState, PlaybackState, PlayerCommand, SPEED_EPSILON,
};
use crate::player::status::{Overlay, StatusChannel};
use crate::timestamps::TimestampStore;

/// Seconds before the end that "jump to end" lands on.
pub const END_MARGIN_SECONDS: f64 = 5.0;

/// Tunables for the controller.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Debounce delay for seek bursts
    pub seek_throttle: Duration,
    /// Advance to the next file automatically at the end of a file
    pub continuous: bool,
    /// How long status messages stay visible
    pub status_duration: Duration,
    /// Fade-out length at the end of a status message
    pub fade_window: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            seek_throttle: crate::player::playback::DEFAULT_THROTTLE,
            continuous: false,
            status_duration: crate::player::status::DEFAULT_STATUS_DURATION,
            fade_window: crate::player::status::DEFAULT_FADE_WINDOW,
        }
    }
}

/// What a single loop iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed on screen-relevant state
    Idle,
    /// A frame was advanced or a seek applied
    Advanced,
    /// The current file ran out of frames during this tick
    ReachedEnd,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Next,
    Prev,
}

pub struct PlaybackController {
    playlist: Playlist,
    decoder: Box<dyn Decoder>,
    stream: Option<Box<dyn VideoStream>>,
    timestamps: TimestampStore,
    seeks: SeekAggregator,
    audio: AudioSync,
    status: StatusChannel,
    state: PlaybackState,
    continuous: bool,
    last_frame: Instant,
    shut_down: bool,
}

impl PlaybackController {
    pub fn new(
        playlist: Playlist,
        decoder: Box<dyn Decoder>,
        audio: AudioSync,
        timestamps: TimestampStore,
        settings: ControllerSettings,
    ) -> Self {
        let state = PlaybackState::new(playlist.start_index());
        Self {
            playlist,
            decoder,
            stream: None,
            timestamps,
            seeks: SeekAggregator::new(settings.seek_throttle),
            audio,
            status: StatusChannel::new(settings.status_duration, settings.fade_window),
            state,
            continuous: settings.continuous,
            last_frame: Instant::now(),
            shut_down: false,
        }
    }

    /// Open the starting file, skipping files that cannot be opened.
    ///
    /// Fails only when no file in the playlist opens.
    pub fn open_initial(&mut self) -> Result<(), DecoderError> {
        let start = self.playlist.start_index();
        let mut last_error = None;

        for offset in 0..self.playlist.len() {
            let index = (start + offset) % self.playlist.len();
            match self.load(index) {
                Ok(()) => return Ok(()),
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or_else(|| DecoderError::Open {
            path: PathBuf::new(),
            message: "empty playlist".to_string(),
        }))
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn timestamps(&self) -> &TimestampStore {
        &self.timestamps
    }

    pub fn audio_available(&self) -> bool {
        self.audio.is_available()
    }

    pub fn continuous(&self) -> bool {
        self.continuous
    }

    /// Whether seek requests are waiting for the debounce timer.
    pub fn seek_pending(&self) -> bool {
        self.seeks.has_pending()
    }

    pub fn current_name(&self) -> String {
        self.playlist
            .get(self.state.current_index)
            .map(|p| display_name(p))
            .unwrap_or_default()
    }

    /// Terminal/window title: name, index and speed when not 1x.
    pub fn title(&self) -> String {
        let mut title = format!(
            "pp - {} ({}/{})",
            self.current_name(),
            self.state.current_index + 1,
            self.playlist.len()
        );
        if (self.state.speed - 1.0).abs() > f64::EPSILON {
            title.push_str(&format!(" [{:.1}x]", self.state.speed));
        }
        title
    }

    /// Status message to draw at `now`, if any.
    pub fn status_overlay(&mut self, now: Instant) -> Option<Overlay> {
        self.status.current_overlay(now)
    }

    /// Show a transient message.
    pub fn show_status(&mut self, text: impl Into<String>) {
        self.status.show(text);
    }

    /// Apply a user command.
    pub fn handle(&mut self, command: PlayerCommand) -> InputResult {
        match command {
            PlayerCommand::TogglePause => self.toggle_pause(),
            PlayerCommand::ToggleMute => self.toggle_mute(),
            PlayerCommand::Seek(delta) => self.request_seek(delta),
            PlayerCommand::JumpToStart => {
                self.jump_to(0.0, Instant::now());
                self.status.show("Jump to start");
            }
            PlayerCommand::JumpToEnd => {
                let target = (self.state.duration - END_MARGIN_SECONDS).max(0.0);
                self.jump_to(target, Instant::now());
                self.status.show("Jump to end");
            }
            PlayerCommand::NextFile => {
                self.switch_file(Step::Next);
            }
            PlayerCommand::PrevFile => {
                self.switch_file(Step::Prev);
            }
            PlayerCommand::ChangeSpeed(delta) => self.change_speed(delta),
            PlayerCommand::Quit => return InputResult::Quit,
        }
        InputResult::Continue
    }

    /// One loop iteration: apply a ready seek burst, then maybe advance a frame.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let mut outcome = TickOutcome::Idle;

        if let Some(seek) = self.seeks.take_ready() {
            self.apply_seek(seek, now);
            outcome = TickOutcome::Advanced;
        }

        if self.state.play_state != PlayState::Playing {
            return outcome;
        }

        let Some(stream) = self.stream.as_mut() else {
            return outcome;
        };

        let (due, next_frame) = frames_due(self.last_frame, now, stream.fps(), self.state.speed);
        if due == 0 {
            return outcome;
        }
        self.last_frame = next_frame;

        let mut latest = None;
        let mut ended = false;
        for _ in 0..due {
            match stream.read_frame() {
                Some(frame) => latest = Some(frame),
                None => {
                    ended = true;
                    break;
                }
            }
        }

        if let Some(frame) = latest {
            self.state.position = self.state.clamp_position(frame.timestamp_ms / 1000.0);
        }
        if ended {
            self.end_of_item();
            return TickOutcome::ReachedEnd;
        }
        TickOutcome::Advanced
    }

    /// Cancel pending work, stop audio and persist positions.
    ///
    /// Runs at most once; also invoked on drop.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        self.seeks.cancel();
        self.audio.stop();
        self.persist_position();
        self.timestamps.save();
        tracing::info!("player shut down");
    }

    fn toggle_pause(&mut self) {
        match self.state.play_state {
            PlayState::Playing => {
                self.state.play_state = PlayState::Paused;
                self.audio.pause();
                self.status.show("Paused");
            }
            PlayState::Paused => {
                self.state.play_state = PlayState::Playing;
                self.last_frame = Instant::now();
                self.audio.resume();
                self.status.show("Playing");
            }
            PlayState::EndOfItem => {
                self.status.show("End of video - press k for next");
            }
        }
    }

    fn toggle_mute(&mut self) {
        self.state.muted = !self.state.muted;
        self.status
            .show(if self.state.muted { "Muted" } else { "Unmuted" });
        self.resync_audio();
    }

    fn request_seek(&mut self, delta: f64) {
        self.seeks.request(delta);
        // The running audio is about to be at the wrong position
        self.audio.stop();
    }

    fn change_speed(&mut self, delta: f64) {
        let speed = clamp_speed(self.state.speed + delta);
        if (speed - self.state.speed).abs() < SPEED_EPSILON {
            return;
        }
        self.state.speed = speed;
        self.status.show(format!("Speed: {:.1}x", speed));
        self.resync_audio();
    }

    fn apply_seek(&mut self, seek: AggregatedSeek, now: Instant) {
        let target = self.state.position + seek.total;
        self.seek_to(target, now);
        self.status.show(seek.describe());
        tracing::debug!(
            total = seek.total,
            operations = seek.operations,
            position = self.state.position,
            "applied seek"
        );
    }

    /// Absolute jump; supersedes any pending relative seeks.
    fn jump_to(&mut self, target: f64, now: Instant) {
        self.seeks.cancel();
        self.seek_to(target, now);
    }

    fn seek_to(&mut self, target: f64, now: Instant) {
        let target = self.state.clamp_position(target);
        if let Some(stream) = self.stream.as_mut() {
            stream.set_position_ms(target * 1000.0);
        }
        self.state.position = target;
        self.last_frame = now;
        self.restart_audio();
    }

    /// Restart audio after a parameter change unless a seek burst is about
    /// to restart it anyway.
    fn resync_audio(&mut self) {
        if self.seeks.has_pending() {
            return;
        }
        self.restart_audio();
    }

    fn restart_audio(&mut self) {
        let Some(path) = self.playlist.get(self.state.current_index) else {
            return;
        };
        self.audio.start(
            path,
            self.state.position,
            self.state.speed,
            self.state.muted,
        );
        if self.state.play_state != PlayState::Playing {
            self.audio.pause();
        }
    }

    fn end_of_item(&mut self) {
        self.state.play_state = PlayState::EndOfItem;
        self.state.position = self.state.duration;
        tracing::info!(file = %self.current_name(), "reached end of file");

        if self.continuous && self.switch_file(Step::Next) {
            return;
        }
        self.audio.pause();
        self.status.show("End of video - press k for next");
    }

    /// Move to the next or previous file that opens. Returns whether the
    /// current file changed.
    fn switch_file(&mut self, step: Step) -> bool {
        let mut index = self.state.current_index;
        // Skip files that fail to open, never wrapping back onto the current one
        for _ in 1..self.playlist.len().max(2) {
            index = match step {
                Step::Next => self.playlist.wrap_next(index),
                Step::Prev => self.playlist.wrap_prev(index),
            };
            if self.load(index).is_ok() {
                return true;
            }
        }
        false
    }

    /// Open the file at `index` and make it current.
    ///
    /// On failure nothing about the current file changes.
    fn load(&mut self, index: usize) -> Result<(), DecoderError> {
        let Some(path) = self.playlist.get(index).cloned() else {
            return Err(DecoderError::Open {
                path: PathBuf::new(),
                message: format!("index {} out of range", index),
            });
        };

        let mut stream = match self.decoder.open(&path) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(error = %e, "skipping file");
                self.status
                    .show(format!("Cannot open {}", display_name(&path)));
                return Err(e);
            }
        };

        if self.stream.is_some() {
            self.persist_position();
            self.timestamps.save();
        }
        self.audio.stop();
        self.seeks.cancel();

        let duration = stream.duration_seconds();
        let saved = self
            .timestamps
            .get(&file_identity(&path))
            .filter(|&t| t > 0.0)
            .map(|t| t.min(duration));
        if let Some(saved) = saved {
            stream.set_position_ms(saved * 1000.0);
        }

        self.state.current_index = index;
        self.state.duration = duration;
        self.state.position = saved.unwrap_or(0.0);
        if self.state.play_state == PlayState::EndOfItem {
            self.state.play_state = PlayState::Playing;
        }
        self.stream = Some(stream);
        self.last_frame = Instant::now();

        let label = format!(
            "{} ({}/{})",
            display_name(&path),
            index + 1,
            self.playlist.len()
        );
        tracing::info!("Playing: {}", label);
        match saved {
            Some(t) => self.status.show(format!(
                "{} - resumed at {}",
                label,
                crate::player::render::format_duration(t)
            )),
            None => self.status.show(label),
        }

        self.restart_audio();
        Ok(())
    }

    /// Record the current position for the current file.
    ///
    /// A position at the end of the file is stored as 0 so it starts over
    /// next time.
    fn persist_position(&mut self) {
        let Some(path) = self.playlist.get(self.state.current_index) else {
            return;
        };
        if self.stream.is_none() {
            return;
        }
        let position = if self.state.position >= self.state.duration {
            0.0
        } else {
            self.state.position
        };
        self.timestamps.set(file_identity(path), position);
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::{AudioEvent, AudioLog, FakeAudioTool};
    use crate::audio::AudioSettings;
    use crate::decoder::testing::FakeDecoder;
    use std::path::Path;
    use std::thread;

    const A: &str = "/videos/a.mp4";
    const B: &str = "/videos/b.mp4";
    const C: &str = "/videos/c.mp4";

    /// Controller over `files`; each entry is (path, seconds) at 10 fps or
    /// `None` seconds for a file that fails to open.
    fn controller_with(
        files: &[(&str, Option<u64>)],
        audio_available: bool,
        continuous: bool,
    ) -> (PlaybackController, AudioLog) {
        controller_at_fps(files, 10.0, audio_available, continuous)
    }

    fn controller_at_fps(
        files: &[(&str, Option<u64>)],
        fps: f64,
        audio_available: bool,
        continuous: bool,
    ) -> (PlaybackController, AudioLog) {
        let playlist =
            Playlist::from_files(files.iter().map(|(p, _)| PathBuf::from(p)).collect()).unwrap();
        let decoder = files
            .iter()
            .filter_map(|(p, secs)| secs.map(|s| (p, s)))
            .fold(FakeDecoder::new(), |d, (p, s)| {
                d.with_video(*p, fps, (s as f64 * fps) as u64)
            });

        let (tool, log) = if audio_available {
            FakeAudioTool::available()
        } else {
            FakeAudioTool::unavailable()
        };
        let audio = AudioSync::probe(
            Box::new(tool),
            AudioSettings {
                settle: Duration::ZERO,
                stop_timeout: Duration::from_millis(10),
            },
        );
        let settings = ControllerSettings {
            continuous,
            ..ControllerSettings::default()
        };

        let controller = PlaybackController::new(
            playlist,
            Box::new(decoder),
            audio,
            TimestampStore::in_memory(),
            settings,
        );
        (controller, log)
    }

    fn two_files() -> (PlaybackController, AudioLog) {
        let (mut c, log) = controller_with(&[(A, Some(100)), (B, Some(50))], true, false);
        c.open_initial().unwrap();
        (c, log)
    }

    /// Tick until a pending seek burst has been applied.
    ///
    /// Ticks at the last frame time so no frames advance meanwhile.
    fn settle_seeks(c: &mut PlaybackController) {
        let deadline = Instant::now() + Duration::from_secs(3);
        while c.seek_pending() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
            c.tick(c.last_frame);
        }
        assert!(!c.seek_pending(), "seek burst was never applied");
    }

    #[test]
    fn open_initial_loads_first_file() {
        let (c, log) = two_files();
        assert_eq!(c.state().current_index, 0);
        assert_eq!(c.state().duration, 100.0);
        assert_eq!(c.state().position, 0.0);
        assert_eq!(log.events(), vec![AudioEvent::Launch(0.0)]);
    }

    #[test]
    fn open_initial_skips_broken_files() {
        let (mut c, _) = controller_with(&[(A, None), (B, Some(50))], true, false);
        c.open_initial().unwrap();
        assert_eq!(c.state().current_index, 1);
    }

    #[test]
    fn open_initial_fails_when_nothing_opens() {
        let (mut c, _) = controller_with(&[(A, None), (B, None)], true, false);
        assert!(c.open_initial().is_err());
    }

    #[test]
    fn rapid_seeks_aggregate_and_clamp_to_duration() {
        let (mut c, log) = two_files();

        c.handle(PlayerCommand::Seek(10.0));
        c.handle(PlayerCommand::Seek(10.0));
        c.handle(PlayerCommand::Seek(10.0));
        // Nothing applied until the burst settles
        assert_eq!(c.state().position, 0.0);
        assert!(!log.events().contains(&AudioEvent::Launch(100.0)));

        settle_seeks(&mut c);

        // 3 x 10 x 5 = 150, clamped to the 100s duration
        assert_eq!(c.state().position, 100.0);
        assert_eq!(c.status_overlay(Instant::now()).unwrap().text, "Fast seek +150s (3x)");
        assert_eq!(log.launches(), 2);
        assert_eq!(log.events().last(), Some(&AudioEvent::Launch(100.0)));
    }

    #[test]
    fn single_seek_applies_raw_delta() {
        let (mut c, _) = two_files();
        c.handle(PlayerCommand::Seek(60.0));
        settle_seeks(&mut c);
        assert_eq!(c.state().position, 60.0);

        c.handle(PlayerCommand::Seek(-10.0));
        settle_seeks(&mut c);
        assert_eq!(c.state().position, 50.0);
        assert_eq!(c.status_overlay(Instant::now()).unwrap().text, "Seek << 10s");
    }

    #[test]
    fn backward_seek_clamps_at_zero() {
        let (mut c, _) = two_files();
        c.handle(PlayerCommand::Seek(-60.0));
        settle_seeks(&mut c);
        assert_eq!(c.state().position, 0.0);
    }

    #[test]
    fn seek_request_stops_audio_immediately() {
        let (mut c, log) = two_files();
        c.handle(PlayerCommand::Seek(10.0));
        assert_eq!(log.events().last(), Some(&AudioEvent::Stop));
    }

    #[test]
    fn speed_increments_restart_audio_each_time() {
        let (mut c, log) = two_files();

        c.handle(PlayerCommand::ChangeSpeed(0.1));
        assert_eq!(c.status.text(), Some("Speed: 1.1x"));
        c.handle(PlayerCommand::ChangeSpeed(0.1));
        assert_eq!(c.status.text(), Some("Speed: 1.2x"));
        c.handle(PlayerCommand::ChangeSpeed(0.1));
        assert_eq!(c.status.text(), Some("Speed: 1.3x"));

        assert!((c.state().speed - 1.3).abs() < 1e-9);
        // One launch at load plus three restarts
        assert_eq!(log.launches(), 4);
        let last = log.bindings().last().cloned().unwrap();
        assert!((last.speed - 1.3).abs() < 1e-9);
    }

    #[test]
    fn tiny_speed_change_is_ignored() {
        let (mut c, log) = two_files();
        c.status.show("before");
        let before = c.state().speed;

        c.handle(PlayerCommand::ChangeSpeed(0.005));

        assert_eq!(c.state().speed.to_bits(), before.to_bits());
        assert_eq!(c.status.text(), Some("before"));
        assert_eq!(log.launches(), 1);
    }

    #[test]
    fn speed_is_clamped() {
        let (mut c, _) = two_files();
        c.handle(PlayerCommand::ChangeSpeed(5.0));
        assert_eq!(c.state().speed, 3.0);
        c.handle(PlayerCommand::ChangeSpeed(-10.0));
        assert_eq!(c.state().speed, 0.1);
    }

    #[test]
    fn speed_at_limit_is_noop() {
        let (mut c, log) = two_files();
        c.handle(PlayerCommand::ChangeSpeed(2.0));
        let launches = log.launches();
        c.handle(PlayerCommand::ChangeSpeed(0.1));
        assert_eq!(c.state().speed, 3.0);
        assert_eq!(log.launches(), launches);
    }

    #[test]
    fn mute_restarts_audio_with_mute_flag() {
        let (mut c, log) = two_files();
        c.handle(PlayerCommand::ToggleMute);

        assert!(c.state().muted);
        assert_eq!(c.status.text(), Some("Muted"));
        assert!(log.bindings().last().unwrap().muted);
        assert_eq!(log.launches(), 2);
    }

    #[test]
    fn pause_suspends_and_resume_continues_audio() {
        let (mut c, log) = two_files();

        c.handle(PlayerCommand::TogglePause);
        assert_eq!(c.state().play_state, PlayState::Paused);
        c.handle(PlayerCommand::TogglePause);
        assert_eq!(c.state().play_state, PlayState::Playing);

        assert_eq!(
            log.events(),
            vec![
                AudioEvent::Launch(0.0),
                AudioEvent::Pause,
                AudioEvent::Resume
            ]
        );
    }

    #[test]
    fn paused_player_does_not_advance() {
        let (mut c, _) = two_files();
        c.handle(PlayerCommand::TogglePause);
        let later = Instant::now() + Duration::from_secs(1);
        assert_eq!(c.tick(later), TickOutcome::Idle);
        assert_eq!(c.state().position, 0.0);
    }

    #[test]
    fn playing_player_advances_frames() {
        let (mut c, _) = two_files();
        c.handle(PlayerCommand::JumpToStart);
        let later = Instant::now() + Duration::from_secs(1);
        assert_eq!(c.tick(later), TickOutcome::Advanced);
        assert_eq!(c.tick(later + Duration::from_secs(1)), TickOutcome::Advanced);
        assert!((c.state().position - 0.1).abs() < 1e-9);
    }

    #[test]
    fn position_keeps_pace_with_wall_time() {
        let (mut c, _) = controller_at_fps(&[(A, Some(600))], 30.0, true, false);
        c.open_initial().unwrap();

        // The terminal loop wakes every 10ms, which never lines up with 33.3ms frames
        let mut now = c.last_frame;
        for _ in 0..6000 {
            now += Duration::from_millis(10);
            c.tick(now);
        }

        let position = c.state().position;
        assert!((position - 60.0).abs() < 0.1, "position {} after 60s", position);
    }

    #[test]
    fn fast_playback_reads_several_frames_per_tick() {
        let (mut c, _) = controller_at_fps(&[(A, Some(600))], 60.0, true, false);
        c.open_initial().unwrap();
        c.handle(PlayerCommand::ChangeSpeed(2.0));

        let mut now = c.last_frame;
        for _ in 0..1000 {
            now += Duration::from_millis(10);
            c.tick(now);
        }

        // 10s of wall time at 3x
        let position = c.state().position;
        assert!((position - 30.0).abs() < 0.1, "position {} at 3x", position);
    }

    #[test]
    fn next_and_prev_wrap_around() {
        let (mut c, _) = two_files();

        c.handle(PlayerCommand::NextFile);
        assert_eq!(c.state().current_index, 1);
        c.handle(PlayerCommand::NextFile);
        assert_eq!(c.state().current_index, 0);
        c.handle(PlayerCommand::PrevFile);
        assert_eq!(c.state().current_index, 1);
    }

    #[test]
    fn switching_files_saves_and_restores_position() {
        let (mut c, log) = two_files();
        c.handle(PlayerCommand::Seek(42.0));
        settle_seeks(&mut c);

        c.handle(PlayerCommand::NextFile);
        assert_eq!(c.timestamps().get(&file_identity(Path::new(A))), Some(42.0));
        assert_eq!(c.state().position, 0.0);

        c.handle(PlayerCommand::PrevFile);
        assert_eq!(c.state().current_index, 0);
        assert_eq!(c.state().position, 42.0);
        assert_eq!(log.events().last(), Some(&AudioEvent::Launch(42.0)));
    }

    #[test]
    fn broken_file_is_skipped_on_switch() {
        let (mut c, _) = controller_with(&[(A, Some(100)), (B, None), (C, Some(30))], true, false);
        c.open_initial().unwrap();

        c.handle(PlayerCommand::NextFile);
        assert_eq!(c.state().current_index, 2);
        assert_eq!(c.state().duration, 30.0);
    }

    #[test]
    fn switch_with_no_other_playable_file_keeps_state() {
        let (mut c, _) = controller_with(&[(A, Some(100)), (B, None)], true, false);
        c.open_initial().unwrap();
        c.handle(PlayerCommand::Seek(20.0));
        settle_seeks(&mut c);

        c.handle(PlayerCommand::NextFile);
        assert_eq!(c.state().current_index, 0);
        assert_eq!(c.state().position, 20.0);
        assert_eq!(c.status.text(), Some("Cannot open b.mp4"));
    }

    #[test]
    fn end_of_item_waits_without_continuous_mode() {
        let (mut c, log) = controller_with(&[(A, Some(1)), (B, Some(50))], true, false);
        c.open_initial().unwrap();
        c.handle(PlayerCommand::JumpToEnd);

        let mut now = Instant::now();
        let mut outcome = TickOutcome::Idle;
        for _ in 0..50 {
            now += Duration::from_secs(1);
            outcome = c.tick(now);
            if outcome == TickOutcome::ReachedEnd {
                break;
            }
        }

        assert_eq!(outcome, TickOutcome::ReachedEnd);
        assert_eq!(c.state().play_state, PlayState::EndOfItem);
        assert_eq!(c.state().current_index, 0);
        assert_eq!(log.events().last(), Some(&AudioEvent::Pause));

        // No further frames while ended, but commands still work
        assert_eq!(c.tick(now + Duration::from_secs(1)), TickOutcome::Idle);
        c.handle(PlayerCommand::ChangeSpeed(0.5));
        assert_eq!(c.state().play_state, PlayState::EndOfItem);

        c.handle(PlayerCommand::NextFile);
        assert_eq!(c.state().current_index, 1);
        assert_eq!(c.state().play_state, PlayState::Playing);
    }

    #[test]
    fn end_of_item_advances_in_continuous_mode() {
        let (mut c, _) = controller_with(&[(A, Some(1)), (B, Some(50))], true, true);
        c.open_initial().unwrap();

        let mut now = Instant::now();
        for _ in 0..50 {
            now += Duration::from_secs(1);
            if c.tick(now) == TickOutcome::ReachedEnd {
                break;
            }
        }

        assert_eq!(c.state().current_index, 1);
        assert_eq!(c.state().play_state, PlayState::Playing);
        // A finished file starts over next time
        assert_eq!(c.timestamps().get(&file_identity(Path::new(A))), Some(0.0));
    }

    #[test]
    fn continuous_mode_waits_when_no_other_file_opens() {
        let (mut c, log) = controller_with(&[(A, Some(1)), (B, None)], true, true);
        c.open_initial().unwrap();

        let mut now = Instant::now();
        for _ in 0..50 {
            now += Duration::from_secs(1);
            if c.tick(now) == TickOutcome::ReachedEnd {
                break;
            }
        }

        assert_eq!(c.state().current_index, 0);
        assert_eq!(c.state().play_state, PlayState::EndOfItem);
        assert_eq!(log.events().last(), Some(&AudioEvent::Pause));
        assert_eq!(c.status.text(), Some("End of video - press k for next"));
    }

    #[test]
    fn seeking_back_after_the_end_keeps_the_new_position() {
        let (mut c, _) = two_files();
        c.handle(PlayerCommand::JumpToEnd);

        let mut now = Instant::now();
        for _ in 0..100 {
            now += Duration::from_secs(1);
            if c.tick(now) == TickOutcome::ReachedEnd {
                break;
            }
        }
        assert_eq!(c.state().play_state, PlayState::EndOfItem);

        c.handle(PlayerCommand::Seek(-70.0));
        settle_seeks(&mut c);
        assert_eq!(c.state().position, 30.0);

        c.handle(PlayerCommand::NextFile);
        assert_eq!(c.timestamps().get(&file_identity(Path::new(A))), Some(30.0));
    }

    #[test]
    fn jump_to_end_leaves_margin() {
        let (mut c, _) = two_files();
        c.handle(PlayerCommand::JumpToEnd);
        assert_eq!(c.state().position, 95.0);
        c.handle(PlayerCommand::JumpToStart);
        assert_eq!(c.state().position, 0.0);
    }

    #[test]
    fn jump_discards_pending_seeks() {
        let (mut c, _) = two_files();
        c.handle(PlayerCommand::Seek(10.0));
        c.handle(PlayerCommand::JumpToEnd);
        assert!(!c.seek_pending());
        assert_eq!(c.state().position, 95.0);
    }

    #[test]
    fn unavailable_audio_never_touches_processes() {
        let (mut c, log) = controller_with(&[(A, Some(100)), (B, Some(50))], false, false);
        c.open_initial().unwrap();

        c.handle(PlayerCommand::Seek(10.0));
        settle_seeks(&mut c);
        c.handle(PlayerCommand::ChangeSpeed(0.1));
        c.handle(PlayerCommand::ToggleMute);
        c.handle(PlayerCommand::TogglePause);
        c.handle(PlayerCommand::NextFile);
        c.handle(PlayerCommand::PrevFile);
        c.shutdown();

        assert!(!c.audio_available());
        assert!(log.events().is_empty());
        assert_eq!(c.state().position, 10.0);
    }

    #[test]
    fn title_shows_speed_only_when_changed() {
        let (mut c, _) = two_files();
        assert_eq!(c.title(), "pp - a.mp4 (1/2)");
        c.handle(PlayerCommand::ChangeSpeed(0.5));
        assert_eq!(c.title(), "pp - a.mp4 (1/2) [1.5x]");
    }

    #[test]
    fn quit_returns_quit() {
        let (mut c, _) = two_files();
        assert_eq!(c.handle(PlayerCommand::Quit), InputResult::Quit);
        assert_eq!(c.handle(PlayerCommand::ToggleMute), InputResult::Continue);
    }

    #[test]
    fn shutdown_stops_audio_and_records_position() {
        let (mut c, log) = two_files();
        c.handle(PlayerCommand::Seek(30.0));
        settle_seeks(&mut c);
        c.handle(PlayerCommand::Seek(5.0)); // pending, discarded

        c.shutdown();

        assert_eq!(log.events().last(), Some(&AudioEvent::Stop));
        assert_eq!(c.timestamps().get(&file_identity(Path::new(A))), Some(30.0));
        assert!(!c.seek_pending());

        let stops = log.stops();
        c.shutdown();
        assert_eq!(log.stops(), stops);
    }
}
