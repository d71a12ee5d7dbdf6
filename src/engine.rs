//! Session engine
//!
//! Owns the `GameState` and the injected collaborators (sound, score store,
//! renderer) and drives the session lifecycle:
//!
//! ```text
//! menu -> playing <-> paused
//!         playing -> gameover -> (start) playing
//! any -> (stop) menu
//! ```
//!
//! The frame driver holds a `FrameToken`. Every lifecycle change issues a
//! new generation, so callbacks scheduled before a pause or stop find their
//! token stale, do nothing, and ask for no further frames.

use crate::audio::{SoundCue, SoundSink, Volume};
use crate::highscores::{ScoreStore, SessionSummary};
use crate::render::{RenderSink, Snapshot};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameMode, GameState, Key, KeyOutcome, Status, resolve_key, tick};

/// Permission for one frame driver to advance the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken(u64);

pub struct Engine<S: SoundSink, P: ScoreStore, R: RenderSink> {
    state: GameState,
    settings: Settings,
    sound: S,
    volume: Volume,
    scores: P,
    renderer: R,
    generation: u64,
    /// Summary already handed to the score store for this session
    recorded: bool,
}

impl<S: SoundSink, P: ScoreStore, R: RenderSink> Engine<S, P, R> {
    pub fn new(seed: u64, settings: Settings, mut sound: S, scores: P, renderer: R) -> Self {
        let volume = Volume::from_settings(&settings);
        sound.set_volume(volume);
        Self {
            state: GameState::new(seed),
            settings,
            sound,
            volume,
            scores,
            renderer,
            generation: 0,
            recorded: false,
        }
    }

    /// Reset everything and begin a new session
    pub fn start(&mut self, mode: GameMode, practice_speed: f32) -> FrameToken {
        self.state.start(mode, practice_speed);
        self.recorded = false;
        let token = self.bump();
        log::info!(
            "Session started: {} (crossing {}s)",
            mode,
            self.state.practice_speed
        );
        self.present();
        token
    }

    /// Start with the mode and speed from settings
    pub fn start_from_settings(&mut self) -> FrameToken {
        self.start(self.settings.default_mode, self.settings.practice_speed)
    }

    /// Toggle playing/paused. Returns a fresh token when play resumes.
    pub fn pause(&mut self) -> Option<FrameToken> {
        if !self.state.toggle_pause() {
            return None;
        }
        let token = self.bump();
        self.present();
        if self.state.is_playing() {
            log::info!("Resumed at {:.1}s", self.state.stats.elapsed);
            Some(token)
        } else {
            log::info!("Paused at {:.1}s", self.state.stats.elapsed);
            None
        }
    }

    /// Back to the menu; outstanding frame tokens go stale
    pub fn stop(&mut self) {
        self.state.stop();
        self.bump();
        log::info!("Session stopped");
        self.present();
    }

    /// Advance one frame. Returns whether the driver should schedule another.
    pub fn frame(&mut self, token: FrameToken, dt: f32) -> bool {
        if token.0 != self.generation || !self.state.is_playing() {
            return false;
        }

        let events = tick(&mut self.state, dt);
        if events.contains(&GameEvent::GameOver) {
            self.finish();
        }
        self.present();
        self.state.is_playing()
    }

    /// Feed one key press (`KeyboardEvent.key` form)
    pub fn handle_key(&mut self, key: &str) -> KeyOutcome {
        let mut events = Vec::new();
        let outcome = resolve_key(&mut self.state, &Key::parse(key), &mut events);
        match outcome {
            KeyOutcome::Ignored => return outcome,
            KeyOutcome::TogglePause => {
                // pause() presents on its own
                self.pause();
                return outcome;
            }
            KeyOutcome::Hit { .. } => {
                self.cue(SoundCue::Shoot);
                self.cue(SoundCue::Hit);
            }
            KeyOutcome::Miss => self.cue(SoundCue::Miss),
        }
        self.present();
        outcome
    }

    /// Token for the current generation, if frames are wanted at all
    pub fn token(&self) -> Option<FrameToken> {
        self.state.is_playing().then_some(FrameToken(self.generation))
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings; volume changes reach the sound sink immediately
    pub fn set_settings(&mut self, settings: Settings) {
        self.volume = Volume::from_settings(&settings);
        self.sound.set_volume(self.volume);
        self.settings = settings;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_state(&self.state)
    }

    pub fn scores(&self) -> &P {
        &self.scores
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn cue(&mut self, cue: SoundCue) {
        if self.volume.effective() > 0.0 {
            self.sound.play(cue);
        }
    }

    fn bump(&mut self) -> FrameToken {
        self.generation += 1;
        FrameToken(self.generation)
    }

    fn finish(&mut self) {
        self.bump();
        if self.recorded {
            return;
        }
        self.recorded = true;
        let summary = SessionSummary::from_state(&self.state);
        log::info!(
            "Recording session: {} points earned, max combo {}, {:.1} wpm",
            summary.total_points,
            summary.max_combo,
            summary.wpm
        );
        self.scores.record_session(&summary);
    }

    fn present(&mut self) {
        let snapshot = Snapshot::from_state(&self.state);
        self.renderer.present(&snapshot);
    }
}
