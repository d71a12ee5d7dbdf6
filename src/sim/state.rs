//! Session state and core simulation types
//!
//! `GameState` is the single source of truth: the tick and the input
//! resolver mutate it, collaborators only ever see snapshots of it.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::combat_log::{CombatLog, LogKind};
use super::spawn::SpawnScheduler;
use super::target::Target;
use crate::consts::*;
use crate::error::Error;

/// Difficulty model for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Difficulty scales with score
    #[default]
    Survival,
    /// Fixed crossing time chosen by the player
    Practice,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Survival => "survival",
            GameMode::Practice => "practice",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "survival" => Ok(GameMode::Survival),
            "practice" => Ok(GameMode::Practice),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Play field in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT)
    }
}

impl Field {
    /// At least one pixel on each axis so walk speeds stay positive
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: if width.is_finite() { width.max(1.0) } else { DEFAULT_FIELD_WIDTH },
            height: if height.is_finite() { height.max(1.0) } else { DEFAULT_FIELD_HEIGHT },
        }
    }

    /// Spawn column, just past the right edge
    pub fn spawn_x(&self) -> f32 {
        self.width + SPAWN_OFFSET_X
    }

    /// Spawn row for a uniform sample `t` in 0..1
    pub fn spawn_y(&self, t: f32) -> f32 {
        let span = self.height - 2.0 * SPAWN_MARGIN_Y;
        if span > 0.0 {
            SPAWN_MARGIN_Y + t * span
        } else {
            self.height / 2.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Hit,
    Miss,
}

/// Short flash telling the player what their last key did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFeedback {
    pub kind: FeedbackKind,
    /// Normalized label of the key that was pressed
    pub key: String,
    pub timer: f32,
}

/// Running numbers for the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Current score; also the player's health (run ends at <= 0)
    pub score: i64,
    /// Highest score reached this session
    pub peak_score: i64,
    /// Sum of every kill award, never reduced by penalties
    pub total_points: i64,
    /// Seconds of play (paused time excluded)
    pub elapsed: f32,
    pub combo: u32,
    pub max_combo: u32,
    pub kills: u32,
    pub misses: u32,
    pub breaches: u32,
    pub wpm: f32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            score: START_SCORE,
            peak_score: START_SCORE,
            total_points: 0,
            elapsed: 0.0,
            combo: 0,
            max_combo: 0,
            kills: 0,
            misses: 0,
            breaches: 0,
            wpm: 0.0,
        }
    }
}

impl Stats {
    /// Five keystrokes make a word
    pub fn update_wpm(&mut self) {
        self.wpm = if self.elapsed > 0.0 {
            (self.kills as f32 / 5.0) / (self.elapsed / 60.0)
        } else {
            0.0
        };
    }
}

/// Things that happened during a tick or key press
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Spawned { id: u32, glyph: char },
    Killed { id: u32, glyph: char, points: i64 },
    Missed { key: String },
    Breached { id: u32, glyph: char },
    Expired { id: u32 },
    GameOver,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub status: Status,
    pub mode: GameMode,
    /// Seconds to cross the screen (practice mode)
    pub practice_speed: f32,
    pub field: Field,
    pub stats: Stats,
    /// Live targets in spawn order
    pub targets: Vec<Target>,
    pub spawner: SpawnScheduler,
    pub feedback: Option<InputFeedback>,
    /// Seconds of muzzle flash left
    pub muzzle_flash: f32,
    /// Where the last shot landed, while the muzzle flash lasts
    pub tracer: Option<Vec2>,
    pub log: CombatLog,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle session sitting in the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            status: Status::Menu,
            mode: GameMode::Survival,
            practice_speed: PRACTICE_SPEED_DEFAULT,
            field: Field::default(),
            stats: Stats::default(),
            targets: Vec::new(),
            spawner: SpawnScheduler::default(),
            feedback: None,
            muzzle_flash: 0.0,
            tracer: None,
            log: CombatLog::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Reset everything and begin playing
    pub fn start(&mut self, mode: GameMode, practice_speed: f32) {
        self.reset();
        self.mode = mode;
        self.practice_speed = clamp_practice_speed(practice_speed);
        self.status = Status::Playing;

        let message = match mode {
            GameMode::Survival => "Survival run started!".to_string(),
            GameMode::Practice => {
                format!("Practice started! Crossing time: {}s", self.practice_speed)
            }
        };
        self.log.push(LogKind::Info, message, 0.0);
    }

    /// Clear session stats, targets, timers and the log
    pub fn reset(&mut self) {
        self.stats = Stats::default();
        self.targets.clear();
        self.spawner.reset();
        self.feedback = None;
        self.muzzle_flash = 0.0;
        self.tracer = None;
        self.log.clear();
    }

    /// Playing <-> Paused. Returns true if the status changed.
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            Status::Playing => {
                self.status = Status::Paused;
                true
            }
            Status::Paused => {
                self.status = Status::Playing;
                true
            }
            Status::Menu | Status::GameOver => false,
        }
    }

    /// Back to the menu from anywhere
    pub fn stop(&mut self) {
        self.status = Status::Menu;
    }

    pub fn is_playing(&self) -> bool {
        self.status == Status::Playing
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.field = Field::new(width, height);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Add a live target and return its id
    pub fn add_target(&mut self, pos: Vec2, glyph: char, speed: f32) -> u32 {
        let id = self.next_entity_id();
        let target = Target::new(id, pos, glyph, speed, self.stats.elapsed);
        self.targets.push(target);
        id
    }

    /// Glyphs of every target in the live set, dying ones included
    pub fn glyphs_on_screen(&self) -> Vec<char> {
        self.targets.iter().map(|t| t.glyph).collect()
    }
}

/// Keep the crossing time inside the supported range
pub fn clamp_practice_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.clamp(PRACTICE_SPEED_MIN, PRACTICE_SPEED_MAX)
    } else {
        PRACTICE_SPEED_DEFAULT
    }
}
