//! Zombie Typist - a typing-combat arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (targets, difficulty, spawning, input, tick)
//! - `engine`: Session lifecycle wired to the injected collaborators
//! - `audio` / `render` / `highscores`: Collaborator contracts and browser implementations
//! - `platform`: Frame clock and storage abstraction
//! - `settings`: Player preferences

pub mod audio;
pub mod engine;
pub mod error;
pub mod highscores;
pub mod logging;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use engine::{Engine, FrameToken};
pub use error::{Error, Result};
pub use highscores::{BestRecord, HighScores, SessionSummary};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Score a fresh session starts with (score doubles as health)
    pub const START_SCORE: i64 = 100;
    /// Penalty for a keystroke that matches no live target
    pub const MISS_PENALTY: i64 = 5;
    /// Penalty for a target crossing the barrier while alive
    pub const BREACH_PENALTY: i64 = 10;

    /// Flat points for every kill
    pub const HIT_BASE_POINTS: i64 = 20;
    /// Flat reaction bonus for every kill
    pub const HIT_SPEED_BONUS: i64 = 15;
    /// Combo bonus per combo step
    pub const COMBO_BONUS_STEP: i64 = 10;
    /// Combo bonus ceiling (reached at combo 50)
    pub const COMBO_BONUS_CAP: i64 = 500;

    /// Seconds a killed target lingers before it is removed
    pub const DYING_DURATION: f32 = 0.5;
    /// Seconds the hit/miss input flash stays up
    pub const FEEDBACK_DURATION: f32 = 0.2;
    /// Seconds the muzzle flash and tracer stay up
    pub const MUZZLE_FLASH_DURATION: f32 = 0.1;

    /// Player's horizontal center
    pub const PLAYER_X: f32 = 100.0;
    /// Targets left of this line while alive have breached
    pub const BREACH_X: f32 = 50.0;
    /// Targets spawn this far past the right edge
    pub const SPAWN_OFFSET_X: f32 = 50.0;
    /// Vertical margin kept clear at the top and bottom when spawning
    pub const SPAWN_MARGIN_Y: f32 = 100.0;

    /// Spawn interval floor (seconds)
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.5;
    /// Survival spawn interval at score 0 (seconds)
    pub const SURVIVAL_BASE_INTERVAL: f32 = 3.0;
    /// Score needed to shave one second off the survival spawn interval
    pub const SURVIVAL_INTERVAL_SCORE_SCALE: f32 = 5000.0;
    /// Practice spawn interval as a fraction of the crossing time
    pub const PRACTICE_INTERVAL_FACTOR: f32 = 0.4;

    /// Survival crossing time at score 0 (seconds)
    pub const SURVIVAL_BASE_DURATION: f32 = 5.0;
    /// Score at which the survival crossing time bottoms out
    pub const SURVIVAL_DURATION_SCORE_CAP: f32 = 20000.0;
    /// Fraction of the base crossing time removed at the cap (5s -> 1.5s)
    pub const SURVIVAL_DURATION_REDUCTION: f32 = 0.7;

    /// Practice crossing time bounds and default (seconds)
    pub const PRACTICE_SPEED_MIN: f32 = 1.0;
    pub const PRACTICE_SPEED_MAX: f32 = 10.0;
    pub const PRACTICE_SPEED_DEFAULT: f32 = 5.0;

    /// Number of combat log entries kept
    pub const LOG_CAPACITY: usize = 20;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play field defaults (pixels)
    pub const DEFAULT_FIELD_WIDTH: f32 = 800.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 450.0;
}
