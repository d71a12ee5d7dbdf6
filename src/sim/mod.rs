//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio, storage or platform dependencies

pub mod combat_log;
pub mod difficulty;
pub mod input;
pub mod spawn;
pub mod state;
pub mod target;
pub mod tick;

pub use combat_log::{CombatLog, LogEntry, LogKind};
pub use difficulty::{Travel, character_pool, spawn_interval, travel, travel_duration};
pub use input::{Key, KeyOutcome, hit_points, resolve_key};
pub use spawn::SpawnScheduler;
pub use state::{
    FeedbackKind, Field, GameEvent, GameMode, GameState, InputFeedback, Stats, Status,
};
pub use target::{Target, TargetState};
pub use tick::tick;
