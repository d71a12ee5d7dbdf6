//! Error types for the ambient surfaces (settings, storage)
//!
//! The simulation itself never fails; these only surface from
//! configuration parsing and browser storage.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("practice speed {0} is outside {min}..={max} seconds", min = crate::consts::PRACTICE_SPEED_MIN, max = crate::consts::PRACTICE_SPEED_MAX)]
    PracticeSpeedOutOfRange(f32),

    #[error("{name} volume {value} is outside 0.0..=1.0")]
    VolumeOutOfRange { name: &'static str, value: f32 },

    #[error("unknown game mode '{0}'")]
    UnknownMode(String),

    #[error("storage unavailable")]
    StorageUnavailable,

    #[error("storage write failed for key '{0}'")]
    StorageWrite(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
