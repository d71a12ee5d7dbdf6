//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (requestAnimationFrame timestamps -> simulation deltas)
//! - Storage (LocalStorage on web, in-process map natively)

pub mod storage;

use crate::consts::MAX_FRAME_DT;

/// Turns frame timestamps (milliseconds) into simulation deltas (seconds)
///
/// The first frame after `resume` always yields zero, so time spent paused
/// or stopped is never replayed.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame; the next delta is measured from `now_ms`
    pub fn resume(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Drop the reference point entirely (stop)
    pub fn halt(&mut self) {
        self.last_ms = None;
    }

    /// Seconds since the previous frame, clamped to 0..=MAX_FRAME_DT
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        }
    }
}
