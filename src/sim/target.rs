//! Target entity ("zombie")
//!
//! A glyph-bearing walker that moves left until it is shot or breaches.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BREACH_X, DYING_DURATION};

/// Lifecycle of a target: alive -> dying -> expired
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetState {
    /// Walking toward the barrier, matchable
    Alive,
    /// Shot; position frozen while the death animation plays
    Dying { elapsed: f32 },
    /// Finished; removed from the live set at the end of the tick
    Expired,
}

/// A target entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    /// Upper-case for letters, exact for digits/symbols
    pub glyph: char,
    /// Pixels per second (always > 0)
    pub speed: f32,
    pub state: TargetState,
    /// Session time at spawn (seconds)
    pub spawned_at: f32,
}

impl Target {
    pub fn new(id: u32, pos: Vec2, glyph: char, speed: f32, spawned_at: f32) -> Self {
        debug_assert!(speed > 0.0, "target speed must be positive");
        Self {
            id,
            pos,
            glyph: normalize_glyph(glyph),
            speed,
            state: TargetState::Alive,
            spawned_at,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state == TargetState::Alive
    }

    pub fn is_expired(&self) -> bool {
        self.state == TargetState::Expired
    }

    /// Whether this target answers to the (already normalized) glyph
    pub fn matches(&self, glyph: char) -> bool {
        self.is_alive() && self.glyph == glyph
    }

    /// Start the death animation. No-op unless alive.
    pub fn kill(&mut self) {
        if self.is_alive() {
            self.state = TargetState::Dying { elapsed: 0.0 };
        }
    }

    /// Advance one tick: walk left while alive, run the decay timer while dying
    pub fn advance(&mut self, dt: f32) {
        match self.state {
            TargetState::Alive => self.pos.x -= self.speed * dt,
            TargetState::Dying { elapsed } => {
                let elapsed = elapsed + dt;
                self.state = if elapsed > DYING_DURATION {
                    TargetState::Expired
                } else {
                    TargetState::Dying { elapsed }
                };
            }
            TargetState::Expired => {}
        }
    }

    /// Alive and past the barrier
    pub fn has_breached(&self) -> bool {
        self.is_alive() && self.pos.x < BREACH_X
    }

    /// Death animation progress in 0..=1 (None unless dying)
    pub fn decay_progress(&self) -> Option<f32> {
        match self.state {
            TargetState::Dying { elapsed } => Some((elapsed / DYING_DURATION).min(1.0)),
            _ => None,
        }
    }
}

/// Letters match case-insensitively, everything else exactly
pub fn normalize_glyph(c: char) -> char {
    if c.is_ascii_alphabetic() {
        c.to_ascii_uppercase()
    } else {
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walker(x: f32) -> Target {
        Target::new(1, Vec2::new(x, 200.0), 'f', 100.0, 0.0)
    }

    #[test]
    fn test_glyph_is_normalized() {
        assert_eq!(walker(300.0).glyph, 'F');
        assert_eq!(normalize_glyph(';'), ';');
        assert_eq!(normalize_glyph('7'), '7');
    }

    #[test]
    fn test_alive_target_walks_left() {
        let mut t = walker(300.0);
        t.advance(0.5);
        assert!((t.pos.x - 250.0).abs() < 1e-4);
        assert!(t.is_alive());
    }

    #[test]
    fn test_dying_target_is_frozen_then_expires() {
        let mut t = walker(300.0);
        t.kill();
        assert!(!t.matches('F'));
        t.advance(0.25);
        assert_eq!(t.pos.x, 300.0);
        assert_eq!(t.decay_progress(), Some(0.5));
        t.advance(0.25);
        // exactly 0.5s is not past the threshold
        assert!(!t.is_expired());
        t.advance(0.01);
        assert!(t.is_expired());
    }

    #[test]
    fn test_breach_requires_alive() {
        let mut t = walker(40.0);
        assert!(t.has_breached());
        t.kill();
        assert!(!t.has_breached());
    }
}
