//! Spawn scheduler
//!
//! Accumulates play time and releases one target each time the current
//! interval is exceeded. Large deltas never produce catch-up spawns.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::{character_pool, pick_glyph, spawn_interval, travel};
use super::state::{GameEvent, GameState};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Seconds since the last spawn
    pub accumulator: f32,
}

impl SpawnScheduler {
    /// Add `dt` and report whether a spawn is due; resets on spawn
    pub fn advance(&mut self, dt: f32, interval: f32) -> bool {
        self.accumulator += dt;
        if self.accumulator > interval {
            self.accumulator = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Run the scheduler for one tick, spawning at most one target
pub fn run_spawner(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let interval = spawn_interval(state.mode, state.stats.score, state.practice_speed);
    if state.spawner.advance(dt, interval) {
        let (id, glyph) = spawn_target(state);
        events.push(GameEvent::Spawned { id, glyph });
    }
}

/// Create one target just off the right edge at a random row
pub fn spawn_target(state: &mut GameState) -> (u32, char) {
    let score = state.stats.score;
    let on_screen = state.glyphs_on_screen();
    let glyph = pick_glyph(character_pool(score), &on_screen, state.rng_mut());

    let row = state.rng_mut().random::<f32>();
    let pos = Vec2::new(state.field.spawn_x(), state.field.spawn_y(row));
    let walk = travel(state.mode, score, state.practice_speed, state.field.width);

    let id = state.add_target(pos, glyph, walk.speed);
    log::debug!(
        "Spawned target {} '{}' at y={:.0}, {:.0}px/s ({:.2}s crossing)",
        id,
        glyph,
        pos.y,
        walk.speed,
        walk.duration
    );
    (id, glyph)
}
