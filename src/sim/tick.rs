//! Frame-paced simulation tick
//!
//! Core game loop: advances the session by one frame delta.
//!
//! Targets are evaluated in a single `retain_mut` pass that rebuilds the
//! live set in place, so each target is visited exactly once per tick no
//! matter how many are removed.

use super::combat_log::LogKind;
use super::spawn::run_spawner;
use super::state::{GameEvent, GameState, Status};
use crate::consts::BREACH_PENALTY;

/// Advance the session by `dt` seconds. Does nothing unless playing.
pub fn tick(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.status != Status::Playing {
        return events;
    }

    // Stalled or reversed clocks never run time backward
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    state.stats.elapsed += dt;
    decay_timers(state, dt);
    run_spawner(state, dt, &mut events);

    let mut breached = Vec::new();
    state.targets.retain_mut(|target| {
        target.advance(dt);
        if target.is_expired() {
            events.push(GameEvent::Expired { id: target.id });
            return false;
        }
        if target.has_breached() {
            breached.push((target.id, target.glyph));
            return false;
        }
        true
    });

    for (id, glyph) in breached {
        apply_breach(state, id, glyph);
        events.push(GameEvent::Breached { id, glyph });
    }

    state.stats.update_wpm();

    if state.stats.score <= 0 {
        state.status = Status::GameOver;
        log::info!(
            "Game over after {:.1}s: {} kills, max combo {}, {} points earned",
            state.stats.elapsed,
            state.stats.kills,
            state.stats.max_combo,
            state.stats.total_points
        );
        events.push(GameEvent::GameOver);
    }

    events
}

/// Count down the input flash and muzzle flash, clearing what they show
fn decay_timers(state: &mut GameState, dt: f32) {
    let feedback_done = match state.feedback.as_mut() {
        Some(feedback) => {
            feedback.timer -= dt;
            feedback.timer <= 0.0
        }
        None => false,
    };
    if feedback_done {
        state.feedback = None;
    }

    if state.muzzle_flash > 0.0 {
        state.muzzle_flash = (state.muzzle_flash - dt).max(0.0);
        if state.muzzle_flash == 0.0 {
            state.tracer = None;
        }
    }
}

fn apply_breach(state: &mut GameState, id: u32, glyph: char) {
    state.stats.score -= BREACH_PENALTY;
    state.stats.combo = 0;
    state.stats.breaches += 1;
    state.log.push(
        LogKind::Damage,
        format!("Zombie [{glyph}] broke through! -{BREACH_PENALTY}"),
        state.stats.elapsed,
    );
    log::debug!("Target {} '{}' breached, score {}", id, glyph, state.stats.score);
}
