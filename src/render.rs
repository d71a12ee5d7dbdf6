//! Render contract
//!
//! Drawing is outside the core. After every processed frame and key press
//! the engine hands a `Snapshot` to a `RenderSink`; sinks only read it.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GameMode, GameState, InputFeedback, LogEntry, Stats, Status, TargetState};

/// One target as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub glyph: char,
    /// `None` while alive, death animation progress 0..1 while dying
    pub decay: Option<f32>,
}

/// Read-only view of a session at one instant
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub status: Status,
    pub mode: GameMode,
    pub width: f32,
    pub height: f32,
    pub stats: Stats,
    pub targets: Vec<TargetView>,
    /// 0..1; a fresh shot starts at 0.5 and fades to 0
    pub muzzle_flash: f32,
    pub tracer: Option<Vec2>,
    pub feedback: Option<InputFeedback>,
    /// Newest first
    pub log: Vec<LogEntry>,
}

impl Snapshot {
    pub fn from_state(state: &GameState) -> Self {
        let targets = state
            .targets
            .iter()
            .filter(|t| t.state != TargetState::Expired)
            .map(|t| TargetView {
                id: t.id,
                x: t.pos.x,
                y: t.pos.y,
                glyph: t.glyph,
                decay: t.decay_progress(),
            })
            .collect();

        Self {
            status: state.status,
            mode: state.mode,
            width: state.field.width,
            height: state.field.height,
            stats: state.stats.clone(),
            targets,
            muzzle_flash: muzzle_intensity(state.muzzle_flash),
            tracer: state.tracer,
            feedback: state.feedback.clone(),
            log: state.log.iter().cloned().collect(),
        }
    }

    pub fn alive_count(&self) -> usize {
        self.targets.iter().filter(|t| t.decay.is_none()).count()
    }
}

/// Flash timer (seconds) to draw intensity; a fresh shot starts at half
pub fn muzzle_intensity(timer: f32) -> f32 {
    (timer * 5.0).clamp(0.0, 1.0)
}

/// Consumer of per-frame snapshots
pub trait RenderSink {
    fn present(&mut self, snapshot: &Snapshot);
}

/// Draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl RenderSink for Headless {
    fn present(&mut self, _snapshot: &Snapshot) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MUZZLE_FLASH_DURATION;

    #[test]
    fn test_muzzle_intensity() {
        assert_eq!(muzzle_intensity(0.0), 0.0);
        assert_eq!(muzzle_intensity(MUZZLE_FLASH_DURATION), 0.5);
        assert_eq!(muzzle_intensity(-1.0), 0.0);
        assert_eq!(muzzle_intensity(1.0), 1.0);
    }

    #[test]
    fn test_snapshot_reflects_targets() {
        let mut state = GameState::new(3);
        state.start(GameMode::Survival, 5.0);
        state.add_target(Vec2::new(200.0, 150.0), 'f', 160.0);
        let dying = state.add_target(Vec2::new(300.0, 250.0), 'J', 160.0);
        state.targets[1].kill();

        let snap = Snapshot::from_state(&state);
        assert_eq!(snap.status, Status::Playing);
        assert_eq!(snap.targets.len(), 2);
        assert_eq!(snap.targets[0].glyph, 'F');
        assert_eq!(snap.targets[0].decay, None);
        assert_eq!(snap.targets[1].id, dying);
        assert_eq!(snap.targets[1].decay, Some(0.0));
        assert_eq!(snap.alive_count(), 1);
        assert_eq!(snap.log.len(), 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(3);
        let json = serde_json::to_string(&Snapshot::from_state(&state)).unwrap();
        assert!(json.contains("\"status\":\"menu\""));
    }
}
