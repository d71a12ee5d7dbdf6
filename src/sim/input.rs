//! Input resolver
//!
//! Turns one key press into a hit on the nearest matching target, a miss,
//! or a pause request. Keys arrive as `KeyboardEvent.key`-style strings:
//! a single character, or a named key such as `"Escape"` or `"Shift"`.

use super::combat_log::LogKind;
use super::state::{FeedbackKind, GameEvent, GameState, InputFeedback, Status};
use super::target::normalize_glyph;
use crate::consts::*;

/// A decoded key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Printable character as delivered (shifted symbols arrive as themselves)
    Char(char),
    /// Pause toggle
    Escape,
    /// Shift/Control/Alt/Meta pressed on its own
    Modifier,
    /// Any other named key ("Enter", "Tab", "ArrowLeft", ...)
    Named(String),
}

impl Key {
    pub fn parse(key: &str) -> Self {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::Char(c),
            _ => match key {
                "Escape" | "Esc" => Key::Escape,
                "Shift" | "Control" | "Alt" | "Meta" | "AltGraph" => Key::Modifier,
                _ => Key::Named(key.to_string()),
            },
        }
    }

    /// Matching form: letters upper-cased, everything else untouched
    pub fn label(&self) -> String {
        match self {
            Key::Char(c) => normalize_glyph(*c).to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Modifier => String::new(),
            Key::Named(name) => name.to_uppercase(),
        }
    }
}

/// What a key press did
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// Not meaningful in the current status
    Ignored,
    /// Caller should toggle pause
    TogglePause,
    Hit { target_id: u32, glyph: char, points: i64 },
    Miss,
}

/// Points for a kill at the given (already incremented) combo
pub fn hit_points(combo: u32) -> i64 {
    let combo_bonus = (combo as i64 * COMBO_BONUS_STEP).min(COMBO_BONUS_CAP);
    HIT_BASE_POINTS + HIT_SPEED_BONUS + combo_bonus
}

/// Resolve a key against the live targets, mutating score and combo
pub fn resolve_key(state: &mut GameState, key: &Key, events: &mut Vec<GameEvent>) -> KeyOutcome {
    match state.status {
        Status::Playing => {}
        Status::Paused if *key == Key::Escape => return KeyOutcome::TogglePause,
        _ => return KeyOutcome::Ignored,
    }

    let glyph = match key {
        Key::Escape => return KeyOutcome::TogglePause,
        Key::Modifier => return KeyOutcome::Ignored,
        Key::Char(c) => Some(normalize_glyph(*c)),
        Key::Named(_) => None,
    };
    let label = key.label();

    // Nearest to the barrier wins; min_by keeps the earliest spawn on ties
    let nearest = glyph.and_then(|g| {
        state
            .targets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.matches(g))
            .min_by(|(_, a), (_, b)| a.pos.x.total_cmp(&b.pos.x))
            .map(|(index, _)| index)
    });

    match nearest {
        Some(index) => register_hit(state, index, label, events),
        None => register_miss(state, label, events),
    }
}

fn register_hit(
    state: &mut GameState,
    index: usize,
    label: String,
    events: &mut Vec<GameEvent>,
) -> KeyOutcome {
    let elapsed = state.stats.elapsed;
    let target = &mut state.targets[index];
    target.kill();
    let (target_id, glyph, pos) = (target.id, target.glyph, target.pos);
    let reaction = elapsed - target.spawned_at;

    let stats = &mut state.stats;
    stats.combo += 1;
    stats.max_combo = stats.max_combo.max(stats.combo);
    let points = hit_points(stats.combo);
    stats.score += points;
    stats.total_points += points;
    stats.kills += 1;
    stats.peak_score = stats.peak_score.max(stats.score);

    state.feedback = Some(InputFeedback {
        kind: FeedbackKind::Hit,
        key: label,
        timer: FEEDBACK_DURATION,
    });
    state.muzzle_flash = MUZZLE_FLASH_DURATION;
    state.tracer = Some(pos);

    state.log.push(
        LogKind::Kill,
        format!("Zombie [{glyph}] down +{points} ({reaction:.2}s)"),
        elapsed,
    );
    log::debug!(
        "Hit target {} '{}' +{} (combo {})",
        target_id,
        glyph,
        points,
        state.stats.combo
    );
    events.push(GameEvent::Killed {
        id: target_id,
        glyph,
        points,
    });

    KeyOutcome::Hit {
        target_id,
        glyph,
        points,
    }
}

fn register_miss(state: &mut GameState, label: String, events: &mut Vec<GameEvent>) -> KeyOutcome {
    state.stats.score -= MISS_PENALTY;
    state.stats.combo = 0;
    state.stats.misses += 1;

    state.log.push(
        LogKind::Miss,
        format!("Missed [{label}] -{MISS_PENALTY}"),
        state.stats.elapsed,
    );
    log::debug!("Miss on '{}', score {}", label, state.stats.score);
    events.push(GameEvent::Missed { key: label.clone() });

    state.feedback = Some(InputFeedback {
        kind: FeedbackKind::Miss,
        key: label,
        timer: FEEDBACK_DURATION,
    });

    KeyOutcome::Miss
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use crate::sim::state::GameMode;
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::new(5);
        state.start(GameMode::Survival, 5.0);
        state
    }

    fn press(state: &mut GameState, key: &str) -> KeyOutcome {
        let mut events = Vec::new();
        resolve_key(state, &Key::parse(key), &mut events)
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(Key::parse("a"), Key::Char('a'));
        assert_eq!(Key::parse("@"), Key::Char('@'));
        assert_eq!(Key::parse("Escape"), Key::Escape);
        assert_eq!(Key::parse("Shift"), Key::Modifier);
        assert_eq!(Key::parse("Meta"), Key::Modifier);
        assert_eq!(Key::parse("Enter"), Key::Named("Enter".into()));
        assert_eq!(Key::parse("f").label(), "F");
        assert_eq!(Key::parse("Tab").label(), "TAB");
    }

    #[test]
    fn test_miss_on_fresh_session() {
        let mut state = playing();
        assert_eq!(press(&mut state, "q"), KeyOutcome::Miss);
        assert_eq!(state.stats.score, 95);
        assert_eq!(state.stats.combo, 0);
        assert_eq!(state.log.latest().unwrap().kind, LogKind::Miss);
        assert_eq!(state.feedback.as_ref().unwrap().kind, FeedbackKind::Miss);
    }

    #[test]
    fn test_lowercase_hit_on_uppercase_target() {
        let mut state = playing();
        let id = state.add_target(Vec2::new(200.0, 200.0), 'F', 100.0);

        let outcome = press(&mut state, "f");
        assert_eq!(
            outcome,
            KeyOutcome::Hit {
                target_id: id,
                glyph: 'F',
                points: 45
            }
        );
        assert_eq!(state.stats.score, 145);
        assert_eq!(state.stats.combo, 1);
        assert_eq!(state.stats.kills, 1);
        assert_eq!(state.stats.peak_score, 145);
        assert!(!state.targets[0].is_alive());
        assert_eq!(state.tracer, Some(Vec2::new(200.0, 200.0)));
        assert_eq!(state.muzzle_flash, MUZZLE_FLASH_DURATION);
        assert_eq!(state.log.latest().unwrap().kind, LogKind::Kill);
    }

    #[test]
    fn test_nearest_target_is_chosen() {
        let mut state = playing();
        let far = state.add_target(Vec2::new(600.0, 150.0), 'J', 100.0);
        let near = state.add_target(Vec2::new(300.0, 250.0), 'J', 100.0);

        assert!(matches!(press(&mut state, "j"), KeyOutcome::Hit { target_id, .. } if target_id == near));
        assert!(matches!(press(&mut state, "j"), KeyOutcome::Hit { target_id, .. } if target_id == far));
        // Both dying now; a third press misses
        assert_eq!(press(&mut state, "j"), KeyOutcome::Miss);
    }

    #[test]
    fn test_tie_goes_to_earliest_spawn() {
        let mut state = playing();
        let first = state.add_target(Vec2::new(300.0, 150.0), 'F', 100.0);
        state.add_target(Vec2::new(300.0, 250.0), 'F', 100.0);
        assert!(matches!(press(&mut state, "F"), KeyOutcome::Hit { target_id, .. } if target_id == first));
    }

    #[test]
    fn test_symbols_match_exactly() {
        let mut state = playing();
        state.add_target(Vec2::new(300.0, 150.0), '@', 100.0);
        assert_eq!(press(&mut state, "2"), KeyOutcome::Miss);
        assert!(matches!(press(&mut state, "@"), KeyOutcome::Hit { glyph: '@', .. }));
    }

    #[test]
    fn test_named_keys_miss_and_modifiers_are_ignored() {
        let mut state = playing();
        assert_eq!(press(&mut state, "Shift"), KeyOutcome::Ignored);
        assert_eq!(state.stats.score, 100);
        assert_eq!(press(&mut state, "Enter"), KeyOutcome::Miss);
        assert_eq!(state.stats.score, 95);
    }

    #[test]
    fn test_status_gating() {
        let mut state = GameState::new(5);
        assert_eq!(press(&mut state, "f"), KeyOutcome::Ignored);
        assert_eq!(press(&mut state, "Escape"), KeyOutcome::Ignored);

        state.start(GameMode::Survival, 5.0);
        assert_eq!(press(&mut state, "Escape"), KeyOutcome::TogglePause);

        state.status = Status::Paused;
        assert_eq!(press(&mut state, "f"), KeyOutcome::Ignored);
        assert_eq!(press(&mut state, "Escape"), KeyOutcome::TogglePause);
        assert_eq!(state.stats.score, 100);
    }

    #[test]
    fn test_combo_resets_on_miss() {
        let mut state = playing();
        for _ in 0..3 {
            state.add_target(Vec2::new(300.0, 150.0), 'F', 100.0);
            press(&mut state, "f");
        }
        assert_eq!(state.stats.combo, 3);
        press(&mut state, "x");
        assert_eq!(state.stats.combo, 0);
        assert_eq!(state.stats.max_combo, 3);
    }

    #[test]
    fn test_combo_bonus_caps_at_500() {
        assert_eq!(hit_points(1), 45);
        assert_eq!(hit_points(49), 525);
        assert_eq!(hit_points(50), 535);
        assert_eq!(hit_points(51), 535);
        assert_eq!(hit_points(10_000), 535);
    }

    #[test]
    fn test_consecutive_hits_strictly_increase_score() {
        let mut state = playing();
        let mut last = state.stats.score;
        for _ in 0..60 {
            state.add_target(Vec2::new(300.0, 150.0), 'J', 100.0);
            assert!(matches!(press(&mut state, "j"), KeyOutcome::Hit { .. }));
            assert!(state.stats.score > last);
            last = state.stats.score;
        }
        assert_eq!(state.stats.total_points, state.stats.score - START_SCORE);
    }

    proptest! {
        #[test]
        fn prop_combo_bonus_never_exceeds_cap(combo in 0u32..1_000_000) {
            let points = hit_points(combo);
            prop_assert!(points >= HIT_BASE_POINTS + HIT_SPEED_BONUS);
            prop_assert!(points <= HIT_BASE_POINTS + HIT_SPEED_BONUS + COMBO_BONUS_CAP);
        }
    }
}
