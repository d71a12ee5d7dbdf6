//! Difficulty curve
//!
//! Pure functions from (mode, score, settings) to spawn pacing, walk speed
//! and the glyph pool. Survival tightens continuously with score; practice
//! is pinned to the player's chosen crossing time.

use rand::Rng;

use super::state::GameMode;
use crate::consts::*;

/// Every glyph in unlock order. Each tier's pool is a prefix, so tiers nest.
const GLYPHS: &str = "FJDKSLA;RUEIWOQPVMCNBXZGHTY0123456789!@#$%^&*()";

/// (minimum score, pool length) per tier, ascending
const TIERS: [(i64, usize); 7] = [
    (i64::MIN, 2), // F J
    (200, 6),      // + D K S L
    (500, 8),      // + A ;  (full home row)
    (1000, 16),    // + top row
    (2000, 27),    // + remaining letters
    (4000, 37),    // + digits
    (6000, 47),    // + symbols
];

/// Seconds between spawns
pub fn spawn_interval(mode: GameMode, score: i64, practice_speed: f32) -> f32 {
    match mode {
        GameMode::Survival => SPAWN_INTERVAL_FLOOR
            .max(SURVIVAL_BASE_INTERVAL - score as f32 / SURVIVAL_INTERVAL_SCORE_SCALE),
        GameMode::Practice => SPAWN_INTERVAL_FLOOR.max(practice_speed * PRACTICE_INTERVAL_FACTOR),
    }
}

/// Seconds a fresh target needs to cross the screen
pub fn travel_duration(mode: GameMode, score: i64, practice_speed: f32) -> f32 {
    match mode {
        GameMode::Survival => {
            // Clamped at 0 too: a non-positive score ends the run anyway
            let factor = (score as f32 / SURVIVAL_DURATION_SCORE_CAP).clamp(0.0, 1.0);
            SURVIVAL_BASE_DURATION * (1.0 - factor * SURVIVAL_DURATION_REDUCTION)
        }
        GameMode::Practice => practice_speed,
    }
}

/// Crossing time and the matching walk speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Travel {
    pub duration: f32,
    /// Pixels per second
    pub speed: f32,
}

pub fn travel(mode: GameMode, score: i64, practice_speed: f32, screen_width: f32) -> Travel {
    let duration = travel_duration(mode, score, practice_speed);
    Travel {
        duration,
        speed: screen_width / duration,
    }
}

/// Index into the tier table for a score
pub fn tier(score: i64) -> usize {
    TIERS
        .iter()
        .rposition(|&(min_score, _)| score >= min_score)
        .unwrap_or(0)
}

/// Glyphs unlocked at this score
pub fn character_pool(score: i64) -> &'static str {
    let (_, len) = TIERS[tier(score)];
    &GLYPHS[..len]
}

/// Uniform draw from the pool, re-rolled once if it collides with a glyph
/// already on screen. A second collision is kept.
pub fn pick_glyph<R: Rng>(pool: &str, on_screen: &[char], rng: &mut R) -> char {
    let glyphs: Vec<char> = pool.chars().collect();
    assert!(!glyphs.is_empty(), "character pool must not be empty");

    let first = glyphs[rng.random_range(0..glyphs.len())];
    if !on_screen.contains(&first) {
        return first;
    }
    glyphs[rng.random_range(0..glyphs.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_survival_interval_formula() {
        assert!((spawn_interval(GameMode::Survival, 0, 5.0) - 3.0).abs() < 1e-6);
        assert!((spawn_interval(GameMode::Survival, 5000, 5.0) - 2.0).abs() < 1e-6);
        assert_eq!(spawn_interval(GameMode::Survival, 100_000, 5.0), 0.5);
    }

    #[test]
    fn test_practice_interval_formula() {
        assert!((spawn_interval(GameMode::Practice, 0, 5.0) - 2.0).abs() < 1e-6);
        assert_eq!(spawn_interval(GameMode::Practice, 9999, 1.0), 0.5);
    }

    #[test]
    fn test_survival_duration_range() {
        assert_eq!(travel_duration(GameMode::Survival, 0, 5.0), 5.0);
        assert!((travel_duration(GameMode::Survival, 20_000, 5.0) - 1.5).abs() < 1e-5);
        assert!((travel_duration(GameMode::Survival, 90_000, 5.0) - 1.5).abs() < 1e-5);
        assert!((travel_duration(GameMode::Survival, 10_000, 5.0) - 3.25).abs() < 1e-5);
    }

    #[test]
    fn test_practice_duration_is_fixed() {
        assert_eq!(travel_duration(GameMode::Practice, 0, 7.0), 7.0);
        assert_eq!(travel_duration(GameMode::Practice, 15_000, 7.0), 7.0);
    }

    #[test]
    fn test_speed_is_width_over_duration() {
        let t = travel(GameMode::Practice, 0, 4.0, 800.0);
        assert_eq!(t.duration, 4.0);
        assert_eq!(t.speed, 200.0);
    }

    #[test]
    fn test_pool_tiers() {
        assert_eq!(character_pool(100), "FJ");
        assert_eq!(character_pool(-50), "FJ");
        assert_eq!(character_pool(200), "FJDKSL");
        assert_eq!(character_pool(999), "FJDKSLA;");
        assert_eq!(character_pool(1000).len(), 16);
        let letters = character_pool(2000);
        assert!(('A'..='Z').all(|c| letters.contains(c)));
        assert!(character_pool(4000).contains('0'));
        assert!(character_pool(6000).contains('@'));
        assert_eq!(character_pool(i64::MAX).len(), GLYPHS.len());
    }

    #[test]
    fn test_pool_has_no_duplicates() {
        let mut seen: Vec<char> = GLYPHS.chars().collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), GLYPHS.len());
    }

    #[test]
    fn test_pick_glyph_retries_once_then_accepts_duplicate() {
        let mut rng = Pcg32::seed_from_u64(7);
        // Single-glyph pool: both draws collide, duplicate is accepted
        assert_eq!(pick_glyph("F", &['F'], &mut rng), 'F');
    }

    #[test]
    fn test_pick_glyph_stays_in_pool() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let c = pick_glyph("FJ", &['F'], &mut rng);
            assert!(c == 'F' || c == 'J');
        }
    }

    #[test]
    #[should_panic(expected = "character pool must not be empty")]
    fn test_empty_pool_is_fatal() {
        let mut rng = Pcg32::seed_from_u64(1);
        pick_glyph("", &[], &mut rng);
    }

    fn any_mode() -> impl Strategy<Value = GameMode> {
        prop_oneof![Just(GameMode::Survival), Just(GameMode::Practice)]
    }

    proptest! {
        #[test]
        fn prop_spawn_interval_non_increasing(
            mode in any_mode(),
            a in -10_000i64..100_000,
            b in -10_000i64..100_000,
            speed in PRACTICE_SPEED_MIN..PRACTICE_SPEED_MAX,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let slow = spawn_interval(mode, lo, speed);
            let fast = spawn_interval(mode, hi, speed);
            prop_assert!(fast <= slow);
            prop_assert!(fast >= SPAWN_INTERVAL_FLOOR);
        }

        #[test]
        fn prop_travel_duration_non_increasing(
            mode in any_mode(),
            a in -10_000i64..100_000,
            b in -10_000i64..100_000,
            speed in PRACTICE_SPEED_MIN..PRACTICE_SPEED_MAX,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(travel_duration(mode, hi, speed) <= travel_duration(mode, lo, speed));
        }

        #[test]
        fn prop_survival_duration_floor(score in 20_000i64..1_000_000) {
            let d = travel_duration(GameMode::Survival, score, 5.0);
            prop_assert!((d - 1.5).abs() < 1e-5);
        }

        #[test]
        fn prop_pools_are_nested(a in -1_000i64..10_000, b in -1_000i64..10_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let higher = character_pool(hi);
            prop_assert!(character_pool(lo).chars().all(|c| higher.contains(c)));
        }
    }
}
