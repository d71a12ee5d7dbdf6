//! Best records and leaderboard
//!
//! Score doubles as health, so the final score of a finished run is always
//! at or below zero. Records therefore track what the run earned: total
//! points, peak score, max combo and survival time. Persisted to
//! LocalStorage; write failures are logged and swallowed.

use serde::{Deserialize, Serialize};

use crate::platform::storage;
use crate::sim::{GameMode, GameState};

/// Maximum number of leaderboard entries to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// What a finished run hands to the score store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub mode: GameMode,
    pub final_score: i64,
    pub peak_score: i64,
    pub total_points: i64,
    pub max_combo: u32,
    pub kills: u32,
    /// Seconds survived
    pub elapsed: f32,
    pub wpm: f32,
}

impl SessionSummary {
    pub fn from_state(state: &GameState) -> Self {
        let stats = &state.stats;
        Self {
            mode: state.mode,
            final_score: stats.score,
            peak_score: stats.peak_score,
            total_points: stats.total_points,
            max_combo: stats.max_combo,
            kills: stats.kills,
            elapsed: stats.elapsed,
            wpm: stats.wpm,
        }
    }
}

/// Receives the summary when a run ends. Never read back mid-session.
pub trait ScoreStore {
    fn record_session(&mut self, summary: &SessionSummary);
}

/// All-time bests, each field improved independently
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BestRecord {
    pub max_combo: u32,
    pub peak_score: i64,
    pub total_points: i64,
    pub longest_survival: f32,
}

impl BestRecord {
    /// Overwrite every field the summary beats. Returns true if anything improved.
    pub fn merge(&mut self, summary: &SessionSummary) -> bool {
        let mut improved = false;
        if summary.max_combo > self.max_combo {
            self.max_combo = summary.max_combo;
            improved = true;
        }
        if summary.peak_score > self.peak_score {
            self.peak_score = summary.peak_score;
            improved = true;
        }
        if summary.total_points > self.total_points {
            self.total_points = summary.total_points;
            improved = true;
        }
        if summary.elapsed > self.longest_survival {
            self.longest_survival = summary.elapsed;
            improved = true;
        }
        improved
    }
}

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Points earned during the run
    pub total_points: i64,
    pub max_combo: u32,
    pub mode: GameMode,
    /// Seconds survived
    pub elapsed: f32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Top runs ranked by points earned
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run qualifies for the leaderboard
    pub fn qualifies(&self, total_points: i64) -> bool {
        if total_points <= 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the lowest entry
        self.entries
            .last()
            .map(|e| total_points > e.total_points)
            .unwrap_or(true)
    }

    /// Get the rank a run would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, total_points: i64) -> Option<usize> {
        if !self.qualifies(total_points) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| total_points > e.total_points);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a finished run. Returns the rank achieved (1-indexed) or None.
    pub fn add(&mut self, summary: &SessionSummary, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(summary.total_points)?;

        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                total_points: summary.total_points,
                max_combo: summary.max_combo,
                mode: summary.mode,
                elapsed: summary.elapsed,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }
}

/// Storage-backed score store (LocalStorage in the browser)
#[derive(Debug, Clone, Default)]
pub struct LocalScoreStore {
    pub best: BestRecord,
    pub board: HighScores,
}

impl LocalScoreStore {
    const BEST_KEY: &'static str = "zombie_typist_best";
    const BOARD_KEY: &'static str = "zombie_typist_highscores";

    /// Load both records, starting fresh on missing or corrupt data
    pub fn load() -> Self {
        let best = storage::load_json::<BestRecord>(Self::BEST_KEY)
            .unwrap_or_else(|e| {
                log::warn!("Discarding unreadable best record: {}", e);
                None
            })
            .unwrap_or_default();
        let board = storage::load_json::<HighScores>(Self::BOARD_KEY)
            .unwrap_or_else(|e| {
                log::warn!("Discarding unreadable leaderboard: {}", e);
                None
            })
            .unwrap_or_default();
        log::info!(
            "Loaded records: best combo {}, {} leaderboard entries",
            best.max_combo,
            board.entries.len()
        );
        Self { best, board }
    }

    fn save(&self) {
        if let Err(e) = storage::save_json(Self::BEST_KEY, &self.best) {
            log::warn!("Best record not saved: {}", e);
        }
        if let Err(e) = storage::save_json(Self::BOARD_KEY, &self.board) {
            log::warn!("Leaderboard not saved: {}", e);
        }
    }
}

impl ScoreStore for LocalScoreStore {
    fn record_session(&mut self, summary: &SessionSummary) {
        let improved = self.best.merge(summary);
        let rank = self.board.add(summary, now_ms());
        if let Some(rank) = rank {
            log::info!("Run ranked #{} with {} points", rank, summary.total_points);
        }
        if improved || rank.is_some() {
            self.save();
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total_points: i64, max_combo: u32, elapsed: f32) -> SessionSummary {
        SessionSummary {
            mode: GameMode::Survival,
            final_score: -5,
            peak_score: 100 + total_points / 2,
            total_points,
            max_combo,
            kills: max_combo,
            elapsed,
            wpm: 0.0,
        }
    }

    #[test]
    fn test_merge_keeps_each_best() {
        let mut best = BestRecord::default();
        assert!(best.merge(&summary(500, 12, 30.0)));
        assert!(best.merge(&summary(300, 20, 10.0)));
        assert_eq!(best.max_combo, 20);
        assert_eq!(best.total_points, 500);
        assert_eq!(best.longest_survival, 30.0);
        assert!(!best.merge(&summary(100, 5, 5.0)));
    }

    #[test]
    fn test_leaderboard_ranking() {
        let mut board = HighScores::new();
        assert_eq!(board.add(&summary(300, 1, 1.0), 0.0), Some(1));
        assert_eq!(board.add(&summary(500, 1, 1.0), 0.0), Some(1));
        assert_eq!(board.add(&summary(400, 1, 1.0), 0.0), Some(2));
        let points: Vec<i64> = board.entries.iter().map(|e| e.total_points).collect();
        assert_eq!(points, vec![500, 400, 300]);
        assert_eq!(board.top().unwrap().total_points, 500);
    }

    #[test]
    fn test_pointless_runs_do_not_qualify() {
        let mut board = HighScores::new();
        assert_eq!(board.add(&summary(0, 0, 3.0), 0.0), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_leaderboard_is_bounded() {
        let mut board = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as i64 {
            board.add(&summary(i * 100, 1, 1.0), 0.0);
        }
        assert!(!board.qualifies(50));
        assert_eq!(board.add(&summary(50, 1, 1.0), 0.0), None);
        assert_eq!(board.add(&summary(150, 1, 1.0), 0.0), Some(10));
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().unwrap().total_points, 150);
    }

    #[test]
    fn test_store_persists_and_reloads() {
        let mut store = LocalScoreStore::default();
        store.record_session(&summary(250, 7, 42.0));

        let reloaded = LocalScoreStore::load();
        assert_eq!(reloaded.best.max_combo, 7);
        assert_eq!(reloaded.best.total_points, 250);
        assert_eq!(reloaded.board.entries.len(), 1);
    }
}
