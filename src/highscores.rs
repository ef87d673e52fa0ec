//! High score leaderboard
//!
//! Tracks the top 10 final scores. Persisted to LocalStorage on web and to a
//! JSON file on native.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "breakout_highscores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a score if it qualifies. Returns the rank achieved (1-indexed).
    pub fn add_score(&mut self, score: u64, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, timestamp };

        // Ties go below existing entries
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Feed every `GameOver` in `events` into the table.
    /// Returns the best rank achieved, if any score qualified.
    pub fn record(&mut self, events: &[GameEvent], timestamp: f64) -> Option<usize> {
        let mut best: Option<usize> = None;
        for event in events {
            if let GameEvent::GameOver { final_score } = *event {
                if let Some(rank) = self.add_score(final_score, timestamp) {
                    log::info!("New high score #{}: {}", rank, final_score);
                    best = Some(best.map_or(rank, |b| b.min(rank)));
                }
            }
        }
        best
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<HighScores>(&json) {
                    Ok(scores) => {
                        log::info!("Loaded {} high scores", scores.entries.len());
                        return scores;
                    }
                    Err(e) => log::warn!("Discarding unreadable high scores: {}", e),
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                match storage.set_item(Self::STORAGE_KEY, &json) {
                    Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
                    Err(e) => log::warn!("Failed to save high scores: {:?}", e),
                }
            }
        }
    }

    /// Load from a JSON file. A missing or unreadable file is an empty table.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No high scores at {}, starting fresh", path.display());
            return Self::new();
        }
        match Self::read_file(path) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Discarding unreadable high scores at {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn read_file(path: &std::path::Path) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let mut scores: HighScores = serde_json::from_str(&json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.potential_rank(0), None);
    }

    #[test]
    fn test_add_score_keeps_descending_order() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(50, 1.0), Some(1));
        assert_eq!(scores.add_score(80, 2.0), Some(1));
        assert_eq!(scores.add_score(60, 3.0), Some(2));
        // Tie ranks below the existing entry
        assert_eq!(scores.add_score(60, 4.0), Some(3));

        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![80, 60, 60, 50]);
        assert_eq!(scores.top_score(), Some(80));
    }

    #[test]
    fn test_table_is_capped() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(s * 10, 0.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert!(!scores.qualifies(10));
        assert_eq!(scores.potential_rank(55), Some(6));

        assert_eq!(scores.add_score(1000, 0.0), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_file_round_trip_and_missing_file() {
        let path = std::env::temp_dir().join(format!("breakout_scores_{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        assert!(HighScores::load_from(&path).is_empty());

        let mut scores = HighScores::new();
        scores.add_score(42, 1.0);
        scores.save_to(&path).unwrap();
        assert_eq!(HighScores::load_from(&path).top_score(), Some(42));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let path = std::env::temp_dir().join(format!("breakout_scores_bad_{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        assert!(HighScores::load_from(&path).is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_record_takes_game_over_events() {
        let mut scores = HighScores::new();
        scores.add_score(100, 0.0);

        let events = [
            GameEvent::BlockDestroyed { id: 1, points: 7 },
            GameEvent::GameOver { final_score: 50 },
            GameEvent::PlayerDied { lives_left: 0 },
            GameEvent::GameOver { final_score: 0 },
        ];
        assert_eq!(scores.record(&events, 5.0), Some(2));
        assert_eq!(scores.entries.len(), 2);
        assert_eq!(scores.record(&[GameEvent::WaveCleared], 6.0), None);
    }

    #[test]
    fn test_game_over_reaches_saved_table() {
        use crate::GameConfig;
        use crate::sim::GameManager;

        let mut manager = GameManager::new(GameConfig::default(), 7);
        manager.start();
        manager.reset_game();
        manager.add_player_score(12);
        // Burn through every life
        while manager.lives() > 1 {
            manager.player_died();
            manager.reset_game();
            manager.add_player_score(12);
        }
        manager.player_died();

        let mut scores = HighScores::new();
        assert_eq!(scores.record(&manager.drain_events(), 9.0), Some(1));
        assert_eq!(scores.top_score(), Some(12));

        let path = std::env::temp_dir().join(format!("breakout_scores_go_{}.json", std::process::id()));
        scores.save_to(&path).unwrap();
        assert_eq!(HighScores::load_from(&path).top_score(), Some(12));
        let _ = std::fs::remove_file(&path);
    }
}
