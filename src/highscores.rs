//! High score leaderboard system
//!
//! Persisted to a JSON file. Keeps the top 10 runs ranked by score, then depth.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::settings::write_json_atomic;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: i64,
    /// Seconds survived
    pub survival_secs: f32,
    /// Deepest row reached
    pub depth: u32,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

impl HighScoreEntry {
    /// Leaderboard ordering: score first, then the deeper run
    fn rank_key(&self) -> (i64, u32) {
        (self.score, self.depth)
    }
}

/// High score leaderboard, best run first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Index a run with this score and depth would be inserted at. Runs that
    /// tie an existing entry on both go below it.
    fn insertion_index(&self, score: i64, depth: u32) -> usize {
        self.entries.partition_point(|e| e.rank_key() >= (score, depth))
    }

    /// Whether a run would make the table. Scores of zero or less never do.
    pub fn qualifies(&self, score: i64, depth: u32) -> bool {
        score > 0 && self.insertion_index(score, depth) < MAX_HIGH_SCORES
    }

    /// 1-based rank the run would take, if it qualifies
    pub fn potential_rank(&self, score: i64, depth: u32) -> Option<usize> {
        self.qualifies(score, depth).then(|| self.insertion_index(score, depth) + 1)
    }

    /// Record a finished run. Returns its 1-based rank, or None if it did not
    /// make the table.
    pub fn add_score(
        &mut self,
        score: i64,
        survival_secs: f32,
        depth: u32,
        timestamp: u64,
    ) -> Option<usize> {
        if !self.qualifies(score, depth) {
            return None;
        }
        let index = self.insertion_index(score, depth);
        self.entries.insert(
            index,
            HighScoreEntry {
                score,
                survival_secs,
                depth,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }

    /// Re-establish ordering and size after loading a hand-edited file
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.rank_key().cmp(&a.rank_key()));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from a JSON file, starting fresh on any failure
    pub fn load(path: &Path) -> Self {
        let loaded = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))
            .and_then(|json| {
                serde_json::from_str::<HighScores>(&json)
                    .with_context(|| format!("parsing {}", path.display()))
            });

        match loaded {
            Ok(mut scores) => {
                scores.normalize();
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(err) => {
                log::info!("No high scores found, starting fresh ({err:#})");
                Self::new()
            }
        }
    }

    /// Save high scores to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_atomic(path, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
