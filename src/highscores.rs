//! Stage clear leaderboard
//!
//! Tracks the top 10 clears of the running process. Nothing is written to
//! disk; a fresh process starts with an empty board.

use serde::{Deserialize, Serialize};

use crate::sim::Session;

/// Maximum number of clears to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single stage clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearRecord {
    /// Final score including the coin bonus
    pub score: u64,
    /// Ticks from spawn to the goal
    pub clear_ticks: u64,
}

impl ClearRecord {
    /// Record for a session on its clear screen
    pub fn from_session(session: &Session) -> Self {
        Self {
            score: session.score(),
            clear_ticks: session.clear_elapsed_ticks(),
        }
    }

    /// Higher score ranks first; ties go to the faster clear
    fn beats(&self, other: &ClearRecord) -> bool {
        self.score > other.score || (self.score == other.score && self.clear_ticks < other.clear_ticks)
    }
}

/// Clear leaderboard, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<ClearRecord>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a clear makes the board
    pub fn qualifies(&self, record: &ClearRecord) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| record.beats(e)).unwrap_or(true)
    }

    /// Get the rank a clear would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, record: &ClearRecord) -> Option<usize> {
        if !self.qualifies(record) {
            return None;
        }
        let rank = self.entries.iter().position(|e| record.beats(e));
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a clear to the board (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add(&mut self, record: ClearRecord) -> Option<usize> {
        let rank = self.potential_rank(&record)?;
        self.entries.insert(rank - 1, record);
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!(
            "Clear ranked #{}: score {} in {} ticks",
            rank,
            record.score,
            record.clear_ticks
        );
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best clear (if any)
    pub fn best(&self) -> Option<&ClearRecord> {
        self.entries.first()
    }
}
