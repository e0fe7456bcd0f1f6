//! Scoring module - score and streak bookkeeping
//!
//! Rules:
//! - Correct guess: +10 points, streak +1.
//! - Incorrect guess: -3 points (floored at 0), streak reset.
//!
//! Every mutation is written through to the persisted store immediately.

use tracing::debug;

use crate::store::{read_u32, write_or_warn, KeyValueStore, KEY_SCORE, KEY_STREAK};
use crate::types::{CORRECT_POINTS, WRONG_PENALTY_POINTS};

/// Change produced by a single outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Signed score change actually applied (after the floor at 0).
    pub score_delta: i32,
    pub score: u32,
    pub streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    score: u32,
    streak: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the previous session's counters; missing values read as 0.
    pub fn restore(store: &dyn KeyValueStore) -> Self {
        Self {
            score: read_u32(store, KEY_SCORE).unwrap_or(0),
            streak: read_u32(store, KEY_STREAK).unwrap_or(0),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Apply one guess outcome and persist both counters.
    pub fn apply_outcome(&mut self, correct: bool, store: &mut dyn KeyValueStore) -> ScoreResult {
        let before = self.score;
        if correct {
            self.score = self.score.saturating_add(CORRECT_POINTS);
            self.streak = self.streak.saturating_add(1);
        } else {
            self.score = self.score.saturating_sub(WRONG_PENALTY_POINTS);
            self.streak = 0;
        }
        self.persist(store);

        let result = ScoreResult {
            score_delta: self.score as i32 - before as i32,
            score: self.score,
            streak: self.streak,
        };
        debug!(correct, score = result.score, streak = result.streak, "score updated");
        result
    }

    /// Zero both counters (new game) and persist.
    pub fn reset(&mut self, store: &mut dyn KeyValueStore) {
        self.score = 0;
        self.streak = 0;
        self.persist(store);
    }

    fn persist(&self, store: &mut dyn KeyValueStore) {
        write_or_warn(store, KEY_SCORE, &self.score.to_string());
        write_or_warn(store, KEY_STREAK, &self.streak.to_string());
    }
}
