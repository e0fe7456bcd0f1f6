//! Per-round state: the puzzle on screen and the misses spent on it.

use std::sync::Arc;

use crate::types::{PuzzleRecord, MAX_ATTEMPTS};

/// Verdict for a single guess within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessVerdict {
    Correct,
    /// Wrong, but the round continues.
    Incorrect { attempts_used: u32 },
    /// Wrong, and this miss used the last attempt.
    Exhausted,
}

#[derive(Debug, Clone, Default)]
pub struct RoundState {
    current: Option<Arc<PuzzleRecord>>,
    attempts_used: u32,
}

impl RoundState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a round on `puzzle`, clearing the attempt count.
    pub fn begin(&mut self, puzzle: Arc<PuzzleRecord>) {
        self.current = Some(puzzle);
        self.attempts_used = 0;
    }

    pub fn current(&self) -> Option<&Arc<PuzzleRecord>> {
        self.current.as_ref()
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Judge a guess. Only misses count against the attempt budget.
    ///
    /// Returns `None` when no puzzle is loaded.
    pub fn judge(&mut self, guess: &str) -> Option<GuessVerdict> {
        let puzzle = self.current.as_ref()?;
        if puzzle.matches(guess) {
            return Some(GuessVerdict::Correct);
        }

        self.attempts_used += 1;
        if self.attempts_used >= MAX_ATTEMPTS {
            Some(GuessVerdict::Exhausted)
        } else {
            Some(GuessVerdict::Incorrect {
                attempts_used: self.attempts_used,
            })
        }
    }
}
