//! Shared vocabulary of the emoji guessing game: puzzles, actions, phases
//! and the tuning constants every crate agrees on.
//!
//! All types are plain data with no I/O, making them usable in any context
//! (core logic, terminal rendering, persistence adapters).
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds unless the name says otherwise:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 50 | Fixed timestep of the terminal game loop |
//! | `TIMER_TICK_MS` | 1000 | One countdown second |
//! | `ROUND_ADVANCE_DELAY_MS` | 1200 | Pause before the next puzzle is shown |
//! | `HINT_COOLDOWN_MS` | 1000 | Hint button lockout after a hint |
//! | `TIMER_MAX_SECS` | 120 | Upper clamp for the countdown |
//!
//! # Scoring
//!
//! | Outcome | Score | Streak | Timer |
//! |---------|-------|--------|-------|
//! | correct | +10 | +1 | +5s |
//! | incorrect | -3 (floor 0) | reset to 0 | -3s |
//!
//! # Examples
//!
//! ```
//! use emoji_guess_types::{Difficulty, GameAction, PuzzleRecord};
//!
//! let difficulty = Difficulty::from_str("HARD").unwrap();
//! assert_eq!(difficulty.start_secs(), 30);
//!
//! let puzzle = PuzzleRecord::new("🌙⭐", " Night ", "When the stars come out");
//! assert_eq!(puzzle.answer, "night");
//!
//! assert_eq!(GameAction::from_str("skip"), Some(GameAction::Skip));
//! ```

use serde::{Deserialize, Serialize};

/// Fixed timestep interval of the terminal loop in milliseconds.
pub const FRAME_MS: u32 = 50;

/// Length of one countdown second in milliseconds.
pub const TIMER_TICK_MS: u32 = 1000;

/// Delay between finishing a round and presenting the next puzzle.
pub const ROUND_ADVANCE_DELAY_MS: u32 = 1200;

/// Hint lockout window after a hint has been shown.
pub const HINT_COOLDOWN_MS: u32 = 1000;

/// Upper bound for the countdown (seconds).
pub const TIMER_MAX_SECS: u32 = 120;

/// Seconds added to the countdown on a correct guess.
pub const CORRECT_TIME_BONUS_SECS: i32 = 5;

/// Seconds removed from the countdown on an incorrect guess.
pub const WRONG_TIME_PENALTY_SECS: i32 = 3;

/// Points awarded for a correct guess.
pub const CORRECT_POINTS: u32 = 10;

/// Points removed for an incorrect guess (score floors at 0).
pub const WRONG_PENALTY_POINTS: u32 = 3;

/// Incorrect guesses allowed per round before it auto-advances.
pub const MAX_ATTEMPTS: u32 = 3;

/// Capacity of the guess text field, in bytes.
pub const MAX_GUESS_LEN: usize = 64;


/// One puzzle: an emoji sequence, its canonical answer and a hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub emojis: String,
    pub answer: String,
    pub hint: String,
}

impl PuzzleRecord {
    /// Build a record, canonicalising the answer (trimmed, lowercase).
    pub fn new(emojis: impl Into<String>, answer: impl AsRef<str>, hint: impl Into<String>) -> Self {
        Self {
            emojis: emojis.into(),
            answer: normalize_guess(answer.as_ref()),
            hint: hint.into(),
        }
    }

    /// Return the record with its answer canonicalised.
    ///
    /// Records deserialized from external data go through this before use.
    pub fn canonical(self) -> Self {
        let answer = normalize_guess(&self.answer);
        Self { answer, ..self }
    }

    /// Exact comparison of a raw guess against the canonical answer.
    ///
    /// ```
    /// use emoji_guess_types::PuzzleRecord;
    ///
    /// let p = PuzzleRecord::new("🚗⛽", "gas", "Fuel for cars");
    /// assert!(p.matches("  GAS "));
    /// assert!(!p.matches("petrol"));
    /// ```
    pub fn matches(&self, guess: &str) -> bool {
        normalize_guess(guess) == self.answer
    }
}

/// Normalise free-form input into the comparable form (trimmed, lowercase).
pub fn normalize_guess(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Difficulty presets controlling the starting countdown value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Starting countdown value in seconds.
    pub fn start_secs(&self) -> u32 {
        match self {
            Difficulty::Easy => 60,
            Difficulty::Medium => 45,
            Difficulty::Hard => 30,
        }
    }

    /// Parse a difficulty key (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Lowercase key used for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Controller lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No game started yet.
    #[default]
    Idle,
    /// Round in progress, guesses accepted.
    Active,
    /// Round finished; next puzzle pending.
    BetweenRounds,
    /// Countdown expired; input rejected until restart.
    GameOver,
}

impl Phase {
    /// Whether a game is in progress (between start and game over).
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Active | Phase::BetweenRounds)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Active => "active",
            Phase::BetweenRounds => "betweenRounds",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Game actions that can be applied to the controller.
///
/// Submitting a guess carries text and goes through
/// `GameState::submit_guess` instead; `Submit` only signals intent
/// from the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Start, or restart a running game
    Start,
    /// Submit the text currently in the guess field
    Submit,
    /// Reveal the current puzzle's hint
    Hint,
    /// Abandon the current puzzle
    Skip,
    /// Change the difficulty preset
    SelectDifficulty(Difficulty),
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use emoji_guess_types::{Difficulty, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("start"), Some(GameAction::Start));
    /// assert_eq!(
    ///     GameAction::from_str("difficulty:medium"),
    ///     Some(GameAction::SelectDifficulty(Difficulty::Medium))
    /// );
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if let Some(key) = lower.strip_prefix("difficulty:") {
            return Difficulty::from_str(key).map(GameAction::SelectDifficulty);
        }
        match lower.as_str() {
            "start" | "restart" => Some(GameAction::Start),
            "submit" | "guess" => Some(GameAction::Submit),
            "hint" => Some(GameAction::Hint),
            "skip" => Some(GameAction::Skip),
            _ => None,
        }
    }
}
