use crate::types::{Difficulty, Phase, MAX_ATTEMPTS, TIMER_MAX_SECS};

/// Enabled/disabled state of each player control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlState {
    pub guess: bool,
    pub hint: bool,
    pub skip: bool,
    pub start: bool,
}

impl ControlState {
    pub const fn all_disabled() -> Self {
        Self {
            guess: false,
            hint: false,
            skip: false,
            start: true,
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::all_disabled()
    }
}

/// Render-ready copy of everything the player surface shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub emojis: String,
    pub message: String,
    pub score: u32,
    pub streak: u32,
    pub remaining_secs: u32,
    pub max_secs: u32,
    pub attempts_used: u32,
    pub max_attempts: u32,
    pub difficulty: Difficulty,
    pub controls: ControlState,
    pub start_label: &'static str,
    /// Increments every time a new puzzle is presented.
    pub round_id: u32,
    /// Increments on every start/restart.
    pub game_id: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            emojis: String::new(),
            message: String::new(),
            score: 0,
            streak: 0,
            remaining_secs: 0,
            max_secs: TIMER_MAX_SECS,
            attempts_used: 0,
            max_attempts: MAX_ATTEMPTS,
            difficulty: Difficulty::default(),
            controls: ControlState::default(),
            start_label: "Start",
            round_id: 0,
            game_id: 0,
        }
    }
}
