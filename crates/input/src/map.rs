//! Translates crossterm key events into game actions.
//!
//! Plain characters are guess text, so every command sits on a function
//! key or a Ctrl chord.

use crate::types::{Difficulty, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action bound to `key`, if any.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => Some(GameAction::Submit),
        KeyCode::Tab => Some(GameAction::Skip),

        // Chords
        KeyCode::Char('s') | KeyCode::Char('S') if ctrl => Some(GameAction::Skip),
        KeyCode::Char('t') | KeyCode::Char('T') if ctrl => Some(GameAction::Hint),
        KeyCode::Char('r') | KeyCode::Char('R') if ctrl => Some(GameAction::Start),

        // Function keys
        KeyCode::F(5) => Some(GameAction::Start),
        KeyCode::F(1) => Some(GameAction::SelectDifficulty(Difficulty::Easy)),
        KeyCode::F(2) => Some(GameAction::SelectDifficulty(Difficulty::Medium)),
        KeyCode::F(3) => Some(GameAction::SelectDifficulty(Difficulty::Hard)),

        _ => None,
    }
}

/// Ctrl-C, Esc and `q` outside the guess field leave the program.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
