//! Guess text field for terminal environments.
//!
//! Commands are resolved through [`crate::map::handle_key_event`] first;
//! whatever is left over edits the bounded guess buffer.

use arrayvec::ArrayString;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::map::handle_key_event;
use crate::types::{GameAction, MAX_GUESS_LEN};

/// Tracks the text typed into the guess field.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    guess: ArrayString<MAX_GUESS_LEN>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one key press.
    ///
    /// Returns the mapped command, if any. Other printable keys are appended
    /// to the guess when `editable` is true; input past the field capacity
    /// is dropped.
    pub fn handle_key_press(&mut self, key: KeyEvent, editable: bool) -> Option<GameAction> {
        if let Some(action) = handle_key_event(key) {
            return Some(action);
        }
        if !editable {
            return None;
        }

        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let _ = self.guess.try_push(ch);
            }
            KeyCode::Backspace => {
                self.guess.pop();
            }
            _ => {}
        }
        None
    }

    pub fn guess(&self) -> &str {
        self.guess.as_str()
    }

    /// Take the current text, leaving the field empty.
    pub fn take_guess(&mut self) -> ArrayString<MAX_GUESS_LEN> {
        std::mem::take(&mut self.guess)
    }

    pub fn clear(&mut self) {
        self.guess.clear();
    }
}
