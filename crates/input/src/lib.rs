//! Terminal input module (controller-facing).
//!
//! Independent of any UI framework: maps `crossterm` key events into
//! [`crate::types::GameAction`] and owns the bounded guess text field.

pub mod handler;
pub mod map;

pub use emoji_guess_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
