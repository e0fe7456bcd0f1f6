//! Emoji Guess (workspace facade crate).
//!
//! Exposes `emoji_guess::{core,input,store,term,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use emoji_guess_core as core;
pub use emoji_guess_input as input;
pub use emoji_guess_store as store;
pub use emoji_guess_term as term;
pub use emoji_guess_types as types;
