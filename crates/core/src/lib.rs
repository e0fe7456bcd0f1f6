//! Game controller for the emoji guessing game. Time only moves when the
//! caller ticks it, so every rule can be exercised without a clock.
//!
//! This module contains the puzzle round lifecycle and the scoring state
//! machine. It has no dependencies on terminals or file formats; persistence
//! and puzzle loading sit behind the [`KeyValueStore`] and [`PuzzleSource`]
//! traits, making it:
//!
//! - **Deterministic**: Same seed produces the same puzzle order
//! - **Testable**: Time only moves when the caller feeds elapsed milliseconds
//! - **Portable**: Can run behind any front end (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`rng`]: LCG + shuffle-bag puzzle queue (every puzzle once per cycle)
//! - [`timer`]: countdown clamped to `[0, max]` with bonus/penalty adjustments
//! - [`scoring`]: score and streak, written through to the store
//! - [`round`]: current puzzle and attempt budget
//! - [`deferred`]: delayed callbacks guarded by epoch tokens
//! - [`game_state`]: the controller tying everything together
//! - [`source`] / [`store`]: external collaborator seams
//!
//! # Game Rules
//!
//! - **Correct guess**: +10 points, streak +1, +5s, next round after 1200ms
//! - **Wrong guess**: -3 points (floor 0), streak reset, -3s
//! - **Three misses**: the round moves on after 1200ms
//! - **Timer at zero**: game over; only Start is accepted
//! - **Hint**: shows the hint, then locks the hint control for 1000ms
//!
//! # Example
//!
//! ```
//! use emoji_guess_core::{GameState, GuessOutcome};
//! use emoji_guess_types::Phase;
//!
//! let mut game = GameState::with_fallback(12345);
//! game.start();
//!
//! let answer = game.current_puzzle().unwrap().answer.clone();
//! assert_eq!(game.submit_guess(&answer), GuessOutcome::Correct);
//! assert_eq!(game.score(), 10);
//!
//! // The next puzzle appears after the transition delay.
//! game.tick(1200);
//! assert_eq!(game.phase(), Phase::Active);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. The countdown and all deferred callbacks advance
//! from the same value, so a tick arriving after a superseding transition
//! is always a no-op.

pub mod deferred;
pub mod game_state;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod snapshot;
pub mod source;
pub mod store;
pub mod timer;

pub use emoji_guess_types as types;

// Flattened paths for the facade crate.
pub use deferred::{DeferredKind, DeferredQueue};
pub use game_state::{GameState, GuessOutcome};
pub use rng::{PuzzleQueue, SimpleRng};
pub use round::{GuessVerdict, RoundState};
pub use scoring::{ScoreResult, ScoreTracker};
pub use snapshot::{ControlState, GameSnapshot};
pub use source::{fallback_puzzles, load_puzzles, BuiltinSource, PuzzleSource, SourceError};
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use timer::{CountdownTimer, TimerEvent, TimerState};
