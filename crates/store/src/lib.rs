//! Persistence and environment adapters.
//!
//! Implements the core's external seams against the local filesystem:
//!
//! - [`JsonFileStore`]: the persisted key-value store (score, streak, difficulty)
//! - [`JsonPuzzleSource`]: puzzle records from a JSON file
//! - [`AppConfig`]: paths and seed from environment variables
//! - [`init_tracing`]: file-backed `tracing` subscriber
//!
//! # Example
//!
//! ```no_run
//! use emoji_guess_core::GameState;
//! use emoji_guess_store::{AppConfig, JsonFileStore, JsonPuzzleSource};
//!
//! let config = AppConfig::from_env();
//! let source = JsonPuzzleSource::new(&config.puzzles_path);
//! let store = JsonFileStore::open(&config.state_path);
//! let mut game = GameState::from_source(&source, config.seed, store);
//! game.start();
//! ```

pub mod config;
pub mod file_store;
pub mod logging;
pub mod puzzle_file;

pub use emoji_guess_core as core;
pub use emoji_guess_types as types;

pub use config::AppConfig;
pub use file_store::JsonFileStore;
pub use logging::init_tracing;
pub use puzzle_file::{parse_puzzles, JsonPuzzleSource};
