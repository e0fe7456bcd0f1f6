//! Runtime configuration from environment variables.
//!
//! - `EMOJI_GUESS_DATA_DIR`: base directory (default: "data")
//! - `EMOJI_GUESS_PUZZLES`: puzzle file (default: `<data_dir>/puzzles.json`)
//! - `EMOJI_GUESS_STATE`: persisted state file (default: `<data_dir>/state.json`)
//! - `EMOJI_GUESS_LOG`: log file (default: `<data_dir>/emoji-guess.log`; empty disables logging)
//! - `EMOJI_GUESS_SEED`: shuffle seed (default: derived from the clock)

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub puzzles_path: PathBuf,
    pub state_path: PathBuf,
    pub log_path: Option<PathBuf>,
    pub seed: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, seeding from the clock when
    /// `EMOJI_GUESS_SEED` is unset or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::with_seed_fallback(lookup, clock_seed)
    }

    /// Like [`AppConfig::from_lookup`] with an explicit fallback seed source.
    pub fn with_seed_fallback(
        lookup: impl Fn(&str) -> Option<String>,
        fallback_seed: impl FnOnce() -> u32,
    ) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let data_dir = var("EMOJI_GUESS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));

        let puzzles_path = var("EMOJI_GUESS_PUZZLES")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("puzzles.json"));

        let state_path = var("EMOJI_GUESS_STATE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("state.json"));

        // Set but empty means "no log file".
        let log_path = match lookup("EMOJI_GUESS_LOG") {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(PathBuf::from(raw.trim())),
            None => Some(data_dir.join("emoji-guess.log")),
        };

        let seed = var("EMOJI_GUESS_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(fallback_seed);

        Self {
            data_dir,
            puzzles_path,
            state_path,
            log_path,
            seed,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
