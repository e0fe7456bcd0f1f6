//! Puzzle data source seam and the built-in fallback set.

use thiserror::Error;
use tracing::{info, warn};

use crate::types::PuzzleRecord;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read puzzle data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse puzzle data: {0}")]
    Parse(String),

    #[error("puzzle data contains no usable records")]
    Empty,
}

/// Supplies the puzzle collection for a session.
pub trait PuzzleSource {
    fn load(&self) -> Result<Vec<PuzzleRecord>, SourceError>;
}

/// The five records used when no external data can be loaded.
pub fn fallback_puzzles() -> Vec<PuzzleRecord> {
    vec![
        PuzzleRecord::new("🍎📱", "iphone", "Think Apple + phone"),
        PuzzleRecord::new("🎬🍿", "cinema", "Where you watch movies"),
        PuzzleRecord::new("🚗⛽", "gas", "Fuel for cars"),
        PuzzleRecord::new("🌙⭐", "night", "When the stars come out"),
        PuzzleRecord::new("☕📚", "study", "Coffee and books go together"),
    ]
}

/// Source that always yields the fallback set.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

impl PuzzleSource for BuiltinSource {
    fn load(&self) -> Result<Vec<PuzzleRecord>, SourceError> {
        Ok(fallback_puzzles())
    }
}

/// Load from `source`, canonicalising answers and dropping records without
/// an answer or emojis. Any failure, or an empty result, yields the fallback set.
pub fn load_puzzles(source: &dyn PuzzleSource) -> Vec<PuzzleRecord> {
    let loaded = source.load().and_then(|records| {
        let usable: Vec<PuzzleRecord> = records
            .into_iter()
            .map(PuzzleRecord::canonical)
            .filter(|p| !p.answer.is_empty() && !p.emojis.trim().is_empty())
            .collect();
        if usable.is_empty() {
            Err(SourceError::Empty)
        } else {
            Ok(usable)
        }
    });

    match loaded {
        Ok(records) => {
            info!(count = records.len(), "loaded puzzles");
            records
        }
        Err(err) => {
            warn!(%err, "failed to load puzzles, using fallback set");
            fallback_puzzles()
        }
    }
}
