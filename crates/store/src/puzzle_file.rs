//! Puzzle data loaded from a JSON file.
//!
//! The file holds an array of `{ "emojis", "answer", "hint" }` objects.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{PuzzleSource, SourceError};
use crate::types::PuzzleRecord;

#[derive(Debug, Clone)]
pub struct JsonPuzzleSource {
    path: PathBuf,
}

impl JsonPuzzleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse a puzzle document.
pub fn parse_puzzles(json: &str) -> Result<Vec<PuzzleRecord>, SourceError> {
    serde_json::from_str(json).map_err(|e| SourceError::Parse(e.to_string()))
}

impl PuzzleSource for JsonPuzzleSource {
    fn load(&self) -> Result<Vec<PuzzleRecord>, SourceError> {
        let raw = fs::read_to_string(&self.path)?;
        parse_puzzles(&raw)
    }
}
