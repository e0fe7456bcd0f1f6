//! RNG module - shuffled, non-repeating puzzle traversal
//!
//! The puzzle queue works like a shuffle bag: every record is dealt once in a
//! random order, and the bag is reshuffled when it runs dry.
//!
//! Also provides a simple LCG so a seed reproduces the same deal order.

use std::sync::Arc;

use crate::source::fallback_puzzles;
use crate::types::PuzzleRecord;

/// Deterministic linear congruential generator for puzzle shuffles.
/// Multiplier and increment come from Numerical Recipes.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seeded generator; the seed is scrambled before first use.
    ///
    /// The seed is run through a murmur3 finalizer first so nearby seeds
    /// (clock values, 1, 2, 3...) start from unrelated states.
    pub fn new(seed: u32) -> Self {
        Self { state: mix32(seed) }
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        // state = a * state + c, wrapping at 2^32
        // a = 1664525, c = 1013904223
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a uniform value in range [0, max)
    ///
    /// Takes the high bits of a 32x32 multiply (the LCG's low bits have short
    /// periods) and rejects the few draws that would bias the result.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max <= 1 {
            return 0;
        }
        let threshold = max.wrapping_neg() % max;
        loop {
            let m = self.next_u32() as u64 * max as u64;
            if (m as u32) >= threshold {
                return (m >> 32) as u32;
            }
        }
    }

    /// Shuffle a slice in place using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

}

/// murmur3 32-bit finalizer.
fn mix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Shuffle-bag over the loaded puzzles.
#[derive(Debug, Clone)]
pub struct PuzzleQueue {
    /// Current deal order
    order: Vec<Arc<PuzzleRecord>>,
    /// Index of the next record to deal, in `0..=order.len()`
    cursor: usize,
    /// Completed reshuffles (the initial shuffle is not counted)
    cycles: u32,
    rng: SimpleRng,
}

impl PuzzleQueue {
    /// Create a queue over `records`, shuffled with `seed`.
    ///
    /// Returns `None` for an empty record set.
    pub fn new(records: Vec<Arc<PuzzleRecord>>, seed: u32) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        Some(Self::build(records, seed))
    }

    /// Queue over the built-in fallback set.
    pub fn fallback(seed: u32) -> Self {
        Self::build(fallback_puzzles().into_iter().map(Arc::new).collect(), seed)
    }

    fn build(records: Vec<Arc<PuzzleRecord>>, seed: u32) -> Self {
        let mut queue = Self {
            order: records,
            cursor: 0,
            cycles: 0,
            rng: SimpleRng::new(seed),
        };
        queue.rng.shuffle(&mut queue.order);
        queue
    }

    /// Convenience constructor from owned records.
    pub fn from_records(records: Vec<PuzzleRecord>, seed: u32) -> Option<Self> {
        Self::new(records.into_iter().map(Arc::new).collect(), seed)
    }

    fn reshuffle(&mut self) {
        self.rng.shuffle(&mut self.order);
        self.cursor = 0;
        self.cycles = self.cycles.wrapping_add(1);
    }

    /// Deal the next puzzle, reshuffling first if the bag is exhausted.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Arc<PuzzleRecord> {
        if self.cursor >= self.order.len() {
            self.reshuffle();
        }

        let puzzle = Arc::clone(&self.order[self.cursor]);
        self.cursor += 1;
        puzzle
    }

    /// Peek at the next puzzle without dealing it.
    ///
    /// When the bag is exhausted this previews the next shuffle using a copy
    /// of the RNG, so the preview always matches the following `next()`.
    pub fn peek(&self) -> Arc<PuzzleRecord> {
        if let Some(p) = self.order.get(self.cursor) {
            return Arc::clone(p);
        }

        let mut preview_rng = self.rng.clone();
        let mut next_order = self.order.clone();
        preview_rng.shuffle(&mut next_order);
        Arc::clone(&next_order[0])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false; an empty queue cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Records left before the next reshuffle.
    pub fn remaining_in_cycle(&self) -> usize {
        self.order.len() - self.cursor
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }
}
