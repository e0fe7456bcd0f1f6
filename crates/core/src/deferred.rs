//! Deferred callbacks with epoch tokens.
//!
//! Round advances and hint cool-downs fire after a fixed delay. Each entry
//! carries the epoch that was current when it was scheduled; the controller
//! bumps its epoch whenever a transition supersedes pending work, so a stale
//! entry never fires.

use arrayvec::ArrayVec;

/// Upper bound on simultaneously pending callbacks.
///
/// At most one round advance and one hint cool-down are pending at a time.
pub const MAX_PENDING: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredKind {
    AdvanceRound,
    HintCooldown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub kind: DeferredKind,
    pub remaining_ms: u32,
    pub epoch: u32,
}

#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    pending: ArrayVec<Deferred, MAX_PENDING>,
    epoch: u32,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Invalidate everything pending and start a new epoch.
    pub fn supersede(&mut self) -> u32 {
        self.pending.clear();
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }

    /// Schedule `kind` to fire after `delay_ms`.
    ///
    /// An existing entry of the same kind is replaced, so no kind is ever
    /// pending twice.
    pub fn schedule(&mut self, kind: DeferredKind, delay_ms: u32) {
        self.pending.retain(|d| d.kind != kind);
        let entry = Deferred {
            kind,
            remaining_ms: delay_ms,
            epoch: self.epoch,
        };
        // At most one entry per kind, and capacity covers every kind.
        self.pending.push(entry);
    }

    pub fn is_pending(&self, kind: DeferredKind) -> bool {
        self.pending.iter().any(|d| d.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance every entry by `elapsed_ms` and return those that came due,
    /// in scheduling order. Entries from an older epoch are dropped.
    pub fn advance(&mut self, elapsed_ms: u32) -> ArrayVec<DeferredKind, MAX_PENDING> {
        let epoch = self.epoch;
        let mut due = ArrayVec::new();

        self.pending.retain(|d| {
            if d.epoch != epoch {
                return false;
            }
            d.remaining_ms = d.remaining_ms.saturating_sub(elapsed_ms);
            if d.remaining_ms == 0 {
                due.push(d.kind);
                false
            } else {
                true
            }
        });

        due
    }
}
