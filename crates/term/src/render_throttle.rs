//! Frame pacing for the terminal loop.
//!
//! Most frames of a guessing game are identical, so redraws happen on a
//! fingerprint change and otherwise at a slow keep-alive interval.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Whether a frame should be drawn at `now_ms`.
    ///
    /// Renders immediately on the first call, on a fingerprint change, or
    /// when `force` is set (e.g. after a resize). Otherwise renders at most
    /// once per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, force: bool) -> bool {
        let changed = !self.has_rendered || force || fingerprint != self.last_fingerprint;
        let stale = now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;
        if !(changed || stale) {
            return false;
        }
        self.has_rendered = true;
        self.last_render_ms = now_ms;
        self.last_fingerprint = fingerprint;
        true
    }

    /// Forget the last frame so the next call always renders.
    pub fn reset(&mut self) {
        self.has_rendered = false;
    }
}
