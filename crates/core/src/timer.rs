//! Countdown timer driven by the fixed-timestep loop.
//!
//! The timer never owns a clock. Callers feed elapsed milliseconds through
//! [`CountdownTimer::advance`] and whole seconds are peeled off an
//! accumulator. Every `start` opens a new schedule generation, which drops any
//! partially accumulated second from the previous schedule.

use crate::types::{TIMER_MAX_SECS, TIMER_TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Stopped,
    Running,
    Expired,
}

/// Result of feeding time or an adjustment into the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Nothing observable happened.
    Idle,
    /// `remaining` changed but is still above zero.
    Ticked,
    /// `remaining` reached zero while running.
    Expired,
}

#[derive(Debug, Clone)]
pub struct CountdownTimer {
    remaining: u32,
    max: u32,
    state: TimerState,
    /// Milliseconds accumulated toward the next whole second.
    accum_ms: u32,
    /// Generation of the active schedule; bumped on every start/stop.
    schedule_id: u32,
}

impl CountdownTimer {
    pub fn new(max: u32) -> Self {
        Self {
            remaining: 0,
            max,
            state: TimerState::Stopped,
            accum_ms: 0,
            schedule_id: 0,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn schedule_id(&self) -> u32 {
        self.schedule_id
    }

    fn clamp(&self, value: i64) -> u32 {
        value.clamp(0, self.max as i64) as u32
    }

    /// Write `remaining` directly, clamped to `[0, max]`.
    pub fn set(&mut self, value: i64) {
        self.remaining = self.clamp(value);
    }

    /// Begin counting down from `start_secs`, replacing any prior schedule.
    pub fn start(&mut self, start_secs: u32) {
        self.remaining = self.clamp(start_secs as i64);
        self.accum_ms = 0;
        self.schedule_id = self.schedule_id.wrapping_add(1);
        self.state = if self.remaining == 0 {
            TimerState::Expired
        } else {
            TimerState::Running
        };
    }

    /// Cancel the schedule. `remaining` is kept for display.
    pub fn stop(&mut self) {
        if self.state != TimerState::Stopped {
            self.schedule_id = self.schedule_id.wrapping_add(1);
        }
        self.state = TimerState::Stopped;
        self.accum_ms = 0;
    }

    fn expire(&mut self) -> TimerEvent {
        self.state = TimerState::Expired;
        self.accum_ms = 0;
        TimerEvent::Expired
    }

    /// Feed elapsed wall time. No-op unless running.
    pub fn advance(&mut self, elapsed_ms: u32) -> TimerEvent {
        if self.state != TimerState::Running {
            return TimerEvent::Idle;
        }

        self.accum_ms = self.accum_ms.saturating_add(elapsed_ms);
        let mut ticked = false;
        while self.accum_ms >= TIMER_TICK_MS {
            self.accum_ms -= TIMER_TICK_MS;
            self.remaining = self.remaining.saturating_sub(1);
            ticked = true;
            if self.remaining == 0 {
                return self.expire();
            }
        }

        if ticked {
            TimerEvent::Ticked
        } else {
            TimerEvent::Idle
        }
    }

    /// Apply a bonus (positive) or penalty (negative) in seconds.
    ///
    /// A penalty that empties a running timer expires it immediately.
    pub fn adjust(&mut self, delta_secs: i32) -> TimerEvent {
        let before = self.remaining;
        self.remaining = self.clamp(self.remaining as i64 + delta_secs as i64);

        if self.state == TimerState::Running && self.remaining == 0 {
            return self.expire();
        }
        if self.remaining != before {
            TimerEvent::Ticked
        } else {
            TimerEvent::Idle
        }
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new(TIMER_MAX_SECS)
    }
}
