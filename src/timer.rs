//! Delay timer gating the protocol state machine
//!
//! The [`DelayTimer`] is a countdown register. While it holds a nonzero value the
//! state machine does not evaluate transitions; the timer only counts down.
//!
//! ## Example
//!
//! ```
//! use tft8080::DelayTimer;
//!
//! let mut timer = DelayTimer::new();
//! assert!(timer.is_expired());
//!
//! timer.arm(2);
//! timer.tick();
//! assert!(!timer.is_expired());
//! timer.tick();
//! assert!(timer.is_expired());
//! ```

/// Countdown register measured in protocol ticks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DelayTimer {
    remaining: u32,
}

impl DelayTimer {
    /// Create an expired timer
    pub const fn new() -> Self {
        Self { remaining: 0 }
    }

    /// Load the countdown with `ticks`
    pub fn arm(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    /// Decrement by one tick, saturating at zero
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// True once the countdown has reached zero
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Ticks left before the timer expires
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Expire the timer immediately
    pub fn clear(&mut self) {
        self.remaining = 0;
    }
}
