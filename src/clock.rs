//! Derived tick source
//!
//! [`ClockDivider`] turns a fast input clock into the slower protocol tick. The
//! derived clock toggles every `divisor + 1` input ticks, so one protocol tick (a
//! rising edge of the derived clock) happens every `2 * (divisor + 1)` input ticks.
//!
//! The divisor is registered: a value written with [`ClockDivider::set_divisor`]
//! is sampled on the next input tick and only governs the tick after that.
//!
//! ## Example
//!
//! ```
//! use tft8080::ClockDivider;
//!
//! let mut divider = ClockDivider::new(1);
//! let ticks = (0..8).filter(|_| divider.step()).count();
//! assert_eq!(ticks, 2);
//! ```

/// Clock divider producing one protocol tick per `2 * (divisor + 1)` input ticks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockDivider {
    /// Divisor currently in effect
    divisor: u32,
    /// Divisor written by the caller, latched on the next input tick
    pending: u32,
    /// Input ticks since the last toggle
    count: u32,
    /// Derived clock level
    level: bool,
}

impl ClockDivider {
    /// Create a divider with the derived clock low
    pub const fn new(divisor: u32) -> Self {
        Self {
            divisor,
            pending: divisor,
            count: 0,
            level: false,
        }
    }

    /// Request a new divisor
    pub fn set_divisor(&mut self, divisor: u32) {
        self.pending = divisor;
    }

    /// Divisor currently governing the derived clock
    pub fn divisor(&self) -> u32 {
        self.divisor
    }

    /// Derived clock period in input ticks for `divisor`
    pub const fn period(divisor: u32) -> u64 {
        2 * (divisor as u64 + 1)
    }

    /// Advance by one input tick
    ///
    /// Returns `true` when the derived clock rises, i.e. when one protocol tick
    /// should run.
    pub fn step(&mut self) -> bool {
        let divisor = self.divisor;
        self.divisor = self.pending;

        if self.count >= divisor {
            self.count = 0;
            self.level = !self.level;
            self.level
        } else {
            self.count += 1;
            false
        }
    }
}

impl Default for ClockDivider {
    fn default() -> Self {
        Self::new(0)
    }
}
