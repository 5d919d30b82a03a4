//! Bus monitor
//!
//! [`BusMonitor`] watches the bus line levels tick by tick, the way the panel
//! does, and reports every byte latched on a rising write strobe while chip select
//! is asserted. Useful for checking a table against what actually reaches the bus.
//!
//! ## Example
//!
//! ```
//! use embedded_hal::digital::PinState;
//! use tft8080::{BusMonitor, BusSignals, BusWrite};
//!
//! let mut monitor = BusMonitor::new();
//! let strobe = BusSignals { write_strobe: PinState::Low, data: 0x2A, ..BusSignals::RESET };
//! let latch = BusSignals { data: 0x2A, ..BusSignals::RESET };
//!
//! assert_eq!(monitor.observe(&strobe), None);
//! assert_eq!(monitor.observe(&latch), Some(BusWrite::Command(0x2A)));
//! ```

use embedded_hal::digital::PinState;

use crate::command::ParamWord;
use crate::interface::BusSignals;

/// One byte latched by the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusWrite {
    /// Byte latched with the data/command line low
    Command(u8),
    /// Byte latched with the data/command line high
    Data(u8),
}

impl BusWrite {
    /// Latched byte
    pub fn byte(self) -> u8 {
        match self {
            Self::Command(byte) | Self::Data(byte) => byte,
        }
    }

    /// Latched byte as a parameter table entry
    pub fn word(self) -> ParamWord {
        match self {
            Self::Command(byte) => ParamWord::command(byte),
            Self::Data(byte) => ParamWord::data(byte),
        }
    }
}

/// Panel-side view of the bus
#[derive(Clone, Copy, Debug, Default)]
pub struct BusMonitor {
    previous: Option<BusSignals>,
    latched: usize,
    reset_pulses: usize,
}

impl BusMonitor {
    /// Create a monitor that has not seen any tick yet
    pub const fn new() -> Self {
        Self {
            previous: None,
            latched: 0,
            reset_pulses: 0,
        }
    }

    /// Feed the line levels of one tick
    ///
    /// Returns the byte latched on this tick, if any.
    pub fn observe(&mut self, signals: &BusSignals) -> Option<BusWrite> {
        let previous = self.previous.replace(*signals)?;

        if previous.reset == PinState::Low && signals.reset == PinState::High {
            self.reset_pulses += 1;
        }

        let rising = previous.is_strobing() && !signals.is_strobing();
        if !rising || !signals.is_selected() {
            return None;
        }

        self.latched += 1;
        Some(if signals.is_command() {
            BusWrite::Command(signals.data)
        } else {
            BusWrite::Data(signals.data)
        })
    }

    /// Bytes latched so far
    pub fn latched(&self) -> usize {
        self.latched
    }

    /// Completed reset pulses (reset line released after being held low)
    pub fn reset_pulses(&self) -> usize {
        self.reset_pulses
    }
}
