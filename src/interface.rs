//! Hardware interface abstraction
//!
//! This module provides [`BusSignals`], the value of every bus line after a
//! protocol tick, the [`ParallelBus`] trait that puts those values on hardware, and
//! [`Interface`], an implementation over embedded-hal output pins.
//!
//! ## Hardware Requirements
//!
//! An 8080-style 8-bit parallel TFT controller needs 12 GPIO outputs:
//! - **CS**: Chip select (active low)
//! - **WR**: Write strobe (active low, data latched on the rising edge)
//! - **RST**: Reset (active low)
//! - **DC**: Data/Command select (low=command, high=data)
//! - **D0..D7**: Data bus
//!
//! ## Example
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::digital::OutputPin;
//! use tft8080::{BusSignals, Interface, ParallelBus};
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let data = [MockPin, MockPin, MockPin, MockPin, MockPin, MockPin, MockPin, MockPin];
//! let mut interface = Interface::new(MockPin, MockPin, MockPin, MockPin, data);
//!
//! // Drive the lines to their reset levels
//! let _ = interface.write(&BusSignals::RESET);
//! ```

use core::fmt::Debug;
use embedded_hal::digital::{OutputPin, PinState};

/// Levels of every bus line after one protocol tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusSignals {
    /// Chip select (active low)
    pub chip_select: PinState,
    /// Write strobe (active low)
    pub write_strobe: PinState,
    /// Reset line (active low)
    pub reset: PinState,
    /// Data/command select (low=command, high=data)
    pub data_command: PinState,
    /// 8-bit data bus
    pub data: u8,
}

impl BusSignals {
    /// Line levels while the global reset is asserted
    pub const RESET: Self = Self {
        chip_select: PinState::Low,
        write_strobe: PinState::High,
        reset: PinState::Low,
        data_command: PinState::Low,
        data: 0,
    };

    /// Whether chip select is asserted
    pub fn is_selected(&self) -> bool {
        self.chip_select == PinState::Low
    }

    /// Whether the write strobe is asserted
    pub fn is_strobing(&self) -> bool {
        self.write_strobe == PinState::Low
    }

    /// Whether the data/command line selects a command byte
    pub fn is_command(&self) -> bool {
        self.data_command == PinState::Low
    }
}

/// Trait for putting [`BusSignals`] on hardware
///
/// For most cases, use the provided [`Interface`] struct. Implement this trait on
/// your own type to drive a GPIO port register in one write or to record traffic.
pub trait ParallelBus {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Drive every line to the levels in `signals`
    ///
    /// Implementations must settle the data bus and DC before releasing the write
    /// strobe, since the controller latches on the strobe's rising edge.
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO write fails.
    fn write(&mut self, signals: &BusSignals) -> Result<(), Self::Error>;
}

impl<T: ParallelBus + ?Sized> ParallelBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, signals: &BusSignals) -> Result<(), Self::Error> {
        T::write(self, signals)
    }
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Parallel bus over embedded-hal v1.0 output pins
///
/// Only lines whose level changed since the previous write are touched. The data
/// pins and DC are written first, then RST and CS, and WR last.
///
/// ## Type Parameters
///
/// * `CS` - Chip select pin implementing [`OutputPin`]
/// * `WR` - Write strobe pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `D` - Data bus pins (D0 first) implementing [`OutputPin`]
pub struct Interface<CS, WR, RST, DC, D> {
    cs: CS,
    wr: WR,
    rst: RST,
    dc: DC,
    data: [D; 8],
    /// Levels written by the last successful call
    last: Option<BusSignals>,
}

impl<CS, WR, RST, DC, D> Interface<CS, WR, RST, DC, D>
where
    CS: OutputPin,
    WR: OutputPin,
    RST: OutputPin,
    DC: OutputPin,
    D: OutputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `cs` - Chip select pin (active low)
    /// * `wr` - Write strobe pin (active low)
    /// * `rst` - Reset pin (active low)
    /// * `dc` - Data/Command pin (low=command, high=data)
    /// * `data` - Data bus pins, D0 at index 0
    pub fn new(cs: CS, wr: WR, rst: RST, dc: DC, data: [D; 8]) -> Self {
        Self {
            cs,
            wr,
            rst,
            dc,
            data,
            last: None,
        }
    }

    /// Forget the cached line levels so the next write drives every pin
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Release the pins
    pub fn release(self) -> (CS, WR, RST, DC, [D; 8]) {
        (self.cs, self.wr, self.rst, self.dc, self.data)
    }
}

impl<CS, WR, RST, DC, D, PinErr> ParallelBus for Interface<CS, WR, RST, DC, D>
where
    CS: OutputPin<Error = PinErr>,
    WR: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    D: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn write(&mut self, signals: &BusSignals) -> Result<(), Self::Error> {
        let previous = self.last;
        let changed = |line: fn(&BusSignals) -> PinState| {
            previous.is_none_or(|prev| line(&prev) != line(signals))
        };

        let toggled = previous.map_or(0xFF, |prev| prev.data ^ signals.data);
        for (bit, pin) in self.data.iter_mut().enumerate() {
            let mask = 1u8 << bit;
            if toggled & mask != 0 {
                pin.set_state(PinState::from(signals.data & mask != 0))
                    .map_err(InterfaceError::Pin)?;
            }
        }

        if changed(|s| s.data_command) {
            self.dc
                .set_state(signals.data_command)
                .map_err(InterfaceError::Pin)?;
        }
        if changed(|s| s.reset) {
            self.rst
                .set_state(signals.reset)
                .map_err(InterfaceError::Pin)?;
        }
        if changed(|s| s.chip_select) {
            self.cs
                .set_state(signals.chip_select)
                .map_err(InterfaceError::Pin)?;
        }
        if changed(|s| s.write_strobe) {
            self.wr
                .set_state(signals.write_strobe)
                .map_err(InterfaceError::Pin)?;
        }

        self.last = Some(*signals);
        Ok(())
    }
}
