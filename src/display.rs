//! Core display operations
//!
//! [`Display`] ties the protocol [`Sequencer`] to a [`ParallelBus`] and the
//! [`ClockDivider`]: every input clock cycle steps the divider, and every derived
//! tick steps the sequencer and drives the new line levels onto the bus.

use crate::clock::ClockDivider;
use crate::error::Error;
use crate::interface::ParallelBus;
use crate::sequencer::{Inputs, Sequencer};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Display driver for an 8080-style parallel TFT controller
///
/// ## Example
///
/// ```rust,no_run
/// use core::convert::Infallible;
/// use tft8080::command::{window_table, ParamWord};
/// use tft8080::{Builder, BusSignals, Dimensions, Display, Inputs, ParallelBus, Sequencer};
/// # struct MockBus;
/// # impl ParallelBus for MockBus {
/// #     type Error = Infallible;
/// #     fn write(&mut self, _signals: &BusSignals) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # let init = [ParamWord::command(0x00); 95];
/// let frame_start = window_table(320, 240);
/// let pixels = [0x001Fu16; 320];
///
/// let dims = match Dimensions::new(320, 240) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let sequencer = match Sequencer::new(config, &init, &frame_start, pixels) {
///     Ok(sequencer) => sequencer,
///     Err(_) => return,
/// };
///
/// let mut display = Display::new(MockBus, sequencer);
/// let _ = display.reset();
/// loop {
///     // Called once per input clock cycle
///     let _ = display.clock(Inputs::IDLE);
/// }
/// ```
pub struct Display<'a, I, P>
where
    I: ParallelBus,
{
    /// Hardware interface
    interface: I,
    /// Protocol registers and tables
    sequencer: Sequencer<'a, P>,
    /// Tick source
    divider: ClockDivider,
}

impl<'a, I, P> Display<'a, I, P>
where
    I: ParallelBus,
    P: AsRef<[u16]>,
{
    /// Create a new Display
    ///
    /// The divider starts with the divisor from the sequencer's timing.
    pub fn new(interface: I, sequencer: Sequencer<'a, P>) -> Self {
        let divider = ClockDivider::new(sequencer.config().timing.divisor);
        Self {
            interface,
            sequencer,
            divider,
        }
    }

    /// Reset the protocol and drive the reset line levels
    pub fn reset(&mut self) -> DisplayResult<I> {
        self.sequencer.reset();
        self.drive()
    }

    /// Run one input clock cycle
    ///
    /// Returns `true` if the divider produced a protocol tick.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if driving the bus fails.
    pub fn clock(&mut self, inputs: Inputs) -> Result<bool, Error<I>> {
        if !self.divider.step() {
            return Ok(false);
        }
        self.tick(inputs)?;
        Ok(true)
    }

    /// Run one protocol tick, bypassing the divider
    pub fn tick(&mut self, inputs: Inputs) -> DisplayResult<I> {
        self.sequencer.tick(inputs);
        self.drive()
    }

    /// Tick until the frame in progress has been streamed
    ///
    /// Runs the power-on sequence first if it has not completed yet. Returns the
    /// number of protocol ticks run.
    pub fn flush_frame(&mut self) -> Result<u64, Error<I>> {
        let start_ticks = self.sequencer.ticks();
        let target = self.sequencer.frames() + 1;
        while self.sequencer.frames() < target {
            self.tick(Inputs::IDLE)?;
        }
        Ok(self.sequencer.ticks() - start_ticks)
    }

    /// Request a new clock divisor (applied from the next input cycle)
    ///
    /// The reset hold and settle delays stay at the tick counts computed from the
    /// configured timing, so their wall-clock length scales with the new period.
    pub fn set_divisor(&mut self, divisor: u32) {
        self.divider.set_divisor(divisor);
    }

    /// Access the sequencer
    pub fn sequencer(&self) -> &Sequencer<'a, P> {
        &self.sequencer
    }

    /// Mutable access to the sequencer, e.g. to update the pixel buffer
    pub fn sequencer_mut(&mut self) -> &mut Sequencer<'a, P> {
        &mut self.sequencer
    }

    /// Release the interface and the sequencer
    pub fn release(self) -> (I, Sequencer<'a, P>) {
        (self.interface, self.sequencer)
    }

    fn drive(&mut self) -> DisplayResult<I> {
        let signals = self.sequencer.signals();
        self.interface.write(&signals).map_err(Error::Interface)
    }
}
