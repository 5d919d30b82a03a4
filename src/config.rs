//! Sequencer configuration types and builder

pub use crate::error::BuilderError;
use crate::clock::ClockDivider;

/// Entries streamed by the bus synchronization handshake
pub const DEFAULT_SYNC_LEN: usize = 3;

/// Entries streamed from the initialization table
pub const DEFAULT_INIT_LEN: usize = 95;

/// Entries streamed from the frame-start table before every frame
pub const DEFAULT_FRAME_START_LEN: usize = 12;

/// Reset pulse width in milliseconds
pub const DEFAULT_RESET_HOLD_MS: u32 = 10;

/// Post-reset and post-init settle time in milliseconds
pub const DEFAULT_SETTLE_MS: u32 = 120;

/// Panel dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either side is zero.
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || height == 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Pixels streamed per frame
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Input clock rate and divisor of the tick source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Input clock rate in Hz
    pub input_hz: u32,
    /// Clock divider setting
    pub divisor: u32,
}

impl Timing {
    /// Create a timing description
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidTiming` if `input_hz` is zero.
    pub fn new(input_hz: u32, divisor: u32) -> Result<Self, BuilderError> {
        if input_hz == 0 {
            return Err(BuilderError::InvalidTiming);
        }
        Ok(Self { input_hz, divisor })
    }

    /// Protocol tick rate in Hz, rounded down
    pub fn tick_hz(&self) -> u32 {
        (u64::from(self.input_hz) / ClockDivider::period(self.divisor)) as u32
    }

    /// Convert a duration in milliseconds to protocol ticks, rounding up
    ///
    /// ```
    /// use tft8080::Timing;
    ///
    /// // 1 MHz input, divisor 4: one tick every 10 input cycles (100 kHz)
    /// let timing = Timing::new(1_000_000, 4).unwrap();
    /// assert_eq!(timing.ms_to_ticks(120), 12_000);
    /// ```
    pub fn ms_to_ticks(&self, ms: u32) -> u32 {
        let input_cycles = u64::from(ms) * u64::from(self.input_hz);
        let per_tick = 1000 * ClockDivider::period(self.divisor);
        u32::try_from(input_cycles.div_ceil(per_tick)).unwrap_or(u32::MAX)
    }
}

impl Default for Timing {
    fn default() -> Self {
        // 50 MHz input halved once
        Self {
            input_hz: 50_000_000,
            divisor: 0,
        }
    }
}

/// How table reads line up with the transfer cursor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadLatency {
    /// Table output follows the cursor in the same tick
    #[default]
    Combinational,
    /// Table output is registered one tick behind, addressed with the next cursor
    /// index but selected by the current state
    ///
    /// The first byte after the active table changes is read from the previous
    /// table for one cycle.
    Registered,
}

/// Sequencer configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Panel dimensions
    pub dimensions: Dimensions,
    /// Tick source timing used to convert delays
    pub timing: Timing,
    /// Entries sent by the synchronization handshake
    pub sync_len: usize,
    /// Entries sent from the initialization table
    pub init_len: usize,
    /// Entries sent from the frame-start table
    pub frame_start_len: usize,
    /// Ticks the reset line is held low
    pub reset_hold_ticks: u32,
    /// Ticks of each settle delay
    pub settle_ticks: u32,
    /// Table read pipeline model
    pub read_latency: ReadLatency,
}

impl Config {
    /// Check the invariants enforced by [`Builder::build`]
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` for a zero-sized panel,
    /// `BuilderError::InvalidTiming` for a zero input rate, or
    /// `BuilderError::ZeroLengthTransfer` if any transfer length is zero.
    pub fn validate(&self) -> Result<(), BuilderError> {
        let Dimensions { width, height } = self.dimensions;
        if width == 0 || height == 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        if self.timing.input_hz == 0 {
            return Err(BuilderError::InvalidTiming);
        }
        // The limit register still holds the previous phase's length on the first
        // tick of a phase, so every phase must strobe at least one entry.
        if self.sync_len == 0 || self.init_len == 0 || self.frame_start_len == 0 {
            return Err(BuilderError::ZeroLengthTransfer);
        }
        Ok(())
    }

    /// Pixels streamed per frame
    pub fn pixel_count(&self) -> usize {
        self.dimensions.pixel_count()
    }
}

#[derive(Clone, Copy, Debug)]
enum Span {
    Millis(u32),
    Ticks(u32),
}

impl Span {
    fn ticks(self, timing: &Timing) -> u32 {
        match self {
            Self::Millis(ms) => timing.ms_to_ticks(ms),
            Self::Ticks(ticks) => ticks,
        }
    }
}

/// Builder for constructing sequencer configuration
///
/// # Example
///
/// ```rust
/// use tft8080::{Builder, Dimensions, Timing};
///
/// let dims = match Dimensions::new(320, 240) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let timing = match Timing::new(10_000_000, 4) {
///     Ok(timing) => timing,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).timing(timing).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.pixel_count(), 76_800);
/// assert_eq!(config.settle_ticks, 120_000);
/// ```
#[must_use]
pub struct Builder {
    dimensions: Option<Dimensions>,
    timing: Timing,
    sync_len: usize,
    init_len: usize,
    frame_start_len: usize,
    reset_hold: Span,
    settle: Span,
    read_latency: ReadLatency,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            timing: Timing::default(),
            sync_len: DEFAULT_SYNC_LEN,
            init_len: DEFAULT_INIT_LEN,
            frame_start_len: DEFAULT_FRAME_START_LEN,
            reset_hold: Span::Millis(DEFAULT_RESET_HOLD_MS),
            settle: Span::Millis(DEFAULT_SETTLE_MS),
            read_latency: ReadLatency::Combinational,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set panel dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the tick source timing used to convert millisecond delays
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Set the synchronization handshake length
    pub fn sync_len(mut self, len: usize) -> Self {
        self.sync_len = len;
        self
    }

    /// Set the number of initialization entries streamed
    pub fn init_len(mut self, len: usize) -> Self {
        self.init_len = len;
        self
    }

    /// Set the number of frame-start entries streamed
    pub fn frame_start_len(mut self, len: usize) -> Self {
        self.frame_start_len = len;
        self
    }

    /// Set the reset pulse width in milliseconds
    pub fn reset_hold_ms(mut self, ms: u32) -> Self {
        self.reset_hold = Span::Millis(ms);
        self
    }

    /// Set the reset pulse width directly in ticks
    pub fn reset_hold_ticks(mut self, ticks: u32) -> Self {
        self.reset_hold = Span::Ticks(ticks);
        self
    }

    /// Set the settle delay in milliseconds
    pub fn settle_ms(mut self, ms: u32) -> Self {
        self.settle = Span::Millis(ms);
        self
    }

    /// Set the settle delay directly in ticks
    pub fn settle_ticks(mut self, ticks: u32) -> Self {
        self.settle = Span::Ticks(ticks);
        self
    }

    /// Select the table read pipeline model
    pub fn read_latency(mut self, latency: ReadLatency) -> Self {
        self.read_latency = latency;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set,
    /// `BuilderError::InvalidTiming` if the timing has a zero input rate, or
    /// `BuilderError::ZeroLengthTransfer` if any transfer length is zero.
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        let config = Config {
            dimensions,
            timing: self.timing,
            sync_len: self.sync_len,
            init_len: self.init_len,
            frame_start_len: self.frame_start_len,
            reset_hold_ticks: self.reset_hold.ticks(&self.timing),
            settle_ticks: self.settle.ticks(&self.timing),
            read_latency: self.read_latency,
        };
        config.validate()?;
        Ok(config)
    }
}
