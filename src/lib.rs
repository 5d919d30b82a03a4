//! 8080 Parallel-Bus TFT Protocol Sequencer
//!
//! A tick-stepped sequencer for TFT display controllers on an 8-bit, 8080-style
//! parallel bus (ILI9341 and friends). It times the reset pulse and settle delays,
//! streams the initialization table, re-issues the drawing window before every frame
//! and then streams RGB565 pixels, low byte first.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Deterministic, cycle-level protocol model with atomic register updates
//! - Configurable clock divider, delays and table lengths
//! - Frame restart on an external new-frame signal
//!
//! ## Usage
//!
//! ```rust
//! use tft8080::command::{window_table, ParamWord};
//! use tft8080::{Builder, BusMonitor, Dimensions, Inputs, Sequencer};
//!
//! let init = [ParamWord::command(0x00); 95];
//! let frame_start = window_table(2, 2);
//! let pixels = [0xF800u16; 4];
//!
//! let dims = match Dimensions::new(2, 2) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new()
//!     .dimensions(dims)
//!     .reset_hold_ticks(1)
//!     .settle_ticks(1)
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut sequencer = match Sequencer::new(config, &init, &frame_start, pixels) {
//!     Ok(sequencer) => sequencer,
//!     Err(_) => return,
//! };
//!
//! let mut monitor = BusMonitor::new();
//! let mut latched = 0;
//! while sequencer.frames() == 0 {
//!     let signals = sequencer.tick(Inputs::IDLE);
//!     if monitor.observe(&signals).is_some() {
//!         latched += 1;
//!     }
//! }
//! // sync + init + window + two bytes per pixel
//! assert_eq!(latched, 3 + 95 + 12 + 2 * 4);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Derived tick source
pub mod clock;
/// Parameter table words and DCS command definitions
pub mod command;
/// Sequencer configuration types and builder
pub mod config;
/// Address and byte-phase counter
pub mod cursor;
/// Hardware driver
pub mod display;
/// Error types for the driver
pub mod error;
/// Parallel bus abstraction
pub mod interface;
/// Bus write decoder
pub mod monitor;
/// Tick-step driver
pub mod sequencer;
/// Protocol state machine
pub mod state;
/// Delay countdown
pub mod timer;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use clock::ClockDivider;
pub use command::ParamWord;
pub use config::{Builder, Config, Dimensions, ReadLatency, Timing};
pub use cursor::{BytePhase, TransferCursor};
pub use display::Display;
pub use error::{BuilderError, Error, TableKind};
pub use interface::{BusSignals, Interface, InterfaceError, ParallelBus};
pub use monitor::{BusMonitor, BusWrite};
pub use sequencer::{Inputs, Registers, Sequencer};
pub use state::ProtocolState;
pub use timer::DelayTimer;

#[cfg(feature = "graphics")]
pub use graphics::FrameBuffer;
