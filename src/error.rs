//! Error types for the driver
//!
//! This module defines error types for configuration and table validation
//! ([`BuilderError`]) and for driving the bus pins ([`Error`]).
//!
//! The protocol core itself has no runtime error channel: once a
//! [`Sequencer`](crate::Sequencer) is built, every tick succeeds.
//!
//! ## Example
//!
//! ```
//! use tft8080::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Zero-sized panel
//! assert!(Dimensions::new(0, 240).is_err());
//! ```

use crate::interface::ParallelBus;

/// Lookup table identifiers used in validation errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    /// Initialization command/parameter table
    Init,
    /// Per-frame window-set table
    FrameStart,
    /// RGB565 pixel buffer
    Pixels,
}

/// Errors that can occur while driving the display
///
/// Generic over the interface type to preserve the specific error type.
pub enum Error<I: ParallelBus> {
    /// Interface error (GPIO)
    ///
    /// Wraps the underlying hardware error from the [`ParallelBus`] implementation.
    Interface(I::Error),
}

impl<I: ParallelBus> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
        }
    }
}

impl<I: ParallelBus> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
        }
    }
}

impl<I: ParallelBus> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration or attaching tables
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Width or height is zero
    InvalidDimensions {
        /// Width in pixels requested
        width: u16,
        /// Height in pixels requested
        height: u16,
    },
    /// Input clock rate of zero
    InvalidTiming,
    /// A parameter transfer was configured with zero entries
    ZeroLengthTransfer,
    /// A parameter table holds fewer entries than its transfer length
    TableTooShort {
        /// Table being validated
        table: TableKind,
        /// Entries the configured transfer reads
        required: usize,
        /// Entries provided
        provided: usize,
    },
    /// The pixel buffer has no entries to stream
    EmptyPixelBuffer,
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions {width}x{height}")
            }
            Self::InvalidTiming => write!(f, "Input clock rate must be nonzero"),
            Self::ZeroLengthTransfer => write!(f, "Transfer lengths must be nonzero"),
            Self::TableTooShort {
                table,
                required,
                provided,
            } => write!(
                f,
                "{table:?} table too short: required {required} entries, provided {provided}"
            ),
            Self::EmptyPixelBuffer => write!(f, "Pixel buffer is empty"),
        }
    }
}

impl core::error::Error for BuilderError {}
