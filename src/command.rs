//! Parameter table entries and display command bytes
//!
//! The init and frame-start tables are sequences of 9-bit [`ParamWord`]s: bit 8
//! flags a command byte, bits 0..8 hold the byte itself. While a parameter table is
//! streaming, the data/command line follows that flag entry by entry (low for a
//! command, high for a parameter).
//!
//! The table contents are panel configuration. This module only supplies the
//! entry type, the MIPI DCS command bytes common to 8080-bus TFT controllers, and
//! [`window_table`] for building a frame-start table.
//!
//! ## Example
//!
//! ```
//! use tft8080::command::{self, ParamWord};
//!
//! let init = [
//!     ParamWord::command(command::SOFT_RESET),
//!     ParamWord::command(command::PIXEL_FORMAT_SET),
//!     ParamWord::data(0x55), // 16 bits per pixel
//!     ParamWord::command(command::SLEEP_OUT),
//!     ParamWord::command(command::DISPLAY_ON),
//! ];
//! assert!(init[0].is_command());
//! assert_eq!(init[2].byte(), 0x55);
//! ```

use embedded_hal::digital::PinState;

/// Bit marking a table entry as a command byte
pub const COMMAND_FLAG: u16 = 0x100;

/// One 9-bit parameter table entry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParamWord(u16);

impl ParamWord {
    /// Entry sent with the data/command line low
    pub const fn command(byte: u8) -> Self {
        Self(COMMAND_FLAG | byte as u16)
    }

    /// Entry sent with the data/command line high
    pub const fn data(byte: u8) -> Self {
        Self(byte as u16)
    }

    /// Build an entry from its raw 9-bit value; bits above bit 8 are dropped
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw & (COMMAND_FLAG | 0xFF))
    }

    /// Raw 9-bit value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Byte placed on the data bus
    pub const fn byte(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Whether the entry is a command byte
    pub const fn is_command(self) -> bool {
        self.0 & COMMAND_FLAG != 0
    }

    /// Level of the data/command line while this entry is on the bus
    pub const fn data_command_level(self) -> PinState {
        if self.is_command() {
            PinState::Low
        } else {
            PinState::High
        }
    }
}

// MIPI DCS commands

/// No operation (0x00)
pub const NOP: u8 = 0x00;

/// Software reset (0x01)
pub const SOFT_RESET: u8 = 0x01;

/// Exit sleep mode (0x11)
///
/// The controller needs 120ms after this command before it accepts pixel data.
pub const SLEEP_OUT: u8 = 0x11;

/// Display on (0x29)
pub const DISPLAY_ON: u8 = 0x29;

/// Column address set (0x2A)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const COLUMN_ADDRESS_SET: u8 = 0x2A;

/// Page (row) address set (0x2B)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const PAGE_ADDRESS_SET: u8 = 0x2B;

/// Memory write (0x2C)
///
/// Every byte after this command is pixel data until the next command.
pub const MEMORY_WRITE: u8 = 0x2C;

/// Memory access control (0x36)
///
/// Requires 1 byte selecting scan direction and RGB/BGR order.
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;

/// Pixel format set (0x3A)
///
/// Requires 1 byte; 0x55 selects 16-bit RGB565 on the parallel interface.
pub const PIXEL_FORMAT_SET: u8 = 0x3A;

/// Number of entries produced by [`window_table`]
pub const WINDOW_TABLE_LEN: usize = 12;

/// Frame-start table covering a `width` x `height` window at the origin
///
/// Layout: `NOP`, `COLUMN_ADDRESS_SET` + 4 bytes, `PAGE_ADDRESS_SET` + 4 bytes,
/// `MEMORY_WRITE`.
///
/// ```
/// use tft8080::command::{window_table, MEMORY_WRITE};
///
/// let table = window_table(320, 240);
/// assert_eq!(table.len(), 12);
/// // x_end = 319
/// assert_eq!(table[4].byte(), 0x01);
/// assert_eq!(table[5].byte(), 0x3F);
/// assert_eq!(table[11].byte(), MEMORY_WRITE);
/// ```
pub const fn window_table(width: u16, height: u16) -> [ParamWord; WINDOW_TABLE_LEN] {
    let x_end = width.saturating_sub(1);
    let y_end = height.saturating_sub(1);
    [
        ParamWord::command(NOP),
        ParamWord::command(COLUMN_ADDRESS_SET),
        ParamWord::data(0),
        ParamWord::data(0),
        ParamWord::data((x_end >> 8) as u8),
        ParamWord::data((x_end & 0xFF) as u8),
        ParamWord::command(PAGE_ADDRESS_SET),
        ParamWord::data(0),
        ParamWord::data(0),
        ParamWord::data((y_end >> 8) as u8),
        ParamWord::data((y_end & 0xFF) as u8),
        ParamWord::command(MEMORY_WRITE),
    ]
}
