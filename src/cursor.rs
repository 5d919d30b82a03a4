//! Address and byte-phase counter
//!
//! The cursor addresses the table of the active state, toggles the write strobe
//! once per tick while a transfer runs, and splits 16-bit pixels into two bus
//! bytes (low byte first).
//!
//! Each parameter entry takes two ticks (strobe low, strobe high); each pixel takes
//! four. The byte is presented when the strobe falls and the cursor advances when
//! it rises, which is the edge the controller latches on.

use embedded_hal::digital::PinState;

use crate::sequencer::{Inputs, Registers};
use crate::state::ProtocolState;

/// Which half of a 16-bit pixel is on the bus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BytePhase {
    /// Low byte (sent first)
    #[default]
    Low,
    /// High byte
    High,
}

impl BytePhase {
    /// Byte of `word` selected by this phase
    pub fn select(self, word: u16) -> u8 {
        match self {
            Self::Low => (word & 0xFF) as u8,
            Self::High => (word >> 8) as u8,
        }
    }
}

/// Read position into the active table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransferCursor {
    /// Entry being transferred
    pub index: usize,
    /// Entries in the current transfer phase
    pub limit: usize,
    /// Pixel half on the bus (only advances while streaming pixels)
    pub phase: BytePhase,
}

impl TransferCursor {
    /// Cursor at the start of a phase of `limit` entries
    pub const fn new(limit: usize) -> Self {
        Self {
            index: 0,
            limit,
            phase: BytePhase::Low,
        }
    }

    /// Whether every entry of the phase has been strobed
    pub fn at_limit(&self) -> bool {
        self.index == self.limit
    }
}

/// Cursor and bus outputs computed for one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Transfer {
    pub index: usize,
    pub phase: BytePhase,
    pub write_strobe: PinState,
    pub data: u8,
}

impl Transfer {
    const CLEARED: Self = Self {
        index: 0,
        phase: BytePhase::Low,
        write_strobe: PinState::High,
        data: 0,
    };
}

/// Compute the cursor update from the previous tick's registers
///
/// `word` is the table output for the current state and index, `None` when the
/// index is outside the table. The global reset is applied by
/// [`Sequencer::tick`](crate::Sequencer::tick) before this step runs.
///
/// While `data_ready` is low in `SendData` the write strobe keeps its level, so a
/// pending byte is latched exactly once when streaming resumes.
pub(crate) fn transfer_step(regs: &Registers, word: Option<u16>, inputs: &Inputs) -> Transfer {
    let cursor = regs.cursor;
    let held = Transfer {
        index: cursor.index,
        phase: cursor.phase,
        write_strobe: regs.bus.write_strobe,
        data: regs.bus.data,
    };

    let finished = regs.state.is_transfer() && cursor.at_limit();
    if finished || !regs.delay.is_expired() || inputs.new_frame {
        return Transfer::CLEARED;
    }

    match regs.state {
        ProtocolState::SendData if !inputs.data_ready => held,
        ProtocolState::TransferSync
        | ProtocolState::SendInitParams
        | ProtocolState::SendPixelLoc
        | ProtocolState::SendData => {
            if regs.bus.write_strobe == PinState::High {
                let word = word.unwrap_or(0);
                let data = if regs.state == ProtocolState::SendData {
                    cursor.phase.select(word)
                } else {
                    BytePhase::Low.select(word)
                };
                Transfer {
                    write_strobe: PinState::Low,
                    data,
                    ..held
                }
            } else {
                let (index, phase) = match (regs.state, cursor.phase) {
                    (ProtocolState::SendData, BytePhase::Low) => (cursor.index, BytePhase::High),
                    (ProtocolState::SendData, BytePhase::High) => {
                        (cursor.index + 1, BytePhase::Low)
                    }
                    _ => (cursor.index + 1, cursor.phase),
                };
                Transfer {
                    index,
                    phase,
                    write_strobe: PinState::High,
                    ..held
                }
            }
        }
        _ => Transfer {
            write_strobe: PinState::High,
            ..held
        },
    }
}
