//! Protocol state machine
//!
//! [`ProtocolState`] sequences the panel from reset to pixel streaming:
//!
//! ```text
//! Init -> HoldReset -> TransferSync -> SendInitParams -> WaitToSend
//!                                                           |
//!            +----------------------------------------------+
//!            v
//!      SendPixelLoc -> SendData -> Done -+
//!            ^            |              |
//!            +-- new frame+--------------+
//! ```
//!
//! Transitions are only evaluated on ticks where the delay timer has expired.
//! Every other tick only counts the timer down.

use embedded_hal::digital::PinState;

use crate::command::ParamWord;
use crate::config::Config;
use crate::error::TableKind;
use crate::sequencer::Registers;
use crate::timer::DelayTimer;

/// Protocol state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProtocolState {
    /// Pull reset low and start the reset pulse
    #[default]
    Init,
    /// Release reset and wait for the panel to settle
    HoldReset,
    /// Bus synchronization handshake
    TransferSync,
    /// Stream the initialization table
    SendInitParams,
    /// Quiet period between initialization and the first frame
    WaitToSend,
    /// Stream the frame-start (window set) table
    SendPixelLoc,
    /// Stream the pixel buffer
    SendData,
    /// Frame complete
    Done,
}

impl ProtocolState {
    /// Whether bytes are strobed onto the bus in this state
    pub fn is_transfer(self) -> bool {
        matches!(
            self,
            Self::TransferSync | Self::SendInitParams | Self::SendPixelLoc | Self::SendData
        )
    }

    /// Table addressed by the cursor in this state
    pub fn table(self) -> TableKind {
        match self {
            Self::Init
            | Self::HoldReset
            | Self::TransferSync
            | Self::SendInitParams
            | Self::WaitToSend => TableKind::Init,
            Self::SendPixelLoc | Self::Done => TableKind::FrameStart,
            Self::SendData => TableKind::Pixels,
        }
    }
}

/// State machine outputs computed for one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Control {
    pub state: ProtocolState,
    pub delay: DelayTimer,
    pub chip_select: PinState,
    pub reset: PinState,
    pub data_command: PinState,
    pub limit: usize,
}

/// Compute the state machine update from the previous tick's registers
///
/// `entry` is the table output for the current state and index; it drives the
/// data/command line while a parameter table streams.
pub(crate) fn control_step(
    regs: &Registers,
    config: &Config,
    entry: Option<ParamWord>,
    new_frame: bool,
) -> Control {
    let mut next = Control {
        state: regs.state,
        delay: regs.delay,
        chip_select: regs.bus.chip_select,
        reset: regs.bus.reset,
        data_command: regs.bus.data_command,
        limit: regs.cursor.limit,
    };

    if !regs.delay.is_expired() {
        next.delay.tick();
        return next;
    }

    let index = regs.cursor.index;
    let entry_level = entry.map_or(regs.bus.data_command, ParamWord::data_command_level);

    match regs.state {
        ProtocolState::Init => {
            next.data_command = entry_level;
            next.reset = PinState::Low;
            next.delay.arm(config.reset_hold_ticks);
            next.state = ProtocolState::HoldReset;
        }
        ProtocolState::HoldReset => {
            next.reset = PinState::High;
            next.delay.arm(config.settle_ticks);
            next.state = ProtocolState::TransferSync;
        }
        ProtocolState::TransferSync => {
            next.reset = PinState::High;
            next.data_command = PinState::Low;
            next.limit = config.sync_len;
            if index == config.sync_len {
                next.state = ProtocolState::SendInitParams;
            }
        }
        ProtocolState::SendInitParams => {
            next.chip_select = PinState::Low;
            next.data_command = entry_level;
            next.limit = config.init_len;
            if index == config.init_len {
                next.state = ProtocolState::WaitToSend;
            }
        }
        ProtocolState::WaitToSend => {
            next.chip_select = PinState::High;
            next.delay.arm(config.settle_ticks);
            next.state = ProtocolState::SendPixelLoc;
        }
        ProtocolState::SendPixelLoc => {
            next.chip_select = PinState::Low;
            next.data_command = entry_level;
            next.limit = config.frame_start_len;
            if index == config.frame_start_len {
                next.state = ProtocolState::SendData;
            }
        }
        ProtocolState::SendData => {
            next.data_command = PinState::High;
            next.limit = config.pixel_count();
            if new_frame {
                next.state = ProtocolState::SendPixelLoc;
            } else if index == config.pixel_count() {
                next.state = ProtocolState::Done;
            }
        }
        ProtocolState::Done => {
            next.chip_select = PinState::High;
            next.state = ProtocolState::SendPixelLoc;
        }
    }

    next
}
