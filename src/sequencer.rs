//! Tick-stepped protocol driver
//!
//! [`Sequencer`] owns every protocol register and the three lookup tables. Each
//! call to [`Sequencer::tick`] advances the protocol by exactly one tick:
//!
//! 1. copy the registers,
//! 2. compute the state machine update and the cursor/bus update, both from that
//!    copy only,
//! 3. commit the combined result.
//!
//! Neither update ever observes the other's result from the same tick.
//!
//! ## Example
//!
//! ```
//! use tft8080::command::{window_table, ParamWord};
//! use tft8080::{Builder, Dimensions, Inputs, ProtocolState, Sequencer};
//!
//! let dims = match Dimensions::new(4, 2) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new()
//!     .dimensions(dims)
//!     .init_len(3)
//!     .reset_hold_ticks(1)
//!     .settle_ticks(1)
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let init = [ParamWord::command(0x11), ParamWord::command(0x29), ParamWord::command(0x00)];
//! let frame_start = window_table(4, 2);
//! let pixels = [0xF800u16; 8];
//!
//! let mut sequencer = match Sequencer::new(config, &init, &frame_start, pixels) {
//!     Ok(sequencer) => sequencer,
//!     Err(_) => return,
//! };
//! while sequencer.state() != ProtocolState::SendData {
//!     sequencer.tick(Inputs::IDLE);
//! }
//! ```

use log::{debug, trace};

use crate::command::ParamWord;
use crate::config::{Config, ReadLatency};
use crate::cursor::{self, TransferCursor};
use crate::error::{BuilderError, TableKind};
use crate::interface::BusSignals;
use crate::state::{self, ProtocolState};
use crate::timer::DelayTimer;

/// External inputs sampled on every tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inputs {
    /// Global reset
    pub reset: bool,
    /// Restart the per-frame sequence
    pub new_frame: bool,
    /// Pixel source ready; when low, pixel streaming pauses
    pub data_ready: bool,
}

impl Inputs {
    /// No reset, no new frame, pixel data ready
    pub const IDLE: Self = Self {
        reset: false,
        new_frame: false,
        data_ready: true,
    };
}

impl Default for Inputs {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Every protocol register, as committed at the end of a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registers {
    /// Protocol state
    pub state: ProtocolState,
    /// Delay gating the state machine
    pub delay: DelayTimer,
    /// Table cursor
    pub cursor: TransferCursor,
    /// Bus line levels
    pub bus: BusSignals,
    /// Table output register used with [`ReadLatency::Registered`]
    pub fetched: Option<u16>,
}

/// Protocol sequencer for one panel
///
/// ## Type Parameters
///
/// * `P` - Pixel buffer implementing `AsRef<[u16]>` (RGB565 words, read modulo
///   its length)
pub struct Sequencer<'a, P> {
    config: Config,
    init: &'a [ParamWord],
    frame_start: &'a [ParamWord],
    pixels: P,
    regs: Registers,
    ticks: u64,
    frames: u64,
}

impl<'a, P> Sequencer<'a, P>
where
    P: AsRef<[u16]>,
{
    /// Create a sequencer in its reset state
    ///
    /// # Errors
    ///
    /// Returns the [`Config::validate`] error for a configuration that bypassed the
    /// builder, `BuilderError::TableTooShort` if the init table holds fewer than
    /// `max(sync_len, init_len)` entries or the frame-start table fewer than
    /// `frame_start_len`, and `BuilderError::EmptyPixelBuffer` if `pixels` is
    /// empty. A pixel buffer shorter than the panel repeats.
    pub fn new(
        config: Config,
        init: &'a [ParamWord],
        frame_start: &'a [ParamWord],
        pixels: P,
    ) -> Result<Self, BuilderError> {
        config.validate()?;
        check_len(TableKind::Init, config.sync_len.max(config.init_len), init)?;
        check_len(TableKind::FrameStart, config.frame_start_len, frame_start)?;
        if pixels.as_ref().is_empty() {
            return Err(BuilderError::EmptyPixelBuffer);
        }

        let regs = Registers {
            state: ProtocolState::Init,
            delay: DelayTimer::new(),
            cursor: TransferCursor::new(config.init_len),
            bus: BusSignals::RESET,
            fetched: None,
        };
        let mut sequencer = Self {
            config,
            init,
            frame_start,
            pixels,
            regs,
            ticks: 0,
            frames: 0,
        };
        sequencer.reset();
        Ok(sequencer)
    }

    /// Return every register to its reset value
    ///
    /// State `Init`, delay cleared, cursor at 0 with the init limit, reset and chip
    /// select asserted, data/command on command, write strobe released.
    pub fn reset(&mut self) {
        debug!("sequencer reset from {:?}", self.regs.state);
        self.regs = Registers {
            state: ProtocolState::Init,
            delay: DelayTimer::new(),
            cursor: TransferCursor::new(self.config.init_len),
            bus: BusSignals::RESET,
            fetched: self.read(ProtocolState::Init, 0),
        };
    }

    /// Advance the protocol by one tick and return the new bus levels
    pub fn tick(&mut self, inputs: Inputs) -> BusSignals {
        self.ticks += 1;
        if inputs.reset {
            self.reset();
            return self.regs.bus;
        }

        let current = self.regs;
        let word = match self.config.read_latency {
            ReadLatency::Combinational => self.read(current.state, current.cursor.index),
            ReadLatency::Registered => current.fetched,
        };

        let control = state::control_step(
            &current,
            &self.config,
            word.map(ParamWord::from_raw),
            inputs.new_frame,
        );
        let transfer = cursor::transfer_step(&current, word, &inputs);

        let next = Registers {
            state: control.state,
            delay: control.delay,
            cursor: TransferCursor {
                index: transfer.index,
                limit: control.limit,
                phase: transfer.phase,
            },
            bus: BusSignals {
                chip_select: control.chip_select,
                write_strobe: transfer.write_strobe,
                reset: control.reset,
                data_command: control.data_command,
                data: transfer.data,
            },
            fetched: self.read(current.state, transfer.index),
        };

        if current.state == ProtocolState::SendData && next.state == ProtocolState::Done {
            self.frames += 1;
        }
        if next.state != current.state {
            self.log_transition(&current, &next, inputs);
        }
        self.regs = next;
        next.bus
    }

    fn log_transition(&self, from: &Registers, to: &Registers, inputs: Inputs) {
        match from.state {
            ProtocolState::SendData if inputs.new_frame => {
                debug!(
                    "new frame preempted pixel stream at pixel {} of {}",
                    from.cursor.index,
                    self.config.pixel_count()
                );
            }
            ProtocolState::SendData => {
                trace!("frame {} complete at tick {}", self.frames, self.ticks);
            }
            ProtocolState::TransferSync
            | ProtocolState::SendInitParams
            | ProtocolState::SendPixelLoc => {
                trace!("{:?} sent {} entries", from.state, from.cursor.index);
            }
            _ => {}
        }
        debug!("{:?} -> {:?} at tick {}", from.state, to.state, self.ticks);
    }

    /// Table output for `state` at `index`
    fn read(&self, state: ProtocolState, index: usize) -> Option<u16> {
        match state.table() {
            TableKind::Init => self.init.get(index).copied().map(ParamWord::raw),
            TableKind::FrameStart => self.frame_start.get(index).copied().map(ParamWord::raw),
            TableKind::Pixels => {
                let pixels = self.pixels.as_ref();
                index
                    .checked_rem(pixels.len())
                    .and_then(|i| pixels.get(i))
                    .copied()
            }
        }
    }

    /// Current protocol state
    pub fn state(&self) -> ProtocolState {
        self.regs.state
    }

    /// Current cursor
    pub fn cursor(&self) -> TransferCursor {
        self.regs.cursor
    }

    /// Current delay timer
    pub fn delay(&self) -> DelayTimer {
        self.regs.delay
    }

    /// Bus line levels committed by the last tick
    pub fn signals(&self) -> BusSignals {
        self.regs.bus
    }

    /// All registers committed by the last tick
    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    /// Access the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ticks run since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Frames streamed to completion since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Access the pixel buffer
    pub fn pixels(&self) -> &P {
        &self.pixels
    }

    /// Mutable access to the pixel buffer
    ///
    /// Writes take effect from the next pixel read; assert the new-frame input to
    /// restart the frame from its first pixel.
    pub fn pixels_mut(&mut self) -> &mut P {
        &mut self.pixels
    }

    /// Release the pixel buffer
    pub fn release(self) -> P {
        self.pixels
    }
}

fn check_len(table: TableKind, required: usize, entries: &[ParamWord]) -> Result<(), BuilderError> {
    if entries.len() < required {
        return Err(BuilderError::TableTooShort {
            table,
            required,
            provided: entries.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::window_table;
    use crate::config::{Builder, Dimensions};
    use crate::cursor::BytePhase;
    use crate::monitor::{BusMonitor, BusWrite};
    use alloc::vec::Vec;
    use embedded_hal::digital::PinState;

    const HOLD_TICKS: u32 = 2;
    const SETTLE_TICKS: u32 = 3;

    fn init_table() -> Vec<ParamWord> {
        (0..95u8)
            .map(|i| {
                if i % 4 == 0 {
                    ParamWord::command(i)
                } else {
                    ParamWord::data(i)
                }
            })
            .collect()
    }

    fn pixel_buffer(len: usize) -> Vec<u16> {
        (0..len as u16).map(|i| 0xA000 | (0x10 + i)).collect()
    }

    fn config(width: u16, height: u16, latency: ReadLatency) -> Config {
        Builder::new()
            .dimensions(Dimensions::new(width, height).unwrap())
            .reset_hold_ticks(HOLD_TICKS)
            .settle_ticks(SETTLE_TICKS)
            .read_latency(latency)
            .build()
            .unwrap()
    }

    fn run_frames(seq: &mut Sequencer<'_, Vec<u16>>, frames: u64) -> Vec<(ProtocolState, BusWrite)> {
        let mut monitor = BusMonitor::new();
        monitor.observe(&seq.signals());
        let mut writes = Vec::new();
        while seq.frames() < frames {
            assert!(seq.ticks() < 1_000_000, "sequencer stalled in {:?}", seq.state());
            let state = seq.state();
            let signals = seq.tick(Inputs::IDLE);
            if let Some(write) = monitor.observe(&signals) {
                writes.push((state, write));
            }
        }
        writes
    }

    fn run_until(seq: &mut Sequencer<'_, Vec<u16>>, mut done: impl FnMut(&Registers) -> bool) {
        while !done(seq.registers()) {
            assert!(seq.ticks() < 1_000_000, "condition never met");
            seq.tick(Inputs::IDLE);
        }
    }

    fn phase(writes: &[(ProtocolState, BusWrite)], state: ProtocolState) -> Vec<BusWrite> {
        writes
            .iter()
            .filter(|(s, _)| *s == state)
            .map(|(_, w)| *w)
            .collect()
    }

    fn pixel_writes(pixels: impl Iterator<Item = u16>) -> Vec<BusWrite> {
        pixels
            .flat_map(|p| [BusWrite::Data(p as u8), BusWrite::Data((p >> 8) as u8)])
            .collect()
    }

    #[test]
    fn test_new_sequencer_is_in_reset() {
        let init = init_table();
        let frame = window_table(8, 4);
        let seq = Sequencer::new(
            config(8, 4, ReadLatency::Combinational),
            &init,
            &frame,
            pixel_buffer(32),
        )
        .unwrap();
        assert_eq!(seq.state(), ProtocolState::Init);
        assert_eq!(seq.signals(), BusSignals::RESET);
        assert_eq!(seq.cursor(), TransferCursor::new(95));
        assert!(seq.delay().is_expired());
    }

    #[test]
    fn test_undersized_tables_rejected() {
        let init = init_table();
        let frame = window_table(8, 4);
        let cfg = config(8, 4, ReadLatency::Combinational);

        let result = Sequencer::new(cfg.clone(), &init[..94], &frame, pixel_buffer(1));
        assert_eq!(
            result.err(),
            Some(BuilderError::TableTooShort {
                table: TableKind::Init,
                required: 95,
                provided: 94
            })
        );

        let result = Sequencer::new(cfg.clone(), &init, &frame[..11], pixel_buffer(1));
        assert_eq!(
            result.err(),
            Some(BuilderError::TableTooShort {
                table: TableKind::FrameStart,
                required: 12,
                provided: 11
            })
        );

        let result = Sequencer::new(cfg, &init, &frame, Vec::new());
        assert_eq!(result.err(), Some(BuilderError::EmptyPixelBuffer));
    }

    #[test]
    fn test_unchecked_config_rejected() {
        let init = init_table();
        let frame = window_table(8, 4);
        let valid = config(8, 4, ReadLatency::Combinational);

        let zero_init = Config {
            init_len: 0,
            ..valid.clone()
        };
        let result = Sequencer::new(zero_init, &init, &frame, pixel_buffer(32));
        assert_eq!(result.err(), Some(BuilderError::ZeroLengthTransfer));

        let zero_width = Config {
            dimensions: Dimensions {
                width: 0,
                height: 4,
            },
            ..valid
        };
        let result = Sequencer::new(zero_width, &init, &frame, pixel_buffer(32));
        assert_eq!(
            result.err(),
            Some(BuilderError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn test_startup_reset_pulse_and_settle() {
        let init = init_table();
        let frame = window_table(8, 4);
        let mut seq = Sequencer::new(
            config(8, 4, ReadLatency::Combinational),
            &init,
            &frame,
            pixel_buffer(32),
        )
        .unwrap();

        seq.tick(Inputs::IDLE);
        assert_eq!(seq.state(), ProtocolState::HoldReset);
        assert_eq!(seq.signals().reset, PinState::Low);
        assert_eq!(seq.signals().data_command, PinState::Low);
        assert_eq!(seq.delay().remaining(), HOLD_TICKS);

        for _ in 0..HOLD_TICKS {
            seq.tick(Inputs::IDLE);
            assert_eq!(seq.state(), ProtocolState::HoldReset);
            assert_eq!(seq.signals().reset, PinState::Low);
        }

        seq.tick(Inputs::IDLE);
        assert_eq!(seq.state(), ProtocolState::TransferSync);
        assert_eq!(seq.signals().reset, PinState::High);
        assert_eq!(seq.delay().remaining(), SETTLE_TICKS);

        for _ in 0..SETTLE_TICKS {
            let signals = seq.tick(Inputs::IDLE);
            assert_eq!(signals.write_strobe, PinState::High);
        }

        let signals = seq.tick(Inputs::IDLE);
        assert_eq!(signals.write_strobe, PinState::Low);
        assert_eq!(signals.data, init[0].byte());
        assert!(signals.is_selected());
        assert!(signals.is_command());
    }

    #[test]
    fn test_strobe_toggles_only_in_active_transfer() {
        let init = init_table();
        let frame = window_table(8, 4);
        let mut seq = Sequencer::new(
            config(8, 4, ReadLatency::Combinational),
            &init,
            &frame,
            pixel_buffer(32),
        )
        .unwrap();

        while seq.frames() < 3 {
            let before = *seq.registers();
            let after = seq.tick(Inputs::IDLE);
            let toggled = after.write_strobe != before.bus.write_strobe;
            let active = before.state.is_transfer()
                && before.delay.is_expired()
                && !before.cursor.at_limit();
            assert_eq!(toggled, active, "tick {}: {before:?}", seq.ticks());
            let cursor = seq.cursor();
            assert!(cursor.index <= cursor.limit, "tick {}: {cursor:?}", seq.ticks());
        }
    }

    #[test]
    fn test_parameter_phases_stream_exact_tables() {
        let init = init_table();
        let frame = window_table(8, 4);
        let mut seq = Sequencer::new(
            config(8, 4, ReadLatency::Combinational),
            &init,
            &frame,
            pixel_buffer(32),
        )
        .unwrap();
        let writes = run_frames(&mut seq, 1);

        let sync = phase(&writes, ProtocolState::TransferSync);
        let expected: Vec<_> = init[..3].iter().map(|w| BusWrite::Command(w.byte())).collect();
        assert_eq!(sync, expected);

        let init_words: Vec<_> = phase(&writes, ProtocolState::SendInitParams)
            .iter()
            .map(|w| w.word())
            .collect();
        assert_eq!(init_words, init);

        let frame_words: Vec<_> = phase(&writes, ProtocolState::SendPixelLoc)
            .iter()
            .map(|w| w.word())
            .collect();
        assert_eq!(frame_words, frame);

        assert_eq!(phase(&writes, ProtocolState::SendData).len(), 2 * 32);
        assert_eq!(writes.len(), 3 + 95 + 12 + 2 * 32);
    }

    #[test]
    fn test_pixel_bytes_low_then_high() {
        let init = init_table();
        let frame = window_table(8, 4);
        let pixels = pixel_buffer(32);
        let mut seq = Sequencer::new(
            config(8, 4, ReadLatency::Combinational),
            &init,
            &frame,
            pixels.clone(),
        )
        .unwrap();
        let writes = run_frames(&mut seq, 1);
        assert_eq!(
            phase(&writes, ProtocolState::SendData),
            pixel_writes(pixels.into_iter())
        );
    }

    #[test]
    fn test_pixel_takes_four_ticks() {
        let init = init_table();
        let frame = window_table(8, 4);
        let mut seq = Sequencer::new(
            config(8, 4, ReadLatency::Combinational),
            &init,
            &frame,
            pixel_buffer(32),
        )
        .unwrap();
        run_until(&mut seq, |r| r.state == ProtocolState::SendData);
        let start = seq.ticks();
        run_until(&mut seq, |r| r.state == ProtocolState::Done);
        // 32 pixels, then one tick to see the limit
        assert_eq!(seq.ticks() - start, 4 * 32 + 1);
    }

    #[test]
    fn test_short_pixel_buffer_repeats() {
        let init = init_table();
        let frame = window_table(8, 4);
        let pixels = pixel_buffer(5);
        let mut seq = Sequencer::new(
            config(8, 4, ReadLatency::Combinational),
            &init,
            &frame,
            pixels.clone(),
        )
        .unwrap();
        let writes = run_frames(&mut seq, 1);
        let expected = pixel_writes((0..32).map(|i| pixels[i % pixels.len()]));
        assert_eq!(phase(&writes, ProtocolState::SendData), expected);
    }

    #[test]
    fn test_done_resets_cursor_once() {
        let init = init_table();
        let frame = window_table(8, 4);
        let mut seq = Sequencer::new(
            config(8, 4, ReadLatency::Combinational),
            &init,
            &frame,
            pixel_buffer(32),
        )
        .unwrap();
        run_until(&mut seq, |r| r.state == ProtocolState::Done);
        assert_eq!(seq.cursor().index, 0);
        assert_eq!(seq.signals().write_strobe, PinState::High);

        seq.tick(Inputs::IDLE);
        assert_eq!(seq.state(), ProtocolState::SendPixelLoc);
        assert_eq!(seq.cursor().index, 0);
        assert!(!seq.signals().is_selected());

        let signals = seq.tick(Inputs::IDLE);
        assert_eq!(seq.cursor().index, 0);
        assert_eq!(signals.write_strobe, PinState::Low);
        assert_eq!(signals.data, frame[0].byte());
        assert!(signals.is_selected());

        seq.tick(Inputs::IDLE);
        assert_eq!(seq.cursor().index, 1);
    }

    #[test]
    fn test_frames_repeat_with_window_set() {
        let init = init_table();
        let frame = window_table(8, 4);
        let mut seq = Sequencer::new(
            config(8, 4, ReadLatency::Combinational),
            &init,
            &frame,
            pixel_buffer(32),
        )
        .unwrap();
        let writes = run_frames(&mut seq, 2);
        assert_eq!(seq.frames(), 2);
        assert_eq!(phase(&writes, ProtocolState::SendPixelLoc).len(), 2 * 12);
        assert_eq!(phase(&writes, ProtocolState::SendInitParams).len(), 95);
        assert_eq!(phase(&writes, ProtocolState::SendData).len(), 2 * 2 * 32);
    }

    #[test]
    fn test_new_frame_preempts_pixel_stream() {
        let init = init_table();
        let frame = window_table(320, 240);
        let mut seq = Sequencer::new(
            config(320, 240, ReadLatency::Combinational),
            &init,
            &frame,
            pixel_buffer(16),
        )
        .unwrap();
        run_until(&mut seq, |r| {
            r.state == ProtocolState::SendData && r.cursor.index == 500
        });
        assert_eq!(seq.cursor().limit, 76_800);

        let new_frame = Inputs {
            new_frame: true,
            ..Inputs::IDLE
        };
        let signals = seq.tick(new_frame);
        assert_eq!(seq.state(), ProtocolState::SendPixelLoc);
        assert_eq!(seq.cursor().index, 0);
        assert_eq!(seq.cursor().phase, BytePhase::Low);
        assert_eq!(signals.write_strobe, PinState::High);

        let mut monitor = BusMonitor::new();
        monitor.observe(&signals);
        let mut window = Vec::new();
        while seq.state() != ProtocolState::SendData {
            if let Some(write) = monitor.observe(&seq.tick(Inputs::IDLE)) {
                window.push(write.word());
            }
        }
        assert_eq!(window, frame);
    }

    #[test]
    fn test_new_frame_restarts_window_table() {
        let init = init_table();
        let frame = window_table(8, 4);
        let mut seq = Sequencer::new(
            config(8, 4, ReadLatency::Combinational),
            &init,
            &frame,
            pixel_buffer(32),
        )
        .unwrap();
        run_until(&mut seq, |r| {
            r.state == ProtocolState::SendPixelLoc && r.cursor.index == 5 && !r.bus.is_strobing()
        });

        let new_frame = Inputs {
            new_frame: true,
            ..Inputs::IDLE
        };
        let signals = seq.tick(new_frame);
        assert_eq!(seq.state(), ProtocolState::SendPixelLoc);
        assert_eq!(seq.cursor().index, 0);
        assert_eq!(seq.cursor().limit, 12);
        assert_eq!(signals.write_strobe, PinState::High);

        let mut monitor = BusMonitor::new();
        monitor.observe(&signals);
        let mut window = Vec::new();
        while seq.state() != ProtocolState::SendData {
            if let Some(write) = monitor.observe(&seq.tick(Inputs::IDLE)) {
                window.push(write.word());
            }
        }
        assert_eq!(window, frame);
    }

    #[test]
    fn test_reset_from_any_state() {
        let init = init_table();
        let frame = window_table(8, 4);
        let targets = [
            ProtocolState::Init,
            ProtocolState::HoldReset,
            ProtocolState::TransferSync,
            ProtocolState::SendInitParams,
            ProtocolState::WaitToSend,
            ProtocolState::SendPixelLoc,
            ProtocolState::SendData,
            ProtocolState::Done,
        ];
        for target in targets {
            let mut seq = Sequencer::new(
                config(8, 4, ReadLatency::Combinational),
                &init,
                &frame,
                pixel_buffer(32),
            )
            .unwrap();
            run_until(&mut seq, |r| r.state == target);
            seq.tick(Inputs::IDLE);

            let reset = Inputs {
                reset: true,
                ..Inputs::IDLE
            };
            let signals = seq.tick(reset);
            assert_eq!(seq.state(), ProtocolState::Init, "from {target:?}");
            assert_eq!(signals, BusSignals::RESET);
            assert_eq!(signals.reset, PinState::Low);
            assert!(signals.is_selected());
            assert!(seq.delay().is_expired());
            assert_eq!(seq.cursor(), TransferCursor::new(95));
        }
    }

    #[test]
    fn test_data_ready_low_pauses_pixels() {
        let init = init_table();
        let frame = window_table(8, 4);
        let pixels = pixel_buffer(32);
        let mut seq = Sequencer::new(
            config(8, 4, ReadLatency::Combinational),
            &init,
            &frame,
            pixels.clone(),
        )
        .unwrap();
        run_until(&mut seq, |r| {
            r.state == ProtocolState::SendData && r.cursor.index == 3 && r.bus.is_strobing()
        });
        let paused = *seq.registers();
        assert_eq!(paused.cursor.phase, BytePhase::Low);

        let not_ready = Inputs {
            data_ready: false,
            ..Inputs::IDLE
        };
        for _ in 0..10 {
            seq.tick(not_ready);
            assert_eq!(seq.state(), ProtocolState::SendData);
            assert_eq!(seq.cursor(), paused.cursor);
            assert_eq!(seq.signals(), paused.bus);
        }

        let signals = seq.tick(Inputs::IDLE);
        assert_eq!(signals.write_strobe, PinState::High);
        assert_eq!(signals.data, paused.bus.data);
        let writes = run_frames(&mut seq, 1);
        // Pixels 0..3 and the low byte of pixel 3 were latched before the pause
        assert_eq!(phase(&writes, ProtocolState::SendData).len(), 2 * 32 - 7);
    }

    #[test]
    fn test_registered_latency_stale_first_pixel_byte() {
        let init = init_table();
        let frame = window_table(8, 4);
        let pixels = pixel_buffer(32);
        let mut seq = Sequencer::new(
            config(8, 4, ReadLatency::Registered),
            &init,
            &frame,
            pixels.clone(),
        )
        .unwrap();
        let writes = run_frames(&mut seq, 1);

        // Parameter streams are unaffected
        assert_eq!(phase(&writes, ProtocolState::TransferSync).len(), 3);
        let init_words: Vec<_> = phase(&writes, ProtocolState::SendInitParams)
            .iter()
            .map(|w| w.word())
            .collect();
        assert_eq!(init_words, init);
        let frame_words: Vec<_> = phase(&writes, ProtocolState::SendPixelLoc)
            .iter()
            .map(|w| w.word())
            .collect();
        assert_eq!(frame_words, frame);

        // The first pixel byte still comes from the frame-start table
        let data = phase(&writes, ProtocolState::SendData);
        let expected = pixel_writes(pixels.into_iter());
        assert_eq!(data[0], BusWrite::Data(frame[0].byte()));
        assert_ne!(data[0], expected[0]);
        assert_eq!(data[1..], expected[1..]);
    }
}
