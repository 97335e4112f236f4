// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! NES-compatible gamepad (4021 shift register) reader.
//!
//! Wiring:
//! - Latch (output): parallel-load the eight button states
//! - Clock (output): shift the next button onto the data line
//! - Data (input): current button, **low = pressed**
//!
//! Works at 3.3 V or 5 V with an original pad; the 8BitDo retro receiver needs 5 V.

use bitflags::bitflags;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use fugit::MicrosDurationU32;

use crate::config::GamepadConfig;
use crate::error::{Error, Result};

bitflags! {
    /// Pressed buttons, in the order the pad shifts them out.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const A      = 0x01;
        const B      = 0x02;
        const SELECT = 0x04;
        const START  = 0x08;
        const UP     = 0x10;
        const DOWN   = 0x20;
        const LEFT   = 0x40;
        const RIGHT  = 0x80;
    }
}

impl Buttons {
    /// No intentional input: nothing pressed (`0x00`) or pad unplugged, where the pulled-up data
    /// line reads every button as pressed (`0xFF`).
    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.is_empty() || self.is_all()
    }

    /// Pad unplugged.
    #[inline]
    pub fn is_disconnected(&self) -> bool {
        self.is_all()
    }
}

/// Anything that can produce a button snapshot.
pub trait ButtonSource {
    fn read_buttons<D: DelayNs>(&mut self, delay: &mut D) -> Result<Buttons>;
}

pub struct NesGamepad<LATCH, CLOCK, DATA> {
    latch: LATCH,
    clock: CLOCK,
    data: DATA,
    settle: MicrosDurationU32,
}

impl<LATCH, CLOCK, DATA> NesGamepad<LATCH, CLOCK, DATA>
where
    LATCH: OutputPin,
    CLOCK: OutputPin,
    DATA: InputPin,
{
    /// Create a reader with both control lines idle (low).
    pub fn new(mut latch: LATCH, mut clock: CLOCK, data: DATA, cfg: &GamepadConfig) -> Self {
        latch.set_low().ok();
        clock.set_low().ok();
        Self {
            latch,
            clock,
            data,
            settle: cfg.settle,
        }
    }

    /// Latch the pad and shift in all eight buttons.
    ///
    /// The first bit shifted out (A) ends up in bit 0. There are no retries: a noisy or
    /// disconnected link yields whatever was sampled.
    pub fn read<D: DelayNs>(&mut self, delay: &mut D) -> Result<Buttons> {
        let settle_us = self.settle.to_micros();

        self.latch.set_high().map_err(|_| Error::Pin)?;
        delay.delay_us(settle_us);
        self.latch.set_low().map_err(|_| Error::Pin)?;
        delay.delay_us(settle_us);

        let mut raw: u8 = 0;
        for _ in 0..8 {
            raw >>= 1;
            if self.data.is_low().map_err(|_| Error::Pin)? {
                raw |= 0x80;
            }

            self.clock.set_high().map_err(|_| Error::Pin)?;
            delay.delay_us(settle_us);
            self.clock.set_low().map_err(|_| Error::Pin)?;
            delay.delay_us(settle_us);
        }

        Ok(Buttons::from_bits_retain(raw))
    }

    pub fn free(self) -> (LATCH, CLOCK, DATA) {
        (self.latch, self.clock, self.data)
    }
}

impl<LATCH, CLOCK, DATA> ButtonSource for NesGamepad<LATCH, CLOCK, DATA>
where
    LATCH: OutputPin,
    CLOCK: OutputPin,
    DATA: InputPin,
{
    #[inline]
    fn read_buttons<D: DelayNs>(&mut self, delay: &mut D) -> Result<Buttons> {
        self.read(delay)
    }
}
