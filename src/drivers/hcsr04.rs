// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HC-SR04 ultrasonic rangefinder.
//!
//! A 10 µs trigger pulse starts a ping; the module then holds its echo line high for the round-trip
//! time. Distances are reported in inches.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::RangefinderConfig;
use crate::drivers::Ranging;
use crate::error::{Error, Result};
use crate::hw::EchoTimer;

pub struct Hcsr04<TRIG, ECHO> {
    trigger: TRIG,
    echo: ECHO,
    cfg: RangefinderConfig,
}

impl<TRIG, ECHO> Hcsr04<TRIG, ECHO>
where
    TRIG: OutputPin,
    ECHO: EchoTimer,
{
    pub fn new(mut trigger: TRIG, echo: ECHO, cfg: &RangefinderConfig) -> Self {
        trigger.set_low().ok();
        Self {
            trigger,
            echo,
            cfg: *cfg,
        }
    }

    /// Convert an echo width to inches. `None` for no echo or beyond the sensor's range.
    pub fn inches_for_echo(&self, width_us: u32) -> Option<f32> {
        if width_us == 0 {
            return None;
        }
        let distance = width_us as f32 / self.cfg.micros_per_inch - self.cfg.offset_in;
        if distance > self.cfg.max_distance_in {
            None
        } else {
            Some(distance)
        }
    }

    pub fn free(self) -> (TRIG, ECHO) {
        (self.trigger, self.echo)
    }
}

impl<TRIG, ECHO> Ranging for Hcsr04<TRIG, ECHO>
where
    TRIG: OutputPin,
    ECHO: EchoTimer,
{
    /// Fire one ping and wait for its echo.
    fn distance<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<f32>> {
        self.trigger.set_high().map_err(|_| Error::Pin)?;
        delay.delay_us(self.cfg.trigger_pulse.to_micros());
        self.trigger.set_low().map_err(|_| Error::Pin)?;

        let width = self.echo.pulse_width().map_err(|_| Error::Echo)?;
        Ok(self.inches_for_echo(width.to_micros()))
    }
}
