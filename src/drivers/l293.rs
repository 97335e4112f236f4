// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! L293 half-H bridge driving one brushed DC motor.
//!
//! Two GPIOs select the direction and a PWM channel on the enable pin sets the power:
//!
//! | IN1 | IN2 | EN   | Motor   |
//! |-----|-----|------|---------|
//! | 1   | 0   | duty | Forward |
//! | 0   | 1   | duty | Reverse |
//! | x   | x   | 0    | Coast   |

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use micromath::F32Ext;

use crate::drivers::SpeedControl;
use crate::error::{Error, Result};

pub struct L293<IN1, IN2, EN> {
    in1: IN1,
    in2: IN2,
    enable: EN,
    speed: f32,
}

impl<IN1, IN2, EN> L293<IN1, IN2, EN>
where
    IN1: OutputPin,
    IN2: OutputPin,
    EN: SetDutyCycle,
{
    /// Construct a stopped motor.
    pub fn new(mut in1: IN1, mut in2: IN2, mut enable: EN) -> Self {
        in1.set_low().ok();
        in2.set_low().ok();
        enable.set_duty_cycle_fully_off().ok();
        Self {
            in1,
            in2,
            enable,
            speed: 0.0,
        }
    }

    /// Enable-pin duty code for a speed magnitude.
    #[inline]
    fn duty_for(&self, speed: f32) -> u16 {
        let max = self.enable.max_duty_cycle();
        (speed.abs() * max as f32) as u16
    }

    pub fn free(self) -> (IN1, IN2, EN) {
        (self.in1, self.in2, self.enable)
    }
}

impl<IN1, IN2, EN> SpeedControl for L293<IN1, IN2, EN>
where
    IN1: OutputPin,
    IN2: OutputPin,
    EN: SetDutyCycle,
{
    /// `speed` - from -1.0 (full reverse) to 1.0 (full forward). Zero leaves the bridge in the
    /// forward pattern with no power.
    fn set_speed(&mut self, speed: f32) -> Result<()> {
        if !(-1.0..=1.0).contains(&speed) {
            return Err(Error::InvalidSpeed);
        }

        if speed < 0.0 {
            self.in1.set_low().map_err(|_| Error::Pin)?;
            self.in2.set_high().map_err(|_| Error::Pin)?;
        } else {
            self.in1.set_high().map_err(|_| Error::Pin)?;
            self.in2.set_low().map_err(|_| Error::Pin)?;
        }

        let duty = self.duty_for(speed);
        self.enable.set_duty_cycle(duty).map_err(|_| Error::Pwm)?;

        self.speed = speed;
        Ok(())
    }

    #[inline]
    fn speed(&self) -> f32 {
        self.speed
    }
}
