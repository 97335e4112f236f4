// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Open-loop hobby servo (SG90 class) on a 50 Hz PWM channel.
//!
//! The servo has no feedback: the reported angle is simply the last angle successfully commanded.
//! Pulse widths follow the usual convention of 1 ms = 0° and 2 ms = 180°, i.e. 5 % to 10 % of a
//! 20 ms period.

use embedded_hal::pwm::SetDutyCycle;
use micromath::F32Ext;

use crate::config::ServoLimits;
use crate::error::{Error, Result};

/// Duty fraction at 0°.
const DUTY_AT_0_DEG: f32 = 0.05;
/// Duty fraction gained per degree (5 % over 180°).
const DUTY_PER_DEG: f32 = 0.05 / 180.0;

/// PWM servo wrapper that remembers its commanded angle.
pub struct PwmServo<PWM> {
    pwm: PWM,
    limits: ServoLimits,
    angle: i32,
}

impl<PWM: SetDutyCycle> PwmServo<PWM> {
    /// Create the servo and drive it to its home angle.
    pub fn new(pwm: PWM, limits: ServoLimits) -> Result<Self> {
        let mut servo = Self {
            pwm,
            limits,
            angle: limits.home_angle,
        };
        servo.go_home()?;
        Ok(servo)
    }

    /// Duty-cycle code for `angle`, scaled to the channel's resolution.
    pub fn duty_for_angle(&self, angle: i32) -> u16 {
        let max = self.pwm.max_duty_cycle() as f32;
        let fraction = DUTY_AT_0_DEG + DUTY_PER_DEG * angle as f32;
        (max * fraction).round() as u16
    }

    /// Command a new angle. Angles outside the travel are rejected and nothing moves.
    pub fn set_angle(&mut self, angle: i32) -> Result<()> {
        if !self.limits.contains(angle) {
            return Err(Error::AngleOutOfRange { angle });
        }

        let duty = self.duty_for_angle(angle);
        self.pwm.set_duty_cycle(duty).map_err(|_| Error::Pwm)?;
        self.angle = angle;
        Ok(())
    }

    #[inline]
    pub fn go_home(&mut self) -> Result<()> {
        self.set_angle(self.limits.home_angle)
    }

    /// Last commanded angle (degrees).
    #[inline]
    pub fn angle(&self) -> i32 {
        self.angle
    }

    #[inline]
    pub fn limits(&self) -> &ServoLimits {
        &self.limits
    }

    pub fn free(self) -> PWM {
        self.pwm
    }
}
