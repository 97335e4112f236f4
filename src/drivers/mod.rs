// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the `embedded-hal` capabilities and
//! below the control logic.
//!
//! ## Existing drivers
//!
//! - [`gamepad`] – NES-compatible gamepad shift register
//! - [`l293`] – L293 half-H bridge for a brushed DC motor
//! - [`feedback`] – two-phase position feedback of the stock steering servo
//! - [`hcsr04`] – HC-SR04 ultrasonic rangefinder
//!
//! The traits below are the seams the control layer is written against.

use embedded_hal::delay::DelayNs;

use crate::error::Result;

pub mod feedback;
pub mod gamepad;
pub mod hcsr04;
pub mod l293;

pub use feedback::{PositionCode, PositionSensor};
pub use gamepad::{ButtonSource, Buttons, NesGamepad};
pub use hcsr04::Hcsr04;
pub use l293::L293;

/// Bidirectional speed command, `-1.0` (full reverse) to `1.0` (full forward).
pub trait SpeedControl {
    /// Rejects speeds outside `[-1.0, 1.0]` with `Error::InvalidSpeed`, leaving the motor as it was.
    fn set_speed(&mut self, speed: f32) -> Result<()>;

    /// Last accepted speed.
    fn speed(&self) -> f32;

    #[inline]
    fn stop(&mut self) -> Result<()> {
        self.set_speed(0.0)
    }
}

/// Coarse position feedback.
pub trait PositionSense {
    fn sample(&mut self) -> Result<PositionCode>;
}

/// Single distance reading in inches, `None` when nothing echoed back in range.
pub trait Ranging {
    fn distance<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<f32>>;
}
