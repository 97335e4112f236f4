// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Capabilities
//!
//! Everything above this module talks to the board through `embedded-hal` 1.0 traits:
//!
//! - digital lines: [`OutputPin`](embedded_hal::digital::OutputPin) /
//!   [`InputPin`](embedded_hal::digital::InputPin)
//! - PWM channels: [`SetDutyCycle`](embedded_hal::pwm::SetDutyCycle)
//! - blocking delays: [`DelayNs`](embedded_hal::delay::DelayNs)
//!
//! plus [`EchoTimer`] for the rangefinder echo, which `embedded-hal` has no trait for.
//!
//! The STM32F7 implementations live in [`board`] and [`pins`] (feature `firmware`).

use fugit::MicrosDurationU32;

#[cfg(feature = "firmware")]
pub mod board;
#[cfg(feature = "firmware")]
pub mod pins;

#[cfg(test)]
pub mod mock;

/// Measures the width of the next high pulse on an echo line.
///
/// Timeout behaviour belongs to the implementor; a timed-out wait should report a zero width.
pub trait EchoTimer {
    type Error: core::fmt::Debug;

    fn pulse_width(&mut self) -> Result<MicrosDurationU32, Self::Error>;
}
