// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Logic
//!
//! This module turns button snapshots into actuator motion.
//!
//! ## Modules
//!
//! - [`intent`] - Pure mapping from buttons to a motion intent.
//! - [`steering`] - Bang-bang regulator for the position-feedback steering servo.
//! - [`sweeper`] - Sweeping ultrasonic eye.
//!
//! The regulator and the sweeper never sleep. Their step functions return a [`Step`] telling the
//! caller how long to wait before the next step; the blocking wrappers drive them with a
//! [`DelayNs`](embedded_hal::delay::DelayNs).

use fugit::MillisDurationU32;

pub mod intent;
pub mod steering;
pub mod sweeper;

pub use intent::{IntentMapper, MotionIntent, ScanRequest};
pub use steering::{SteerMode, SteerProgress, SteeringRegulator};
pub use sweeper::{EchoSweeper, SweepAngles};

/// Outcome of one state-machine step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Step<T> {
    /// Call the step function again once this much time has passed.
    Wait(MillisDurationU32),
    /// The operation finished.
    Done(T),
}
