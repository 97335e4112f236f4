// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Actuator Abstractions
//!
//! This module contains actuator-level wrappers that sit above the device-level drivers in
//! `drivers`.
//!
//! ## Modules
//!
//! - [`servo`] - Open-loop hobby servo on a PWM channel (aims the eye).

pub mod servo;

pub use servo::PwmServo;
