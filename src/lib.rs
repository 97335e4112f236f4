// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # AutoRC Firmware
//!
//! This crate contains the firmware components for a remote-controlled truck driven by an NES
//! gamepad, written in Rust, targeting an STM32F777 MCU.
//!
//! Each control cycle decodes the gamepad, maps the pressed buttons to a motion intent and applies
//! it to the rear drive motor, the position-feedback steering servo and the ultrasonic "eye".
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | Capability traits, host mocks and STM32F7 board adapters |
//! | [`drivers`] | Device-level drivers (NES gamepad, L293, HC-SR04, steering feedback) |
//! | [`motors`] | Actuator wrappers above the drivers (hobby PWM servo) |
//! | [`control`] | Control logic (intent mapping, steering regulation, eye sweep) |
//! | [`vehicle`] | The [`Rover`](vehicle::Rover) aggregate driven by the host loop |
//! | [`config`] | Tuned constants and limits |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features firmware --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
pub mod logging;

pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod hw;
pub mod motors;
pub mod vehicle;

pub use config::RoverConfig;
pub use error::{Error, Result};
pub use vehicle::Rover;
