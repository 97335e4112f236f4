// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Coarse position feedback of the stock RC-truck steering servo.
//!
//! The servo's wiper board is read in two phases: drive one select line high and sample both
//! sense lines, then repeat with the other select line. The four sampled bits identify one of five
//! wiper positions.
//!
//! Wiring:
//! - White (output): select phase 1
//! - Purple (output): select phase 2
//! - Blue (input): sense A
//! - Green (input): sense B
//!
//! | Phase 2 Green | Phase 2 Blue | Phase 1 Green | Phase 1 Blue | Code   | Position     |
//! |---------------|--------------|---------------|--------------|--------|--------------|
//! | 0             | 0            | 0             | 0            | `0x00` | Center       |
//! | 0             | 0            | 1             | 0            | `0x02` | Slight right |
//! | 0             | 1            | 0             | 0            | `0x04` | Center       |
//! | 0             | 1            | 1             | 0            | `0x06` | Right edge   |
//! | 1             | 1            | 0             | 0            | `0x0C` | Slight left  |
//! | 1             | 0            | 0             | 1            | `0x09` | Left edge    |

use embedded_hal::digital::{InputPin, OutputPin};

use crate::drivers::PositionSense;
use crate::error::{Error, Result};

/// Decoded wiper position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PositionCode {
    Center,
    SlightRight,
    RightEdge,
    SlightLeft,
    LeftEdge,
    /// Any code outside the table, carrying the raw bits.
    Unknown(u8),
}

impl PositionCode {
    /// Decode the combined 4-bit sample.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0x00 | 0x04 => PositionCode::Center,
            0x02 => PositionCode::SlightRight,
            0x06 => PositionCode::RightEdge,
            0x0C => PositionCode::SlightLeft,
            0x09 => PositionCode::LeftEdge,
            other => PositionCode::Unknown(other),
        }
    }

    /// Relative position rank, left edge `-2` to right edge `2`. `None` for an unknown code.
    pub fn rank(&self) -> Option<i8> {
        match self {
            PositionCode::LeftEdge => Some(-2),
            PositionCode::SlightLeft => Some(-1),
            PositionCode::Center => Some(0),
            PositionCode::SlightRight => Some(1),
            PositionCode::RightEdge => Some(2),
            PositionCode::Unknown(_) => None,
        }
    }

    /// Inverse of [`rank`](Self::rank) for the five known positions.
    pub fn from_rank(rank: i8) -> Self {
        match rank {
            -2 => PositionCode::LeftEdge,
            -1 => PositionCode::SlightLeft,
            0 => PositionCode::Center,
            1 => PositionCode::SlightRight,
            2 => PositionCode::RightEdge,
            _ => PositionCode::Unknown(0xFF),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PositionCode::Center => "center",
            PositionCode::SlightRight => "slight right",
            PositionCode::RightEdge => "right edge",
            PositionCode::SlightLeft => "slight left",
            PositionCode::LeftEdge => "left edge",
            PositionCode::Unknown(_) => "error",
        }
    }
}

pub struct PositionSensor<SEL1, SEL2, SENSE1, SENSE2> {
    select1: SEL1,
    select2: SEL2,
    sense_a: SENSE1,
    sense_b: SENSE2,
}

impl<SEL1, SEL2, SENSE1, SENSE2> PositionSensor<SEL1, SEL2, SENSE1, SENSE2>
where
    SEL1: OutputPin,
    SEL2: OutputPin,
    SENSE1: InputPin,
    SENSE2: InputPin,
{
    pub fn new(mut select1: SEL1, mut select2: SEL2, sense_a: SENSE1, sense_b: SENSE2) -> Self {
        select1.set_low().ok();
        select2.set_low().ok();
        Self {
            select1,
            select2,
            sense_a,
            sense_b,
        }
    }

    /// Sample both phases and return the raw 4-bit code.
    pub fn read_raw(&mut self) -> Result<u8> {
        let mut raw = 0u8;

        self.select1.set_low().map_err(|_| Error::Pin)?;
        self.select2.set_low().map_err(|_| Error::Pin)?;

        self.select1.set_high().map_err(|_| Error::Pin)?;
        if self.sense_a.is_high().map_err(|_| Error::Pin)? {
            raw |= 0x01;
        }
        if self.sense_b.is_high().map_err(|_| Error::Pin)? {
            raw |= 0x02;
        }

        self.select1.set_low().map_err(|_| Error::Pin)?;
        self.select2.set_high().map_err(|_| Error::Pin)?;
        if self.sense_a.is_high().map_err(|_| Error::Pin)? {
            raw |= 0x04;
        }
        if self.sense_b.is_high().map_err(|_| Error::Pin)? {
            raw |= 0x08;
        }

        self.select1.set_low().map_err(|_| Error::Pin)?;
        self.select2.set_low().map_err(|_| Error::Pin)?;

        Ok(raw)
    }

    pub fn free(self) -> (SEL1, SEL2, SENSE1, SENSE2) {
        (self.select1, self.select2, self.sense_a, self.sense_b)
    }
}

impl<SEL1, SEL2, SENSE1, SENSE2> PositionSense for PositionSensor<SEL1, SEL2, SENSE1, SENSE2>
where
    SEL1: OutputPin,
    SEL2: OutputPin,
    SENSE1: InputPin,
    SENSE2: InputPin,
{
    fn sample(&mut self) -> Result<PositionCode> {
        let code = PositionCode::from_raw(self.read_raw()?);
        log_debug!("steering feedback: {}", code.name());
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::mock::{MockInput, MockOutput};

    #[test]
    fn code_table() {
        assert_eq!(PositionCode::from_raw(0x00).rank(), Some(0));
        assert_eq!(PositionCode::from_raw(0x04).rank(), Some(0));
        assert_eq!(PositionCode::from_raw(0x02).rank(), Some(1));
        assert_eq!(PositionCode::from_raw(0x06).rank(), Some(2));
        assert_eq!(PositionCode::from_raw(0x0C).rank(), Some(-1));
        assert_eq!(PositionCode::from_raw(0x09).rank(), Some(-2));
    }

    #[test]
    fn unlisted_codes_are_unknown() {
        for raw in [0x01, 0x03, 0x05, 0x07, 0x08, 0x0A, 0x0B, 0x0D, 0x0E, 0x0F] {
            assert_eq!(PositionCode::from_raw(raw), PositionCode::Unknown(raw));
            assert_eq!(PositionCode::from_raw(raw).rank(), None);
        }
    }

    #[test]
    fn rank_inverse() {
        for rank in -2..=2 {
            assert_eq!(PositionCode::from_rank(rank).rank(), Some(rank));
        }
        assert_eq!(PositionCode::from_rank(3).rank(), None);
    }

    #[test]
    fn two_phase_read_assembles_code() {
        let white = MockOutput::new();
        let purple = MockOutput::new();
        let blue = MockInput::new(false);
        let green = MockInput::new(false);
        // Phase 1: blue=1, green=0. Phase 2: blue=0, green=1. -> 0x09 (left edge)
        blue.push(&[true, false]);
        green.push(&[false, true]);

        let mut sensor =
            PositionSensor::new(white.clone(), purple.clone(), blue.clone(), green.clone());
        assert_eq!(sensor.sample().unwrap(), PositionCode::LeftEdge);

        assert_eq!(white.rising_edges(), 1);
        assert_eq!(purple.rising_edges(), 1);
        assert!(!white.level());
        assert!(!purple.level());
        assert_eq!(blue.reads(), 2);
        assert_eq!(green.reads(), 2);
    }

    #[test]
    fn right_edge_read() {
        let blue = MockInput::new(false);
        let green = MockInput::new(false);
        // Phase 1: green=1. Phase 2: blue=1. -> 0x06
        blue.push(&[false, true]);
        green.push(&[true, false]);

        let mut sensor = PositionSensor::new(MockOutput::new(), MockOutput::new(), blue, green);
        assert_eq!(sensor.read_raw().unwrap(), 0x06);
    }
}
