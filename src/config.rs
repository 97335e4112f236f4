// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Tuned constants and travel limits.
//!
//! Every component takes its section of [`RoverConfig`] at construction. The defaults are the
//! values the truck was tuned with on the bench.

use fugit::{MicrosDurationU32, MillisDurationU32};

use crate::error::{Error, Result};

/// Travel of a single servo, in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ServoLimits {
    pub min_angle: i32,
    pub max_angle: i32,
    pub home_angle: i32,
}

impl ServoLimits {
    pub const fn new(min_angle: i32, max_angle: i32, home_angle: i32) -> Self {
        Self {
            min_angle,
            max_angle,
            home_angle,
        }
    }

    /// Returns true if `angle` lies within `[min_angle, max_angle]`.
    #[inline]
    pub fn contains(&self, angle: i32) -> bool {
        (self.min_angle..=self.max_angle).contains(&angle)
    }

    /// Limit `angle` to the travel.
    #[inline]
    pub fn clamp(&self, angle: i32) -> i32 {
        angle.clamp(self.min_angle, self.max_angle)
    }

    fn validate(&self) -> Result<()> {
        if self.min_angle > self.max_angle || !self.contains(self.home_angle) {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }
}

/// NES gamepad shift-register timing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GamepadConfig {
    /// Settle time after every latch or clock edge.
    pub settle: MicrosDurationU32,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            settle: MicrosDurationU32::micros(1_000),
        }
    }
}

/// Rear drive speeds, as a fraction of full power.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DriveConfig {
    pub regular_speed: f32,
    /// Used while B is held.
    pub fast_speed: f32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            regular_speed: 0.5,
            fast_speed: 1.0,
        }
    }
}

/// Position-feedback steering regulator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SteeringConfig {
    pub limits: ServoLimits,
    /// Seek speed at zero rank error.
    pub base_speed: f32,
    /// Additional seek speed per rank of error.
    pub error_gain: f32,
    /// Drive time per rank of error.
    pub delay_per_rank: MillisDurationU32,
    /// Dwell after stopping on target before the confirmation sample.
    pub hold_delay: MillisDurationU32,
    /// Number of confirmation samples taken while holding.
    pub confirm_limit: u8,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            limits: ServoLimits::new(0, 180, 90),
            base_speed: 0.85,
            error_gain: 0.0375,
            delay_per_rank: MillisDurationU32::millis(20),
            hold_delay: MillisDurationU32::millis(100),
            confirm_limit: 3,
        }
    }
}

/// Sweeping ultrasonic eye.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EyeConfig {
    pub limits: ServoLimits,
    /// Number of steps a sweep is split into.
    pub divisions: u32,
    /// Readings outside `[min_range, max_range]` (inches) are discarded.
    pub min_range: f32,
    pub max_range: f32,
    /// Servo settle time before each reading.
    pub settle: MillisDurationU32,
}

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            limits: ServoLimits::new(25, 155, 90),
            divisions: 25,
            min_range: 12.0,
            max_range: 60.0,
            settle: MillisDurationU32::millis(10),
        }
    }
}

/// HC-SR04 timing and conversion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RangefinderConfig {
    pub trigger_pulse: MicrosDurationU32,
    /// Echo time per inch of distance.
    pub micros_per_inch: f32,
    /// Calibration offset subtracted from every reading (inches).
    pub offset_in: f32,
    /// Readings above this (inches) are reported as no echo.
    pub max_distance_in: f32,
}

impl Default for RangefinderConfig {
    fn default() -> Self {
        Self {
            trigger_pulse: MicrosDurationU32::micros(10),
            micros_per_inch: 146.591,
            offset_in: 0.088,
            max_distance_in: 400.0,
        }
    }
}

/// Button-to-intent policy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntentConfig {
    /// Degrees the eye moves per cycle while manually nudged.
    pub eye_nudge: i32,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self { eye_nudge: 3 }
    }
}

/// Complete configuration, handed out section by section at construction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RoverConfig {
    pub gamepad: GamepadConfig,
    pub drive: DriveConfig,
    pub steering: SteeringConfig,
    pub eye: EyeConfig,
    pub rangefinder: RangefinderConfig,
    pub intent: IntentConfig,
}

impl RoverConfig {
    /// Check that the limits are self-consistent.
    pub fn validate(&self) -> Result<()> {
        self.steering.limits.validate()?;
        self.eye.limits.validate()?;

        let speeds_ok = self.drive.regular_speed > 0.0
            && self.drive.regular_speed <= 1.0
            && self.drive.fast_speed > 0.0
            && self.drive.fast_speed <= 1.0;
        let eye_ok = self.eye.divisions > 0 && self.eye.min_range <= self.eye.max_range;
        let seek_ok = self.steering.base_speed >= 0.0
            && self.steering.error_gain >= 0.0
            && self.rangefinder.micros_per_inch > 0.0;

        if speeds_ok && eye_ok && seek_ok && self.intent.eye_nudge >= 0 {
            Ok(())
        } else {
            Err(Error::InvalidConfig)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(RoverConfig::default().validate(), Ok(()));
    }

    #[test]
    fn home_outside_travel_is_rejected() {
        let mut cfg = RoverConfig::default();
        cfg.eye.limits.home_angle = 10;
        assert_eq!(cfg.validate(), Err(Error::InvalidConfig));
    }

    #[test]
    fn zero_divisions_is_rejected() {
        let mut cfg = RoverConfig::default();
        cfg.eye.divisions = 0;
        assert_eq!(cfg.validate(), Err(Error::InvalidConfig));
    }

    #[test]
    fn inverted_range_window_is_rejected() {
        let mut cfg = RoverConfig::default();
        cfg.eye.min_range = 70.0;
        assert_eq!(cfg.validate(), Err(Error::InvalidConfig));
    }

    #[test]
    fn limits_contain_and_clamp() {
        let limits = ServoLimits::new(25, 155, 90);
        assert!(limits.contains(25));
        assert!(limits.contains(155));
        assert!(!limits.contains(156));
        assert_eq!(limits.clamp(160), 155);
        assert_eq!(limits.clamp(0), 25);
    }
}
