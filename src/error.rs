// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Crate error type.

use core::fmt;

/// Result type for firmware operations.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A digital pin read or write failed.
    Pin,
    /// A PWM channel rejected a duty-cycle update.
    Pwm,
    /// The echo pulse could not be measured.
    Echo,
    /// Requested angle (degrees) is outside the actuator's travel.
    AngleOutOfRange { angle: i32 },
    /// Requested motor speed is outside `[-1.0, 1.0]`.
    InvalidSpeed,
    /// The last position feedback sample was unrecognized; a fresh sample was taken.
    StaleFeedback,
    /// Configuration limits are inconsistent.
    InvalidConfig,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pin => write!(f, "digital pin access failed"),
            Error::Pwm => write!(f, "PWM duty update failed"),
            Error::Echo => write!(f, "echo pulse measurement failed"),
            Error::AngleOutOfRange { angle } => write!(f, "angle {} out of range", angle),
            Error::InvalidSpeed => write!(f, "speed outside [-1.0, 1.0]"),
            Error::StaleFeedback => write!(f, "stale position feedback"),
            Error::InvalidConfig => write!(f, "invalid configuration"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_rejected_angle() {
        let msg = format!("{}", Error::AngleOutOfRange { angle: 200 });
        assert_eq!(msg, "angle 200 out of range");
    }
}
