// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bang-bang regulator for the stock steering servo.
//!
//! The servo is a bare DC motor with a five-position wiper for feedback (see
//! [`feedback`](crate::drivers::feedback)). Steering targets arrive in degrees and are converted
//! to the nearest feedback rank; all comparisons and error terms are in ranks.
//!
//! Each seek runs the motor at `base_speed + error_gain * |error|` for `delay_per_rank * |error|`,
//! stops and re-samples. Arrival is only reported on a later call, once the sample matches.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! loop {
//!     match steering.set_angle(intent.steering_angle, &mut delay) {
//!         Ok(SteerProgress::Arrived) => {}
//!         Ok(SteerProgress::Seeking) => {}
//!         Err(e) => log_warn!("steering: {}", e),
//!     }
//! }
//! ```

use embedded_hal::delay::DelayNs;
use fugit::MillisDurationU32;

use crate::config::{ServoLimits, SteeringConfig};
use crate::control::Step;
use crate::drivers::{PositionSense, SpeedControl};
use crate::error::{Error, Result};

/// Highest rank magnitude reported by the feedback board.
const EDGE_RANK: i32 = 2;

/// Result of one regulation call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SteerProgress {
    /// The last sample matched the target.
    Arrived,
    /// A seek pulse was run; the target is not confirmed yet.
    Seeking,
}

/// Regulator state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SteerMode {
    Seeking,
    Holding,
}

/// Step scheduled by the previous call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Pending {
    None,
    /// Motor is running; stop and re-sample next.
    SeekPulse,
    /// Motor stopped on target; confirm next.
    HoldDwell,
}

pub struct SteeringRegulator<M, S> {
    motor: M,
    sensor: S,
    cfg: SteeringConfig,
    mode: SteerMode,
    pending: Pending,

    /// Last sampled rank, `None` after an unrecognized code.
    rank: Option<i8>,
    /// Target rank of the previous call.
    last_target: Option<i8>,
    /// Confirmation samples taken while holding the current target.
    confirm_count: u8,
}

impl<M, S> SteeringRegulator<M, S>
where
    M: SpeedControl,
    S: PositionSense,
{
    /// Create a regulator assuming the servo rests at home.
    ///
    /// The assumption is checked by the confirmation samples of the first calls.
    pub fn new(motor: M, sensor: S, cfg: &SteeringConfig) -> Self {
        let home_rank = rank_for_angle(&cfg.limits, cfg.limits.home_angle);
        Self {
            motor,
            sensor,
            cfg: *cfg,
            mode: SteerMode::Holding,
            pending: Pending::None,
            rank: Some(home_rank),
            last_target: None,
            confirm_count: 0,
        }
    }

    /// Run one regulation step toward `target` (degrees).
    ///
    /// A step scheduled by the previous call is always completed first; `target` is only
    /// considered once nothing is pending.
    pub fn poll(&mut self, target: i32) -> Result<Step<SteerProgress>> {
        match self.pending {
            Pending::SeekPulse => {
                self.pending = Pending::None;
                self.motor.stop()?;
                self.resample()?;
                return Ok(Step::Done(SteerProgress::Seeking));
            }
            Pending::HoldDwell => {
                self.pending = Pending::None;
                // Stop sampling once confirmed, the wiper jitters around center.
                if self.confirm_count < self.cfg.confirm_limit {
                    self.resample()?;
                    self.confirm_count += 1;
                }
                return Ok(Step::Done(SteerProgress::Arrived));
            }
            Pending::None => {}
        }

        if !self.cfg.limits.contains(target) {
            log_warn!("steering target {} out of range", target);
            return Err(Error::AngleOutOfRange { angle: target });
        }

        let current = match self.rank {
            Some(rank) => rank,
            None => {
                log_warn!("steering feedback stale, re-sampling");
                self.resample()?;
                return Err(Error::StaleFeedback);
            }
        };

        let wanted = rank_for_angle(&self.cfg.limits, target);
        if self.last_target != Some(wanted) {
            self.confirm_count = 0;
            self.last_target = Some(wanted);
        }

        if current == wanted {
            self.motor.stop()?;
            self.mode = SteerMode::Holding;
            self.pending = Pending::HoldDwell;
            return Ok(Step::Wait(self.cfg.hold_delay));
        }

        self.confirm_count = 0;
        self.mode = SteerMode::Seeking;

        let error = (wanted as i32 - current as i32).unsigned_abs();
        let magnitude = (self.cfg.base_speed + self.cfg.error_gain * error as f32).min(1.0);
        let speed = if wanted > current {
            magnitude
        } else {
            -magnitude
        };

        self.motor.set_speed(speed)?;
        self.pending = Pending::SeekPulse;

        Ok(Step::Wait(MillisDurationU32::millis(
            self.cfg.delay_per_rank.to_millis() * error,
        )))
    }

    /// Run one full regulation call, blocking for the seek pulse or hold dwell.
    pub fn set_angle<D: DelayNs>(&mut self, target: i32, delay: &mut D) -> Result<SteerProgress> {
        loop {
            match self.poll(target)? {
                Step::Wait(wait) => delay.delay_ms(wait.to_millis()),
                Step::Done(progress) => return Ok(progress),
            }
        }
    }

    /// Regulate toward the home angle.
    #[inline]
    pub fn go_home<D: DelayNs>(&mut self, delay: &mut D) -> Result<SteerProgress> {
        self.set_angle(self.cfg.limits.home_angle, delay)
    }

    fn resample(&mut self) -> Result<()> {
        self.rank = self.sensor.sample()?.rank();
        Ok(())
    }

    /// Last sampled position in degrees, or home if the last sample was unrecognized.
    pub fn angle(&self) -> i32 {
        match self.rank {
            Some(rank) => angle_for_rank(&self.cfg.limits, rank),
            None => self.cfg.limits.home_angle,
        }
    }

    /// Last sampled feedback rank.
    #[inline]
    pub fn rank(&self) -> Option<i8> {
        self.rank
    }

    #[inline]
    pub fn mode(&self) -> SteerMode {
        self.mode
    }

    #[inline]
    pub fn confirm_count(&self) -> u8 {
        self.confirm_count
    }

    #[inline]
    pub fn limits(&self) -> &ServoLimits {
        &self.cfg.limits
    }

    /// Access the steering motor.
    #[inline]
    pub fn motor(&mut self) -> &mut M {
        &mut self.motor
    }

    pub fn free(self) -> (M, S) {
        (self.motor, self.sensor)
    }
}

/// Nearest feedback rank for an angle within `limits`.
pub fn rank_for_angle(limits: &ServoLimits, angle: i32) -> i8 {
    let span = limits.max_angle - limits.min_angle;
    if span <= 0 {
        return 0;
    }
    let offset = limits.clamp(angle) - limits.min_angle;
    // Round half up of offset * 4 / span.
    let steps = (offset * 4 * EDGE_RANK + span) / (2 * span);
    (steps - EDGE_RANK) as i8
}

/// Angle represented by a feedback rank.
pub fn angle_for_rank(limits: &ServoLimits, rank: i8) -> i32 {
    let span = limits.max_angle - limits.min_angle;
    let steps = (rank as i32).clamp(-EDGE_RANK, EDGE_RANK) + EDGE_RANK;
    limits.min_angle + steps * span / (2 * EDGE_RANK)
}
