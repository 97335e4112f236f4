// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Sweeping ultrasonic eye.
//!
//! The rangefinder sits on an open-loop [`PwmServo`]. A sweep walks the servo across its travel in
//! equal steps, takes one reading per step after a settle delay and reports the mean of the
//! readings inside the configured window. Consecutive sweeps alternate direction.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::{EyeConfig, ServoLimits};
use crate::control::Step;
use crate::drivers::Ranging;
use crate::error::Result;
use crate::motors::PwmServo;

/// Angles visited by one sweep.
///
/// Forward runs from `min_angle` up to just below `max_angle`, backward from `max_angle` down to
/// just above `min_angle`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SweepAngles {
    next: i32,
    end: i32,
    step: i32,
    forward: bool,
}

impl SweepAngles {
    pub fn new(limits: &ServoLimits, divisions: u32, forward: bool) -> Self {
        let span = limits.max_angle - limits.min_angle;
        let step = (span / divisions.max(1) as i32).max(1);
        let (next, end) = if forward {
            (limits.min_angle, limits.max_angle)
        } else {
            (limits.max_angle, limits.min_angle)
        };
        Self {
            next,
            end,
            step,
            forward,
        }
    }
}

impl Iterator for SweepAngles {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let angle = self.next;
        if self.forward {
            if angle >= self.end {
                return None;
            }
            self.next += self.step;
        } else {
            if angle <= self.end {
                return None;
            }
            self.next -= self.step;
        }
        Some(angle)
    }
}

/// A sweep in progress.
#[derive(Copy, Clone, Debug)]
struct Pass {
    angles: SweepAngles,
    /// The servo was moved and is settling; sample before moving on.
    settling: bool,
    sum: f32,
    hits: u32,
}

pub struct EchoSweeper<PWM, R> {
    servo: PwmServo<PWM>,
    ranger: R,
    cfg: EyeConfig,
    is_forward: bool,
    average_distance: Option<f32>,
    pass: Option<Pass>,
}

impl<PWM, R> EchoSweeper<PWM, R>
where
    PWM: SetDutyCycle,
    R: Ranging,
{
    /// Wrap the eye servo channel and rangefinder. The servo is sent home.
    pub fn new(pwm: PWM, ranger: R, cfg: &EyeConfig) -> Result<Self> {
        Ok(Self {
            servo: PwmServo::new(pwm, cfg.limits)?,
            ranger,
            cfg: *cfg,
            is_forward: true,
            average_distance: None,
            pass: None,
        })
    }

    /// Advance the current sweep by one step, starting a new one if none is running.
    ///
    /// Returns `Wait(settle)` after each servo move and `Done(mean)` once the pass is complete. A
    /// failed move or reading abandons the pass; the next call starts over in the same direction.
    pub fn poll_sweep<D: DelayNs>(&mut self, delay: &mut D) -> Result<Step<Option<f32>>> {
        let mut pass = self.pass.take().unwrap_or_else(|| Pass {
            angles: SweepAngles::new(&self.cfg.limits, self.cfg.divisions, self.is_forward),
            settling: false,
            sum: 0.0,
            hits: 0,
        });

        if pass.settling {
            pass.settling = false;
            if let Some(distance) = self.ranger.distance(delay)? {
                if self.in_window(distance) {
                    pass.sum += distance;
                    pass.hits += 1;
                }
            }
        }

        if let Some(angle) = pass.angles.next() {
            self.servo.set_angle(angle)?;
            pass.settling = true;
            self.pass = Some(pass);
            return Ok(Step::Wait(self.cfg.settle));
        }

        self.is_forward = !self.is_forward;
        self.average_distance = if pass.hits == 0 {
            log_debug!("eye sweep: no hits");
            None
        } else {
            let mean = pass.sum / pass.hits as f32;
            log_debug!("eye sweep: {} hits, mean {} in", pass.hits, mean);
            Some(mean)
        };
        Ok(Step::Done(self.average_distance))
    }

    /// Run one full sweep, blocking through every settle delay.
    pub fn sweep<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<f32>> {
        loop {
            match self.poll_sweep(delay)? {
                Step::Wait(wait) => delay.delay_ms(wait.to_millis()),
                Step::Done(mean) => return Ok(mean),
            }
        }
    }

    /// Aim the eye directly. Abandons a sweep in progress.
    pub fn set_angle(&mut self, angle: i32) -> Result<()> {
        self.servo.set_angle(angle)?;
        self.pass = None;
        Ok(())
    }

    #[inline]
    pub fn go_home(&mut self) -> Result<()> {
        self.set_angle(self.cfg.limits.home_angle)
    }

    /// One raw reading at the current aim, without filtering.
    pub fn distance_now<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<f32>> {
        self.ranger.distance(delay)
    }

    fn in_window(&self, distance: f32) -> bool {
        (self.cfg.min_range..=self.cfg.max_range).contains(&distance)
    }

    /// Last commanded angle (degrees).
    #[inline]
    pub fn angle(&self) -> i32 {
        self.servo.angle()
    }

    /// Direction of the next sweep.
    #[inline]
    pub fn is_forward(&self) -> bool {
        self.is_forward
    }

    /// Mean of the last completed sweep.
    #[inline]
    pub fn average_distance(&self) -> Option<f32> {
        self.average_distance
    }

    #[inline]
    pub fn is_sweeping(&self) -> bool {
        self.pass.is_some()
    }

    #[inline]
    pub fn limits(&self) -> &ServoLimits {
        &self.cfg.limits
    }

    pub fn free(self) -> (PWM, R) {
        (self.servo.free(), self.ranger)
    }
}
