// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Rover
//!
//! Owns every component of the truck and exposes the operations the host loop calls once per
//! cycle: decode the pad, map it to an intent, then apply the intent to the drive motor, the
//! steering regulator and the eye.
//!
//! Hardware errors never escape [`Rover::cycle`]. They are logged and the cycle carries on with
//! the remaining actuators.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::RoverConfig;
use crate::control::{
    EchoSweeper, IntentMapper, MotionIntent, ScanRequest, SteerProgress, SteeringRegulator,
};
use crate::drivers::{ButtonSource, Buttons, PositionSense, Ranging, SpeedControl};
use crate::error::Result;

/// What one call to [`Rover::cycle`] did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CycleReport {
    pub buttons: Buttons,
    pub intent: MotionIntent,
    /// Steering result, `None` if the regulator reported an error.
    pub steering: Option<SteerProgress>,
    /// The eye ran an autonomous sweep this cycle.
    pub swept: bool,
    /// Mean distance of that sweep.
    pub distance: Option<f32>,
}

pub struct Rover<G, D, SM, SS, EP, ER> {
    gamepad: G,
    drive: D,
    steering: SteeringRegulator<SM, SS>,
    eye: EchoSweeper<EP, ER>,
    mapper: IntentMapper,

    scan_enabled: bool,
    last_buttons: Buttons,
}

impl<G, D, SM, SS, EP, ER> Rover<G, D, SM, SS, EP, ER>
where
    G: ButtonSource,
    D: SpeedControl,
    SM: SpeedControl,
    SS: PositionSense,
    EP: SetDutyCycle,
    ER: Ranging,
{
    /// Validate `cfg` and assemble the rover. The eye is sent home; nothing else moves.
    pub fn new(
        cfg: &RoverConfig,
        gamepad: G,
        drive: D,
        steering_motor: SM,
        steering_sensor: SS,
        eye_pwm: EP,
        eye_ranger: ER,
    ) -> Result<Self> {
        cfg.validate()?;

        Ok(Self {
            gamepad,
            drive,
            steering: SteeringRegulator::new(steering_motor, steering_sensor, &cfg.steering),
            eye: EchoSweeper::new(eye_pwm, eye_ranger, &cfg.eye)?,
            mapper: IntentMapper::new(cfg),
            scan_enabled: true,
            last_buttons: Buttons::empty(),
        })
    }

    /// Read the pad. A failed read is logged and treated as nothing pressed.
    pub fn decode_buttons<DL: DelayNs>(&mut self, delay: &mut DL) -> Buttons {
        let buttons = match self.gamepad.read_buttons(delay) {
            Ok(buttons) => buttons,
            Err(e) => {
                log_warn!("gamepad read failed: {}", e);
                Buttons::empty()
            }
        };

        if buttons != self.last_buttons {
            log_debug!("buttons: {:#x}", buttons.bits());
            if buttons.is_disconnected() {
                log_info!("gamepad disconnected");
            }
        }
        self.last_buttons = buttons;
        buttons
    }

    /// Map `buttons` to targets using the actuators' current angles.
    pub fn compute_intent(&self, buttons: Buttons) -> MotionIntent {
        self.mapper
            .respond(buttons, self.steering.angle(), self.eye.angle())
    }

    /// Command the rear motor.
    pub fn apply_drive(&mut self, intent: &MotionIntent) -> Result<()> {
        self.drive.set_speed(intent.speed)
    }

    /// One regulation call toward the intent's steering angle.
    pub fn apply_steering<DL: DelayNs>(
        &mut self,
        intent: &MotionIntent,
        delay: &mut DL,
    ) -> Result<SteerProgress> {
        self.steering.set_angle(intent.steering_angle, delay)
    }

    /// Aim the eye at the intent's eye angle.
    pub fn apply_eye_aim(&mut self, intent: &MotionIntent) -> Result<()> {
        self.eye.set_angle(intent.eye_angle)
    }

    /// Run one full eye sweep and return its mean distance.
    pub fn sweep_eye<DL: DelayNs>(&mut self, delay: &mut DL) -> Result<Option<f32>> {
        self.eye.sweep(delay)
    }

    /// One raw reading in the eye's current direction.
    pub fn read_eye_distance_now<DL: DelayNs>(&mut self, delay: &mut DL) -> Result<Option<f32>> {
        self.eye.distance_now(delay)
    }

    /// Apply a scan request carried by the intent, if any.
    pub fn apply_scan(&mut self, intent: &MotionIntent) {
        let enabled = match intent.scan {
            Some(ScanRequest::Enable) => true,
            Some(ScanRequest::Disable) => false,
            None => return,
        };
        if enabled != self.scan_enabled {
            log_info!("eye scanning {}", if enabled { "enabled" } else { "disabled" });
        }
        self.scan_enabled = enabled;
    }

    /// Stop the drive and bring steering and eye home.
    pub fn go_home<DL: DelayNs>(&mut self, delay: &mut DL) -> Result<()> {
        self.drive.stop()?;
        self.eye.go_home()?;
        self.steering.go_home(delay)?;
        Ok(())
    }

    /// Run one full control cycle.
    ///
    /// The eye follows the intent while under manual control or with scanning disabled, and sweeps
    /// otherwise.
    pub fn cycle<DL: DelayNs>(&mut self, delay: &mut DL) -> CycleReport {
        let buttons = self.decode_buttons(delay);
        let intent = self.compute_intent(buttons);
        self.apply_scan(&intent);

        if let Err(e) = self.apply_drive(&intent) {
            log_warn!("drive: {}", e);
        }

        let steering = match self.apply_steering(&intent, delay) {
            Ok(progress) => Some(progress),
            Err(e) => {
                log_debug!("steering: {}", e);
                None
            }
        };

        let mut swept = false;
        let mut distance = None;
        if !intent.manual_eye && self.scan_enabled {
            match self.sweep_eye(delay) {
                Ok(mean) => {
                    swept = true;
                    distance = mean;
                }
                Err(e) => log_warn!("eye sweep: {}", e),
            }
        } else if let Err(e) = self.apply_eye_aim(&intent) {
            log_warn!("eye aim: {}", e);
        }

        CycleReport {
            buttons,
            intent,
            steering,
            swept,
            distance,
        }
    }

    #[inline]
    pub fn scan_enabled(&self) -> bool {
        self.scan_enabled
    }

    #[inline]
    pub fn steering(&self) -> &SteeringRegulator<SM, SS> {
        &self.steering
    }

    #[inline]
    pub fn eye(&self) -> &EchoSweeper<EP, ER> {
        &self.eye
    }

    #[inline]
    pub fn drive(&self) -> &D {
        &self.drive
    }
}
