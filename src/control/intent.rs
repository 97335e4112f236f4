// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Button-to-intent mapping.
//!
//! | Button | Effect |
//! | ------ | ------ |
//! | A | Manual eye: hold the eye where it is, Left/Right nudge it instead of steering |
//! | B | Fast drive speed |
//! | Select | Request eye scanning off |
//! | Start | Request eye scanning on |
//! | Up | Drive forward |
//! | Down | Drive backward (wins over Up) |
//! | Left | Steer fully left, or nudge the eye toward its max angle |
//! | Right | Steer fully right, or nudge the eye toward its min angle (wins over Left) |
//!
//! Nothing pressed and an unplugged pad both return the neutral intent.

use crate::config::{RoverConfig, ServoLimits};
use crate::drivers::Buttons;

/// Request to change the eye's autonomous scanning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScanRequest {
    Enable,
    Disable,
}

/// Targets for one control cycle. Always produced and applied as a whole.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotionIntent {
    /// Drive power, sign is direction.
    pub speed: f32,
    /// Steering target (degrees).
    pub steering_angle: i32,
    /// Eye target (degrees).
    pub eye_angle: i32,
    /// The eye is under manual control this cycle.
    pub manual_eye: bool,
    pub scan: Option<ScanRequest>,
}

/// Stateless mapper holding the limits and speeds it needs.
#[derive(Copy, Clone, Debug)]
pub struct IntentMapper {
    steering: ServoLimits,
    eye: ServoLimits,
    regular_speed: f32,
    fast_speed: f32,
    eye_nudge: i32,
}

impl IntentMapper {
    pub fn new(cfg: &RoverConfig) -> Self {
        Self {
            steering: cfg.steering.limits,
            eye: cfg.eye.limits,
            regular_speed: cfg.drive.regular_speed,
            fast_speed: cfg.drive.fast_speed,
            eye_nudge: cfg.intent.eye_nudge,
        }
    }

    /// Stopped, steering and eye at home.
    pub fn neutral(&self) -> MotionIntent {
        MotionIntent {
            speed: 0.0,
            steering_angle: self.steering.home_angle,
            eye_angle: self.eye.home_angle,
            manual_eye: false,
            scan: None,
        }
    }

    /// Map a button snapshot to this cycle's targets.
    ///
    /// `steering_angle` and `eye_angle` are the actuators' current angles; they are echoed back
    /// when the pad asks to hold a position.
    pub fn respond(&self, buttons: Buttons, steering_angle: i32, eye_angle: i32) -> MotionIntent {
        if buttons.is_neutral() {
            return self.neutral();
        }

        let speed_factor = if buttons.contains(Buttons::B) {
            self.fast_speed
        } else {
            self.regular_speed
        };

        let manual_eye = buttons.contains(Buttons::A);
        let mut target_eye = if manual_eye {
            eye_angle
        } else {
            self.eye.home_angle
        };

        let mut scan = None;
        if buttons.contains(Buttons::SELECT) {
            scan = Some(ScanRequest::Disable);
        }
        if buttons.contains(Buttons::START) {
            scan = Some(ScanRequest::Enable);
        }

        let mut speed = 0.0;
        if buttons.contains(Buttons::UP) {
            speed = speed_factor;
        }
        if buttons.contains(Buttons::DOWN) {
            speed = -speed_factor;
        }

        let mut target_steering = self.steering.home_angle;
        if buttons.contains(Buttons::LEFT) {
            if manual_eye {
                target_steering = steering_angle;
                if target_eye < self.eye.max_angle {
                    target_eye = (eye_angle + self.eye_nudge).min(self.eye.max_angle);
                }
            } else {
                target_steering = self.steering.min_angle;
            }
        }
        if buttons.contains(Buttons::RIGHT) {
            if manual_eye {
                target_steering = steering_angle;
                if target_eye > self.eye.min_angle {
                    target_eye = (eye_angle - self.eye_nudge).max(self.eye.min_angle);
                }
            } else {
                target_steering = self.steering.max_angle;
            }
        }

        MotionIntent {
            speed,
            steering_angle: target_steering,
            eye_angle: target_eye,
            manual_eye,
            scan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> IntentMapper {
        IntentMapper::new(&RoverConfig::default())
    }

    fn raw(bits: u8) -> Buttons {
        Buttons::from_bits_retain(bits)
    }

    #[test]
    fn neutral_masks_go_home_regardless_of_state() {
        let m = mapper();
        for bits in [0x00, 0xFF] {
            for (steer, eye) in [(0, 25), (180, 155), (45, 100)] {
                let intent = m.respond(raw(bits), steer, eye);
                assert_eq!(intent, m.neutral());
                assert_eq!(intent.speed, 0.0);
                assert_eq!(intent.steering_angle, 90);
                assert_eq!(intent.eye_angle, 90);
            }
        }
    }

    #[test]
    fn up_drives_at_regular_speed() {
        let intent = mapper().respond(Buttons::UP, 90, 90);
        assert_eq!(intent.speed, 0.5);
        assert_eq!(intent.steering_angle, 90);
        assert_eq!(intent.eye_angle, 90);
    }

    #[test]
    fn b_selects_fast_speed() {
        let intent = mapper().respond(Buttons::B | Buttons::UP, 90, 90);
        assert_eq!(intent.speed, 1.0);
        let intent = mapper().respond(Buttons::B | Buttons::DOWN, 90, 90);
        assert_eq!(intent.speed, -1.0);
    }

    #[test]
    fn down_wins_over_up() {
        let m = mapper();
        let both = m.respond(Buttons::UP | Buttons::DOWN, 90, 90);
        let down = m.respond(Buttons::DOWN, 90, 90);
        assert_eq!(both, down);
        assert_eq!(both.speed, -0.5);
    }

    #[test]
    fn left_and_right_steer_to_the_stops() {
        let m = mapper();
        assert_eq!(m.respond(Buttons::LEFT, 90, 90).steering_angle, 0);
        assert_eq!(m.respond(Buttons::RIGHT, 90, 90).steering_angle, 180);
    }

    #[test]
    fn right_wins_over_left() {
        let m = mapper();
        let both = m.respond(Buttons::LEFT | Buttons::RIGHT, 90, 90);
        assert_eq!(both, m.respond(Buttons::RIGHT, 90, 90));
    }

    #[test]
    fn manual_eye_holds_without_direction() {
        let intent = mapper().respond(Buttons::A, 180, 120);
        assert!(intent.manual_eye);
        assert_eq!(intent.eye_angle, 120);
        assert_eq!(intent.steering_angle, 90);
        assert_eq!(intent.speed, 0.0);
    }

    #[test]
    fn manual_left_nudges_eye_up_and_holds_steering() {
        let intent = mapper().respond(Buttons::A | Buttons::LEFT, 45, 100);
        assert_eq!(intent.eye_angle, 103);
        assert_eq!(intent.steering_angle, 45);
    }

    #[test]
    fn manual_right_nudges_eye_down_and_holds_steering() {
        let intent = mapper().respond(Buttons::A | Buttons::RIGHT, 135, 100);
        assert_eq!(intent.eye_angle, 97);
        assert_eq!(intent.steering_angle, 135);
    }

    #[test]
    fn manual_nudge_is_clamped_at_max() {
        let intent = mapper().respond(Buttons::A | Buttons::LEFT, 90, 155);
        assert_eq!(intent.eye_angle, 155);
        assert_eq!(intent.steering_angle, 90);

        let intent = mapper().respond(Buttons::A | Buttons::LEFT, 90, 154);
        assert_eq!(intent.eye_angle, 155);
    }

    #[test]
    fn manual_nudge_is_clamped_at_min() {
        let intent = mapper().respond(Buttons::A | Buttons::RIGHT, 0, 25);
        assert_eq!(intent.eye_angle, 25);
        assert_eq!(intent.steering_angle, 0);

        let intent = mapper().respond(Buttons::A | Buttons::RIGHT, 0, 26);
        assert_eq!(intent.eye_angle, 25);
    }

    #[test]
    fn manual_left_and_right_resolve_to_right_nudge() {
        let intent = mapper().respond(Buttons::A | Buttons::LEFT | Buttons::RIGHT, 90, 100);
        assert_eq!(intent.eye_angle, 97);
        assert_eq!(intent.steering_angle, 90);
    }

    #[test]
    fn manual_eye_does_not_affect_drive() {
        let intent = mapper().respond(Buttons::A | Buttons::B | Buttons::UP, 90, 90);
        assert_eq!(intent.speed, 1.0);
    }

    #[test]
    fn select_and_start_request_scan_changes() {
        let m = mapper();
        assert_eq!(m.respond(Buttons::SELECT, 90, 90).scan, Some(ScanRequest::Disable));
        assert_eq!(m.respond(Buttons::START, 90, 90).scan, Some(ScanRequest::Enable));
        assert_eq!(
            m.respond(Buttons::SELECT | Buttons::START, 90, 90).scan,
            Some(ScanRequest::Enable)
        );
        assert_eq!(m.respond(Buttons::UP, 90, 90).scan, None);
    }

    #[test]
    fn scan_buttons_leave_motion_neutral() {
        let intent = mapper().respond(Buttons::START, 0, 30);
        assert_eq!(intent.speed, 0.0);
        assert_eq!(intent.steering_angle, 90);
        assert_eq!(intent.eye_angle, 90);
    }
}
