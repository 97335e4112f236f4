// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_halt as _;

use hal::{pac, prelude::*};
use stm32f7xx_hal as hal;

use autorc::drivers::{Hcsr04, NesGamepad, PositionSensor, L293};
use autorc::hw::board::{pwm_channels, EchoCapture, In, Out, SysDelay};
use autorc::hw::pins::BoardPins;
use autorc::{log_debug, log_error, log_info, log_warn, Rover, RoverConfig};

/// Drive and steering bridge PWM.
const MOTOR_PWM_HZ: u32 = 5_000;
/// Hobby servo frame rate.
const SERVO_PWM_HZ: u32 = 50;

#[entry]
fn main() -> ! {
    // Peripherals
    let (Some(dp), Some(cp)) = (pac::Peripherals::take(), cortex_m::Peripherals::take()) else {
        halt();
    };

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let mut delay = SysDelay::new(cp.SYST, clocks.sysclk());

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);

    // Timers: TIM4 CH1/CH2 for the L293 enables, TIM3 CH1 for the eye servo, TIM2 for echoes
    let _motor_pwm_pins = (pins.drive.enable, pins.steering.enable);
    let _servo_pwm_pin = pins.eye.servo;
    let (drive_en, steer_en) = pwm_channels(dp.TIM4, clocks.timclk1(), MOTOR_PWM_HZ.Hz());
    let (eye_pwm, _) = pwm_channels(dp.TIM3, clocks.timclk1(), SERVO_PWM_HZ.Hz());
    let echo = EchoCapture::new(pins.eye.echo, dp.TIM2, clocks.timclk1());

    let cfg = RoverConfig::default();

    let gamepad = NesGamepad::new(
        Out::new(pins.gamepad.latch),
        Out::new(pins.gamepad.clock),
        In::new(pins.gamepad.data),
        &cfg.gamepad,
    );
    let drive = L293::new(Out::new(pins.drive.in1), Out::new(pins.drive.in2), drive_en);
    let steer_motor = L293::new(
        Out::new(pins.steering.in3),
        Out::new(pins.steering.in4),
        steer_en,
    );
    let steer_sensor = PositionSensor::new(
        Out::new(pins.steering.select1),
        Out::new(pins.steering.select2),
        In::new(pins.steering.sense_a),
        In::new(pins.steering.sense_b),
    );
    let ranger = Hcsr04::new(Out::new(pins.eye.trigger), echo, &cfg.rangefinder);

    let mut rover = match Rover::new(
        &cfg,
        gamepad,
        drive,
        steer_motor,
        steer_sensor,
        eye_pwm,
        ranger,
    ) {
        Ok(rover) => rover,
        Err(e) => {
            log_error!("rover init failed: {}", e);
            halt();
        }
    };

    if let Err(e) = rover.go_home(&mut delay) {
        log_warn!("homing failed: {}", e);
    }
    log_info!("autorc ready");

    loop {
        let report = rover.cycle(&mut delay);
        if let Some(distance) = report.distance {
            log_debug!("obstacle at {} in", distance);
        }
    }
}

fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
