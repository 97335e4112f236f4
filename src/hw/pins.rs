// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 truck controller.

use stm32f7xx_hal::{
    gpio::{
        gpioa, gpioc, gpiod, gpioe, Alternate, Floating, Input, Output, PullDown, PullUp, PushPull,
    },
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```rust
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub gamepad: GamepadPins,
    pub drive: DrivePins,
    pub steering: SteeringPins,
    pub eye: EyePins,
}

/// NES gamepad shift register
pub struct GamepadPins {
    pub latch: gpioe::PE4<Output<PushPull>>,
    pub clock: gpioe::PE11<Output<PushPull>>,
    pub data: gpioe::PE13<Input<PullUp>>, // low = pressed
}

/// Rear motor, L293 channels 1/2
pub struct DrivePins {
    pub in1: gpioa::PA4<Output<PushPull>>,
    pub in2: gpioa::PA3<Output<PushPull>>,
    pub enable: gpiod::PD12<Alternate<2>>, // TIM4_CH1 (PWM)
}

/// Steering servo motor (L293 channels 3/4) and its wiper feedback
pub struct SteeringPins {
    pub in3: gpiod::PD2<Output<PushPull>>,
    pub in4: gpiod::PD1<Output<PushPull>>,
    pub enable: gpiod::PD13<Alternate<2>>, // TIM4_CH2 (PWM)

    pub select1: gpioc::PC4<Output<PushPull>>, // white
    pub select2: gpioc::PC5<Output<PushPull>>, // purple
    pub sense_a: gpioc::PC2<Input<PullDown>>, // blue
    pub sense_b: gpioc::PC3<Input<PullDown>>, // green
}

/// Ultrasonic eye: HC-SR04 and its hobby servo
pub struct EyePins {
    pub trigger: gpioe::PE12<Output<PushPull>>,
    pub echo: gpioe::PE14<Input<Floating>>,
    pub servo: gpioa::PA6<Alternate<2>>, // TIM3_CH1 (PWM)
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD, gpioe: pac::GPIOE) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            gamepad: GamepadPins {
                latch: gpioe.pe4.into_push_pull_output(),
                clock: gpioe.pe11.into_push_pull_output(),
                data: gpioe.pe13.into_pull_up_input(),
            },

            drive: DrivePins {
                in1: gpioa.pa4.into_push_pull_output(),
                in2: gpioa.pa3.into_push_pull_output(),
                enable: gpiod.pd12.into_alternate::<2>(),
            },

            steering: SteeringPins {
                in3: gpiod.pd2.into_push_pull_output(),
                in4: gpiod.pd1.into_push_pull_output(),
                enable: gpiod.pd13.into_alternate::<2>(),
                select1: gpioc.pc4.into_push_pull_output(),
                select2: gpioc.pc5.into_push_pull_output(),
                sense_a: gpioc.pc2.into_pull_down_input(),
                sense_b: gpioc.pc3.into_pull_down_input(),
            },

            eye: EyePins {
                trigger: gpioe.pe12.into_push_pull_output(),
                echo: gpioe.pe14.into_floating_input(),
                servo: gpioa.pa6.into_alternate::<2>(),
            },
        }
    }
}
