// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! STM32F7 implementations of the capability traits.
//!
//! - [`Out`] / [`In`]: GPIO lines as `embedded-hal` 1.0 digital pins
//! - [`PwmChannel`]: TIM3/TIM4 output-compare channels in PWM mode 1, 1 MHz tick
//! - [`EchoCapture`]: HC-SR04 echo width measured against free-running TIM2
//! - [`SysDelay`]: SysTick busy-wait delay

use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use fugit::{HertzU32, MicrosDurationU32};
use stm32f7xx_hal::gpio::{Floating, Input, Output, Pin, PushPull};
use stm32f7xx_hal::pac;

use crate::hw::EchoTimer;

/// Timer tick used by every timer configured here.
const TICK_HZ: u32 = 1_000_000;

/// Longest echo the HC-SR04 produces before giving up.
const ECHO_TIMEOUT_US: u32 = 38_000;

// CR1
const CR1_CEN: u32 = 1 << 0;
const CR1_ARPE: u32 = 1 << 7;
// CCMR1 output: OCxM = PWM mode 1, OCxPE set
const CCMR1_CH1_PWM: u32 = 0b110 << 4 | 1 << 3;
const CCMR1_CH2_PWM: u32 = 0b110 << 12 | 1 << 11;
const CCMR1_CH1_MASK: u32 = 0xFF;
const CCMR1_CH2_MASK: u32 = 0xFF00;
// CCER
const CCER_CC1E: u32 = 1 << 0;
const CCER_CC2E: u32 = 1 << 4;

/// Push-pull output line.
pub struct Out<const P: char, const N: u8>(Pin<P, N, Output<PushPull>>);

impl<const P: char, const N: u8> Out<P, N> {
    pub fn new(pin: Pin<P, N, Output<PushPull>>) -> Self {
        Self(pin)
    }
}

impl<const P: char, const N: u8> digital::ErrorType for Out<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for Out<P, N> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high();
        Ok(())
    }
}

/// Input line with any pull configuration.
pub struct In<const P: char, const N: u8, PULL>(Pin<P, N, Input<PULL>>);

impl<const P: char, const N: u8, PULL> In<P, N, PULL> {
    pub fn new(pin: Pin<P, N, Input<PULL>>) -> Self {
        Self(pin)
    }
}

impl<const P: char, const N: u8, PULL> digital::ErrorType for In<P, N, PULL> {
    type Error = Infallible;
}

impl<const P: char, const N: u8, PULL> InputPin for In<P, N, PULL> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.is_low())
    }
}

/// General-purpose 16-bit timer usable for PWM.
pub trait PwmTimer {
    fn regs() -> &'static pac::tim3::RegisterBlock;
    fn enable_clock();
}

impl PwmTimer for pac::TIM3 {
    fn regs() -> &'static pac::tim3::RegisterBlock {
        unsafe { &*pac::TIM3::ptr() }
    }

    fn enable_clock() {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());
    }
}

impl PwmTimer for pac::TIM4 {
    fn regs() -> &'static pac::tim3::RegisterBlock {
        unsafe { &*pac::TIM4::ptr() }
    }

    fn enable_clock() {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());
    }
}

/// One PWM channel (`C` = 1 or 2) of timer `TIM`.
pub struct PwmChannel<TIM, const C: u8> {
    _tim: PhantomData<TIM>,
}

/// Configure `TIM` for PWM at `freq` on channels 1 and 2, both starting at 0 % duty.
///
/// `timclk` is the timer kernel clock; it must be a whole multiple of 1 MHz.
pub fn pwm_channels<TIM: PwmTimer>(
    _tim: TIM,
    timclk: HertzU32,
    freq: HertzU32,
) -> (PwmChannel<TIM, 1>, PwmChannel<TIM, 2>) {
    TIM::enable_clock();
    let tim = TIM::regs();

    // Disable counter while configuring
    tim.cr1.modify(|r, w| unsafe { w.bits(r.bits() & !CR1_CEN) });

    let psc = timclk.raw() / TICK_HZ - 1;
    let arr = TICK_HZ / freq.raw() - 1;
    tim.psc.write(|w| unsafe { w.bits(psc) });
    tim.arr.write(|w| unsafe { w.bits(arr) });
    tim.ccr1.write(|w| unsafe { w.bits(0) });
    tim.ccr2.write(|w| unsafe { w.bits(0) });

    tim.ccmr1_output().modify(|r, w| unsafe {
        w.bits(r.bits() & !(CCMR1_CH1_MASK | CCMR1_CH2_MASK) | CCMR1_CH1_PWM | CCMR1_CH2_PWM)
    });
    tim.ccer
        .modify(|r, w| unsafe { w.bits(r.bits() | CCER_CC1E | CCER_CC2E) });

    // Latch PSC/ARR, then run
    tim.egr.write(|w| w.ug().set_bit());
    tim.cr1
        .modify(|r, w| unsafe { w.bits(r.bits() | CR1_ARPE | CR1_CEN) });

    (
        PwmChannel { _tim: PhantomData },
        PwmChannel { _tim: PhantomData },
    )
}

impl<TIM, const C: u8> pwm::ErrorType for PwmChannel<TIM, C> {
    type Error = Infallible;
}

impl<TIM: PwmTimer, const C: u8> SetDutyCycle for PwmChannel<TIM, C> {
    fn max_duty_cycle(&self) -> u16 {
        (TIM::regs().arr.read().bits() + 1) as u16
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let tim = TIM::regs();
        match C {
            1 => tim.ccr1.write(|w| unsafe { w.bits(duty as u32) }),
            _ => tim.ccr2.write(|w| unsafe { w.bits(duty as u32) }),
        }
        Ok(())
    }
}

/// Echo-width measurement by polling the echo line against TIM2.
pub struct EchoCapture<const P: char, const N: u8> {
    pin: Pin<P, N, Input<Floating>>,
    tim: pac::TIM2,
}

impl<const P: char, const N: u8> EchoCapture<P, N> {
    /// Start TIM2 as a free-running 32-bit counter at 1 MHz.
    pub fn new(pin: Pin<P, N, Input<Floating>>, tim2: pac::TIM2, timclk: HertzU32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

        let tim = tim2;
        tim.cr1.modify(|_, w| w.cen().clear_bit());
        tim.psc.write(|w| unsafe { w.bits(timclk.raw() / TICK_HZ - 1) });
        tim.arr.write(|w| w.bits(0xFFFF_FFFF));
        tim.egr.write(|w| w.ug().set_bit());
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { pin, tim }
    }

    #[inline]
    fn now(&self) -> u32 {
        self.tim.cnt.read().bits()
    }

    pub fn free(self) -> (Pin<P, N, Input<Floating>>, pac::TIM2) {
        (self.pin, self.tim)
    }
}

impl<const P: char, const N: u8> EchoTimer for EchoCapture<P, N> {
    type Error = Infallible;

    /// Zero width if the echo never starts or never ends.
    fn pulse_width(&mut self) -> Result<MicrosDurationU32, Self::Error> {
        let wait_start = self.now();
        while self.pin.is_low() {
            if self.now().wrapping_sub(wait_start) > ECHO_TIMEOUT_US {
                return Ok(MicrosDurationU32::micros(0));
            }
        }

        let rise = self.now();
        while self.pin.is_high() {
            if self.now().wrapping_sub(rise) > ECHO_TIMEOUT_US {
                return Ok(MicrosDurationU32::micros(0));
            }
        }

        Ok(MicrosDurationU32::micros(self.now().wrapping_sub(rise)))
    }
}

/// SysTick delay shared by every blocking call.
pub struct SysDelay(cortex_m::delay::Delay);

impl SysDelay {
    pub fn new(syst: cortex_m::peripheral::SYST, sysclk: HertzU32) -> Self {
        Self(cortex_m::delay::Delay::new(syst, sysclk.raw()))
    }
}

impl DelayNs for SysDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}
