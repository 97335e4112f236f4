// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-side fakes for unit tests.
//!
//! Handles are cheap clones sharing one state, so a test can keep a copy after moving a pin into
//! a driver and inspect or script it later.

use core::convert::Infallible;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use fugit::MicrosDurationU32;

use crate::drivers::{ButtonSource, Buttons, PositionCode, PositionSense, Ranging, SpeedControl};
use crate::error::{Error, Result};
use crate::hw::EchoTimer;

/// Output pin recording every level written to it.
#[derive(Clone, Default)]
pub struct MockOutput {
    writes: Rc<RefCell<Vec<bool>>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last written level (low if never written).
    pub fn level(&self) -> bool {
        self.writes.borrow().last().copied().unwrap_or(false)
    }

    pub fn writes(&self) -> Vec<bool> {
        self.writes.borrow().clone()
    }

    /// Number of low-to-high transitions written.
    pub fn rising_edges(&self) -> usize {
        let writes = self.writes.borrow();
        let mut prev = false;
        let mut edges = 0;
        for &w in writes.iter() {
            if w && !prev {
                edges += 1;
            }
            prev = w;
        }
        edges
    }
}

impl ErrorType for MockOutput {
    type Error = Infallible;
}

impl OutputPin for MockOutput {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.writes.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.writes.borrow_mut().push(true);
        Ok(())
    }
}

/// Input pin returning scripted levels, then `idle` once the script runs out.
#[derive(Clone)]
pub struct MockInput {
    script: Rc<RefCell<VecDeque<bool>>>,
    idle: bool,
    reads: Rc<RefCell<usize>>,
}

impl MockInput {
    pub fn new(idle: bool) -> Self {
        Self {
            script: Rc::new(RefCell::new(VecDeque::new())),
            idle,
            reads: Rc::new(RefCell::new(0)),
        }
    }

    pub fn push(&self, levels: &[bool]) {
        self.script.borrow_mut().extend(levels.iter().copied());
    }

    pub fn reads(&self) -> usize {
        *self.reads.borrow()
    }
}

impl ErrorType for MockInput {
    type Error = Infallible;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        *self.reads.borrow_mut() += 1;
        Ok(self.script.borrow_mut().pop_front().unwrap_or(self.idle))
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// PWM channel recording every duty written to it.
#[derive(Clone)]
pub struct MockPwm {
    max: u16,
    duties: Rc<RefCell<Vec<u16>>>,
}

impl MockPwm {
    pub fn new(max: u16) -> Self {
        Self {
            max,
            duties: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn duty(&self) -> Option<u16> {
        self.duties.borrow().last().copied()
    }

    pub fn duties(&self) -> Vec<u16> {
        self.duties.borrow().clone()
    }
}

impl pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> core::result::Result<(), Self::Error> {
        self.duties.borrow_mut().push(duty);
        Ok(())
    }
}

/// Delay that returns immediately and records each request in microseconds.
#[derive(Default)]
pub struct MockDelay {
    pub waits_us: Vec<u32>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_us(&self) -> u64 {
        self.waits_us.iter().map(|&us| us as u64).sum()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_us.push(ns / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.waits_us.push(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_us.push(ms * 1_000);
    }
}

/// Echo timer replaying scripted pulse widths (zero once exhausted).
#[derive(Clone, Default)]
pub struct MockEcho {
    widths_us: Rc<RefCell<VecDeque<u32>>>,
}

impl MockEcho {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, width_us: u32) {
        self.widths_us.borrow_mut().push_back(width_us);
    }
}

impl EchoTimer for MockEcho {
    type Error = Infallible;

    fn pulse_width(&mut self) -> core::result::Result<MicrosDurationU32, Self::Error> {
        let us = self.widths_us.borrow_mut().pop_front().unwrap_or(0);
        Ok(MicrosDurationU32::micros(us))
    }
}

/// Motor recording every accepted speed.
#[derive(Clone, Default)]
pub struct MockMotor {
    speeds: Rc<RefCell<Vec<f32>>>,
}

impl MockMotor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speeds(&self) -> Vec<f32> {
        self.speeds.borrow().clone()
    }
}

impl SpeedControl for MockMotor {
    fn set_speed(&mut self, speed: f32) -> Result<()> {
        if !(-1.0..=1.0).contains(&speed) {
            return Err(Error::InvalidSpeed);
        }
        self.speeds.borrow_mut().push(speed);
        Ok(())
    }

    fn speed(&self) -> f32 {
        self.speeds.borrow().last().copied().unwrap_or(0.0)
    }
}

/// Position sensor replaying scripted codes, repeating the last one once exhausted.
#[derive(Clone)]
pub struct MockSensor {
    script: Rc<RefCell<VecDeque<PositionCode>>>,
    last: Rc<RefCell<PositionCode>>,
    samples: Rc<RefCell<usize>>,
}

impl MockSensor {
    pub fn new(initial: PositionCode) -> Self {
        Self {
            script: Rc::new(RefCell::new(VecDeque::new())),
            last: Rc::new(RefCell::new(initial)),
            samples: Rc::new(RefCell::new(0)),
        }
    }

    pub fn push(&self, code: PositionCode) {
        self.script.borrow_mut().push_back(code);
    }

    pub fn samples(&self) -> usize {
        *self.samples.borrow()
    }
}

impl PositionSense for MockSensor {
    fn sample(&mut self) -> Result<PositionCode> {
        *self.samples.borrow_mut() += 1;
        if let Some(code) = self.script.borrow_mut().pop_front() {
            *self.last.borrow_mut() = code;
        }
        Ok(*self.last.borrow())
    }
}

/// Rangefinder replaying scripted readings (`None` once exhausted).
#[derive(Clone, Default)]
pub struct MockRanging {
    readings: Rc<RefCell<VecDeque<Option<f32>>>>,
    taken: Rc<RefCell<usize>>,
}

impl MockRanging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, reading: Option<f32>) {
        self.readings.borrow_mut().push_back(reading);
    }

    pub fn taken(&self) -> usize {
        *self.taken.borrow()
    }
}

impl Ranging for MockRanging {
    fn distance<D: DelayNs>(&mut self, _delay: &mut D) -> Result<Option<f32>> {
        *self.taken.borrow_mut() += 1;
        Ok(self.readings.borrow_mut().pop_front().flatten())
    }
}

/// Gamepad replaying scripted snapshots (nothing pressed once exhausted).
#[derive(Clone, Default)]
pub struct MockPad {
    script: Rc<RefCell<VecDeque<Result<Buttons>>>>,
}

impl MockPad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, buttons: Buttons) {
        self.script.borrow_mut().push_back(Ok(buttons));
    }

    pub fn push_err(&self, err: Error) {
        self.script.borrow_mut().push_back(Err(err));
    }
}

impl ButtonSource for MockPad {
    fn read_buttons<D: DelayNs>(&mut self, _delay: &mut D) -> Result<Buttons> {
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(Buttons::empty()))
    }
}
