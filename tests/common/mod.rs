#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;

use myrtio_neopixel::{Clock, Instant, PulseLine};

/// Line that records every pulse instead of driving a pin
#[derive(Debug, Default)]
pub struct CaptureLine {
    pub pulses: Vec<(u32, u32)>,
    pub high: bool,
    pub level_changes: usize,
}

impl CaptureLine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PulseLine for CaptureLine {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.level_changes += 1;
        Ok(())
    }

    fn pulse(&mut self, high: u32, low: u32) {
        self.high = true;
        self.pulses.push((high, low));
        self.high = false;
    }
}

/// Clock that advances by a fixed step on every read
#[derive(Debug)]
pub struct SteppingClock {
    now_us: Cell<u64>,
    step_us: u64,
    reads: Cell<u32>,
}

impl SteppingClock {
    pub fn new(start_us: u64, step_us: u64) -> Self {
        Self {
            now_us: Cell::new(start_us),
            step_us,
            reads: Cell::new(0),
        }
    }

    pub fn reads(&self) -> u32 {
        self.reads.get()
    }

    pub fn current(&self) -> Instant {
        Instant::from_micros(self.now_us.get())
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Instant {
        let now = self.now_us.get();
        self.now_us.set(now + self.step_us);
        self.reads.set(self.reads.get() + 1);
        Instant::from_micros(now)
    }
}

/// Expected `(high, low)` pairs for `bytes`, MSB first
pub fn expected_pulses(bytes: &[u8], one: (u32, u32), zero: (u32, u32)) -> Vec<(u32, u32)> {
    let mut pulses = Vec::new();
    for &byte in bytes {
        for bit in (0..8).rev() {
            pulses.push(if byte & (1 << bit) != 0 { one } else { zero });
        }
    }
    pulses
}
