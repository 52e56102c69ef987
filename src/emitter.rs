//! Frame emission over a single wire.
//!
//! A frame is the whole pixel buffer, sent most-significant bit first with
//! one pulse per bit. The emitter:
//! - waits until the previous frame has latched (at least [`LATCH`] of idle
//!   line since it finished),
//! - masks preemption for the whole bit loop,
//! - records when the frame finished so the next call knows how long to wait.
//!
//! Nothing here can report a timing failure. The protocol has no
//! acknowledgement, so a disturbed frame simply shows the wrong colors until
//! the next one.

use embassy_time::Instant;

use crate::clock::{Clock, SystemClock};
use crate::line::PulseLine;
use crate::timing::{LATCH, PhaseCycles};

/// Drives one line with frames of color bytes
pub struct Emitter<L: PulseLine, C: Clock = SystemClock> {
    line: L,
    clock: C,
    phases: PhaseCycles,
    last_completion: Option<Instant>,
}

impl<L: PulseLine> Emitter<L> {
    /// Create an emitter timed by the platform clock
    pub fn new(line: L, phases: PhaseCycles) -> Self {
        Self::with_clock(line, SystemClock, phases)
    }
}

impl<L: PulseLine, C: Clock> Emitter<L, C> {
    /// Create an emitter with a custom time source
    pub fn with_clock(line: L, clock: C, phases: PhaseCycles) -> Self {
        Self {
            line,
            clock,
            phases,
            last_completion: None,
        }
    }

    /// Send one frame
    ///
    /// Blocks until the previous frame has latched, then emits every byte
    /// with preemption masked. Runs to completion; there is no way to cancel
    /// a frame once the first bit is out. An empty frame does nothing.
    pub fn transmit(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }

        self.wait_for_latch();

        critical_section::with(|_cs| emit_frame(&mut self.line, &self.phases, bytes));

        self.last_completion = Some(self.clock.now());
    }

    /// Spin until the line has been idle for at least [`LATCH`]
    fn wait_for_latch(&self) {
        let Some(last) = self.last_completion else {
            return;
        };
        while self.clock.now().saturating_duration_since(last) < LATCH {
            core::hint::spin_loop();
        }
    }

    /// Time the previous frame finished, if any was sent
    pub const fn last_completion(&self) -> Option<Instant> {
        self.last_completion
    }

    pub const fn phases(&self) -> PhaseCycles {
        self.phases
    }

    pub fn set_phases(&mut self, phases: PhaseCycles) {
        self.phases = phases;
    }

    pub const fn line(&self) -> &L {
        &self.line
    }

    pub fn line_mut(&mut self) -> &mut L {
        &mut self.line
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Swap the output line, returning the previous one
    pub fn replace_line(&mut self, line: L) -> L {
        core::mem::replace(&mut self.line, line)
    }

    /// Give back the output line
    pub fn release(self) -> L {
        self.line
    }
}

/// Emit every bit of `bytes`, MSB first
///
/// Leaves the line LOW after the last bit.
#[inline(always)]
fn emit_frame<L: PulseLine>(line: &mut L, phases: &PhaseCycles, bytes: &[u8]) {
    for &byte in bytes {
        let mut data = byte;
        for _ in 0..8 {
            let (high, low) = phases.for_bit(data & 0x80 != 0);
            line.pulse(high, low);
            data <<= 1;
        }
    }
}
