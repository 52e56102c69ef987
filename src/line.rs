//! Output line capability.
//!
//! The emitter only needs two things from the platform: driving the line
//! LOW during setup, and emitting one HIGH-then-LOW pulse with the given
//! phase lengths. Targets with a PWM, RMT or DMA-fed shifter can implement
//! [`PulseLine`] directly; everything else can use [`BitBangLine`].

use embedded_hal::digital::OutputPin;

/// Busy-wait primitive counted in core cycles
///
/// Implementations must not yield or sleep.
pub trait CycleDelay {
    fn delay_cycles(&mut self, cycles: u32);
}

/// Plain delay functions such as `cortex_m::asm::delay`
impl CycleDelay for fn(u32) {
    #[inline(always)]
    fn delay_cycles(&mut self, cycles: u32) {
        self(cycles);
    }
}

/// A single digital line that can emit timed pulses
pub trait PulseLine {
    type Error;

    /// Drive the line LOW. Only called outside the timing-critical loop.
    fn set_low(&mut self) -> Result<(), Self::Error>;

    /// Emit one bit period: HIGH for `high` cycles, then LOW for `low` cycles
    ///
    /// The line must be LOW when this returns. Called with preemption masked,
    /// so there is no way to report a failure.
    fn pulse(&mut self, high: u32, low: u32);
}

/// [`PulseLine`] built from a GPIO pin and a cycle-counted delay
pub struct BitBangLine<P: OutputPin, D: CycleDelay> {
    pin: P,
    delay: D,
}

impl<P: OutputPin, D: CycleDelay> BitBangLine<P, D> {
    pub const fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Give back the pin and the delay
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P: OutputPin, D: CycleDelay> PulseLine for BitBangLine<P, D> {
    type Error = P::Error;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    #[inline(always)]
    fn pulse(&mut self, high: u32, low: u32) {
        self.pin.set_high().ok();
        self.delay.delay_cycles(high);
        self.pin.set_low().ok();
        self.delay.delay_cycles(low);
    }
}
