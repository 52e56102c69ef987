//! Pulse timing for the single-wire protocol.
//!
//! Every bit starts with the line HIGH and ends with it LOW. A 1-bit holds
//! HIGH for the long phase, a 0-bit for the short one, and both take the same
//! total period. Timings are given in nanoseconds per controller family and
//! converted to delay-loop cycles for the core clock the driver runs on.
//!
//! The converted values are a calibration, not a guarantee: an interrupt that
//! cannot be masked or a slow GPIO path still corrupts the stream, and the
//! only symptom is wrong colors on the strip. Check the output with a logic
//! analyzer when porting to a new target.

use embassy_time::Duration;

/// Allowed deviation of any single phase, in nanoseconds
pub const TOLERANCE_NS: u32 = 150;

/// Minimum LOW time between frames that makes the chain latch the data
pub const LATCH: Duration = Duration::from_micros(50);

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Phase durations of one bit period, in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    /// HIGH phase of a 1-bit
    pub one_high_ns: u32,
    /// LOW phase of a 1-bit
    pub one_low_ns: u32,
    /// HIGH phase of a 0-bit
    pub zero_high_ns: u32,
    /// LOW phase of a 0-bit
    pub zero_low_ns: u32,
}

impl PulseTiming {
    /// COM12999 smart pixels: 1.71 µs bit period
    pub const COM12999: Self = Self {
        one_high_ns: 1360,
        one_low_ns: 350,
        zero_high_ns: 350,
        zero_low_ns: 1360,
    };

    /// WS2812 at 800 kHz
    pub const WS2812: Self = Self {
        one_high_ns: 800,
        one_low_ns: 450,
        zero_high_ns: 400,
        zero_low_ns: 850,
    };

    /// WS2811 at 400 kHz
    pub const WS2811: Self = Self {
        one_high_ns: 1200,
        one_low_ns: 1300,
        zero_high_ns: 500,
        zero_low_ns: 2000,
    };

    /// Total duration of a 1-bit
    pub const fn period_ns(&self) -> u32 {
        self.one_high_ns + self.one_low_ns
    }

    /// Whether 0-bits and 1-bits take the same time
    pub const fn is_balanced(&self) -> bool {
        self.one_high_ns + self.one_low_ns == self.zero_high_ns + self.zero_low_ns
    }

    /// Convert to delay cycles for a core running at `core_hz`
    ///
    /// `overhead` is the number of cycles the line write and loop bookkeeping
    /// already spend in every phase; it is taken off each phase.
    pub const fn to_cycles(&self, core_hz: u32, overhead: u32) -> PhaseCycles {
        PhaseCycles {
            one_high: ns_to_cycles(self.one_high_ns, core_hz).saturating_sub(overhead),
            one_low: ns_to_cycles(self.one_low_ns, core_hz).saturating_sub(overhead),
            zero_high: ns_to_cycles(self.zero_high_ns, core_hz).saturating_sub(overhead),
            zero_low: ns_to_cycles(self.zero_low_ns, core_hz).saturating_sub(overhead),
        }
    }
}

/// Phase durations of one bit period, in delay cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseCycles {
    pub one_high: u32,
    pub one_low: u32,
    pub zero_high: u32,
    pub zero_low: u32,
}

impl PhaseCycles {
    /// `(high, low)` cycles for one bit
    #[inline(always)]
    pub const fn for_bit(&self, bit: bool) -> (u32, u32) {
        if bit {
            (self.one_high, self.one_low)
        } else {
            (self.zero_high, self.zero_low)
        }
    }

    /// Worst absolute error of any phase against `timing`, in nanoseconds
    pub const fn deviation_ns(&self, timing: &PulseTiming, core_hz: u32, overhead: u32) -> u32 {
        let errors = [
            phase_error(self.one_high, overhead, timing.one_high_ns, core_hz),
            phase_error(self.one_low, overhead, timing.one_low_ns, core_hz),
            phase_error(self.zero_high, overhead, timing.zero_high_ns, core_hz),
            phase_error(self.zero_low, overhead, timing.zero_low_ns, core_hz),
        ];
        let mut worst = 0;
        let mut i = 0;
        while i < errors.len() {
            if errors[i] > worst {
                worst = errors[i];
            }
            i += 1;
        }
        worst
    }

    /// Whether every phase lands within [`TOLERANCE_NS`] of `timing`
    pub const fn fits(&self, timing: &PulseTiming, core_hz: u32, overhead: u32) -> bool {
        self.deviation_ns(timing, core_hz, overhead) <= TOLERANCE_NS
    }
}

#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
const fn ns_to_cycles(ns: u32, core_hz: u32) -> u32 {
    ((ns as u64 * core_hz as u64 + NANOS_PER_SECOND / 2) / NANOS_PER_SECOND) as u32
}

#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
const fn cycles_to_ns(cycles: u32, core_hz: u32) -> u32 {
    if core_hz == 0 {
        return 0;
    }
    let ns = cycles as u64 * NANOS_PER_SECOND / core_hz as u64;
    if ns > u32::MAX as u64 {
        return u32::MAX;
    }
    ns as u32
}

const fn phase_error(cycles: u32, overhead: u32, target_ns: u32, core_hz: u32) -> u32 {
    cycles_to_ns(cycles.saturating_add(overhead), core_hz).abs_diff(target_ns)
}
