use embassy_time::Instant;

/// Monotonic time source used for the latch wait
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Clock backed by the platform's `embassy-time` driver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}
