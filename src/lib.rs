#![no_std]

extern crate alloc;

pub mod clock;
pub mod color;
pub mod driver;
pub mod emitter;
pub mod line;
pub mod math8;
pub mod order;
pub mod pixels;
pub mod timing;

pub use clock::{Clock, SystemClock};
pub use driver::{DriverConfig, NeoPixel, SetLineError};
pub use emitter::Emitter;
pub use line::{BitBangLine, CycleDelay, PulseLine};
pub use order::ColorOrder;
pub use pixels::PixelBuffer;
pub use timing::{LATCH, PhaseCycles, PulseTiming, TOLERANCE_NS};

pub use color::{Rgb, pack, unpack};
pub use embassy_time::{Duration, Instant};
