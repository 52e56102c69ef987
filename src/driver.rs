use core::convert::Infallible;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use smart_leds::SmartLedsWrite;

use crate::clock::{Clock, SystemClock};
use crate::color::Rgb;
use crate::emitter::Emitter;
use crate::line::PulseLine;
use crate::order::ColorOrder;
use crate::pixels::PixelBuffer;
use crate::timing::PhaseCycles;

/// Configuration for a strip driver
#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    /// Number of pixels on the strip
    pub pixel_count: u16,
    /// Channel order the chips expect
    pub order: ColorOrder,
    /// Bit timing for the chips and the core clock
    pub phases: PhaseCycles,
}

/// Error returned when a replacement line cannot be driven LOW.
///
/// Carries the rejected line back to the caller.
#[derive(Debug)]
pub struct SetLineError<L, E> {
    pub line: L,
    pub error: E,
}

/// Strip driver - owns the pixel buffer and the output line
pub struct NeoPixel<L: PulseLine, C: Clock = SystemClock> {
    pixels: PixelBuffer,
    emitter: Emitter<L, C>,
}

impl<L: PulseLine> NeoPixel<L> {
    /// Create a driver timed by the platform clock
    ///
    /// The line is not touched until [`NeoPixel::begin`].
    pub fn new(config: &DriverConfig, line: L) -> Self {
        Self::with_clock(config, line, SystemClock)
    }
}

impl<L: PulseLine, C: Clock> NeoPixel<L, C> {
    /// Create a driver with a custom time source
    pub fn with_clock(config: &DriverConfig, line: L, clock: C) -> Self {
        Self {
            pixels: PixelBuffer::new(config.pixel_count, config.order),
            emitter: Emitter::with_clock(line, clock, config.phases),
        }
    }

    /// Drive the line LOW so the first frame starts from idle
    pub fn begin(&mut self) -> Result<(), L::Error> {
        self.emitter.line_mut().set_low()
    }

    /// Send the buffer to the strip
    ///
    /// Blocks for the remaining latch time of the previous frame and then for
    /// the whole frame. Does nothing if the buffer could not be allocated.
    pub fn show(&mut self) {
        self.emitter.transmit(self.pixels.as_bytes());
    }

    /// Move output to another line
    ///
    /// The new line is driven LOW first; the previous line is returned so the
    /// caller can reconfigure it.
    pub fn set_line(&mut self, mut line: L) -> Result<L, SetLineError<L, L::Error>> {
        if let Err(error) = line.set_low() {
            #[cfg(feature = "esp32-log")]
            println!("[NeoPixel.set_line] failed to drive new line low");
            return Err(SetLineError { line, error });
        }
        Ok(self.emitter.replace_line(line))
    }

    /// Change bit timing, e.g. after switching the core clock
    pub fn set_phases(&mut self, phases: PhaseCycles) {
        self.emitter.set_phases(phases);
    }

    pub const fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }

    pub const fn emitter(&self) -> &Emitter<L, C> {
        &self.emitter
    }

    /// Number of pixels (0 if the buffer could not be allocated)
    pub const fn len(&self) -> u16 {
        self.pixels.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn set_pixel(&mut self, index: u16, r: u8, g: u8, b: u8) {
        self.pixels.set_pixel(index, r, g, b);
    }

    pub fn set_pixel_color(&mut self, index: u16, color: u32) {
        self.pixels.set_pixel_color(index, color);
    }

    pub fn pixel(&self, index: u16) -> u32 {
        self.pixels.pixel(index)
    }

    pub fn set_brightness(&mut self, level: u8) {
        self.pixels.set_brightness(level);
    }

    pub const fn brightness(&self) -> u8 {
        self.pixels.brightness()
    }

    /// Give back the output line
    pub fn release(self) -> L {
        self.emitter.release()
    }
}

impl<L: PulseLine, C: Clock> SmartLedsWrite for NeoPixel<L, C> {
    type Error = Infallible;
    type Color = Rgb;

    /// Fill the buffer from the first pixel on and show it
    ///
    /// Colors past the end of the strip are ignored.
    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        for (index, color) in (0..self.pixels.len()).zip(iterator) {
            self.pixels.set_pixel_rgb(index, color.into());
        }
        self.show();
        Ok(())
    }
}
