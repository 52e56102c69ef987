//! Pixel color storage in device-native byte order.
//!
//! Colors are scaled by the current brightness when they are written, so the
//! stored bytes can be sent to the strip as they are. Changing the brightness
//! afterwards rescales the stored bytes in place. That pass is lossy: a large
//! step up from a low brightness shows visible banding. Re-render the frame
//! when exact colors matter.

use alloc::vec::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{Rgb, pack, unpack};
use crate::math8::{rescale_factor, scale8, scale16};
use crate::order::{ChannelOffsets, ColorOrder};

/// Number of bytes stored per pixel
pub const BYTES_PER_PIXEL: usize = 3;

/// Per-pixel color buffer
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    bytes: Vec<u8>,
    pixel_count: u16,
    order: ColorOrder,
    offsets: ChannelOffsets,
    /// Brightness biased by +1: 0 means no scaling, 1 means off
    brightness: u8,
}

impl PixelBuffer {
    /// Allocate a zeroed buffer for `pixel_count` pixels
    ///
    /// If the memory cannot be obtained the buffer stays empty and every
    /// operation on it does nothing.
    pub fn new(pixel_count: u16, order: ColorOrder) -> Self {
        let len = usize::from(pixel_count) * BYTES_PER_PIXEL;
        let mut bytes = Vec::new();
        let pixel_count = if bytes.try_reserve_exact(len).is_ok() {
            bytes.resize(len, 0);
            pixel_count
        } else {
            #[cfg(feature = "esp32-log")]
            println!(
                "[PixelBuffer.new] failed to allocate {} bytes for {} pixels",
                len, pixel_count
            );
            0
        };

        Self {
            bytes,
            pixel_count,
            order,
            offsets: order.offsets(),
            brightness: 0,
        }
    }

    /// Number of addressable pixels (0 if allocation failed)
    pub const fn len(&self) -> u16 {
        self.pixel_count
    }

    pub const fn is_empty(&self) -> bool {
        self.pixel_count == 0
    }

    pub const fn order(&self) -> ColorOrder {
        self.order
    }

    /// Raw bytes in device-native order
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw bytes in device-native order
    ///
    /// Writes through this slice bypass brightness scaling.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Set pixel color from separate channels
    pub fn set_pixel(&mut self, index: u16, r: u8, g: u8, b: u8) {
        if index >= self.pixel_count {
            return;
        }
        let (r, g, b) = if self.brightness == 0 {
            (r, g, b)
        } else {
            (
                scale8(r, self.brightness),
                scale8(g, self.brightness),
                scale8(b, self.brightness),
            )
        };

        let start = usize::from(index) * BYTES_PER_PIXEL;
        let pixel = &mut self.bytes[start..start + BYTES_PER_PIXEL];
        pixel[self.offsets.r] = r;
        pixel[self.offsets.g] = g;
        pixel[self.offsets.b] = b;
    }

    /// Set pixel color from a packed `0xRRGGBB` value
    pub fn set_pixel_color(&mut self, index: u16, color: u32) {
        let (r, g, b) = unpack(color);
        self.set_pixel(index, r, g, b);
    }

    pub fn set_pixel_rgb(&mut self, index: u16, color: Rgb) {
        self.set_pixel(index, color.r, color.g, color.b);
    }

    /// Packed `0xRRGGBB` color of a pixel, or 0 when out of range
    ///
    /// The value reflects the stored (already scaled) bytes.
    pub fn pixel(&self, index: u16) -> u32 {
        let Some(pixel) = self.triplet(index) else {
            return 0;
        };
        pack(
            pixel[self.offsets.r],
            pixel[self.offsets.g],
            pixel[self.offsets.b],
        )
    }

    pub fn pixel_rgb(&self, index: u16) -> Rgb {
        let Some(pixel) = self.triplet(index) else {
            return Rgb::default();
        };
        Rgb {
            r: pixel[self.offsets.r],
            g: pixel[self.offsets.g],
            b: pixel[self.offsets.b],
        }
    }

    /// Current brightness level (0 = off, 255 = full)
    pub const fn brightness(&self) -> u8 {
        self.brightness.wrapping_sub(1)
    }

    /// Set brightness for all future writes and rescale stored colors
    ///
    /// Does nothing if the level is unchanged.
    pub fn set_brightness(&mut self, level: u8) {
        let new_raw = level.wrapping_add(1);
        if new_raw == self.brightness {
            return;
        }

        let scale = rescale_factor(self.brightness, new_raw, level);
        for byte in &mut self.bytes {
            *byte = scale16(*byte, scale);
        }
        self.brightness = new_raw;
    }

    /// Set every pixel to black
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    fn triplet(&self, index: u16) -> Option<&[u8]> {
        if index >= self.pixel_count {
            return None;
        }
        let start = usize::from(index) * BYTES_PER_PIXEL;
        self.bytes.get(start..start + BYTES_PER_PIXEL)
    }
}
