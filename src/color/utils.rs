use crate::color::Rgb;

/// Pack separate channels into a `0xRRGGBB` value.
///
/// The packed format is always red/green/blue, whatever order the strip
/// expects on the wire.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split a `0xRRGGBB` value into `(r, g, b)`. The top byte is ignored.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn unpack(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    let (r, g, b) = unpack(color);
    Rgb { r, g, b }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    pack(color.r, color.g, color.b)
}
