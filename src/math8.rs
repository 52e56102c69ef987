/// Scale an 8-bit value by a factor, keeping the high byte of the product
///
/// A `scale` of 0 yields 0. No factor maps every value back onto itself.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * scale as u16) >> 8) as u8
}

/// Scale an 8-bit value by a 16-bit factor (8.8 fixed point)
///
/// The result is truncated to 8 bits.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale16(value: u8, scale: u16) -> u8 {
    ((value as u32 * scale as u32) >> 8) as u8
}

/// Factor that maps bytes stored at one brightness onto another
///
/// `old_raw` and `new_raw` are biased brightness values (level + 1, wrapping),
/// `level` is the unbiased target level. The result is meant for [`scale16`].
#[allow(clippy::cast_lossless)]
pub const fn rescale_factor(old_raw: u8, new_raw: u8, level: u8) -> u16 {
    let old = old_raw.wrapping_sub(1);
    if old == 0 {
        return 0;
    }
    if level == u8::MAX {
        return u16::MAX / old as u16;
    }
    (((new_raw as u16) << 8) - 1) / old as u16
}
