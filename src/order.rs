//! Channel byte order of a strip.
//!
//! Different chip variants expect the three color bytes of each pixel in a
//! different order on the wire. The order only affects storage; packed colors
//! are always red/green/blue.

/// Byte offsets of the red, green and blue channels inside one pixel triplet.
///
/// Offsets are always a permutation of `{0, 1, 2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOffsets {
    pub r: usize,
    pub g: usize,
    pub b: usize,
}

/// Known channel orders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorOrder {
    #[default]
    Rgb,
    Grb,
    Brg,
}

impl ColorOrder {
    /// Offsets of each channel within a pixel triplet
    pub const fn offsets(self) -> ChannelOffsets {
        match self {
            Self::Rgb => ChannelOffsets { r: 0, g: 1, b: 2 },
            Self::Grb => ChannelOffsets { r: 1, g: 0, b: 2 },
            Self::Brg => ChannelOffsets { r: 1, g: 2, b: 0 },
        }
    }
}
