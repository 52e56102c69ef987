mod utils;

use smart_leds::RGB8;

pub use utils::{pack, rgb_from_u32, rgb_to_u32, unpack};

pub type Rgb = RGB8;
