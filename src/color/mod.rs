mod hsv;

use libm::roundf;
use smart_leds::RGB8;

pub use hsv::{hsv_to_rgb, rgb_to_hsv};

use crate::math::lerp;

pub type Rgb = RGB8;

/// Create an RGB color, clamping out-of-range channels instead of failing.
pub const fn clamped_rgb(r: i32, g: i32, b: i32) -> Rgb {
    Rgb {
        r: clamp_channel(r),
        g: clamp_channel(g),
        b: clamp_channel(b),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Interpolate two colors channel-wise.
///
/// `t` is expected in `[0, 1]`; channels are rounded to the nearest integer.
pub fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    Rgb {
        r: round_channel(lerp(f32::from(a.r), f32::from(b.r), t)),
        g: round_channel(lerp(f32::from(a.g), f32::from(b.g), t)),
        b: round_channel(lerp(f32::from(a.b), f32::from(b.b), t)),
    }
}

/// Scale all channels by a factor, clamping to the valid range.
pub fn scale_rgb(color: Rgb, factor: f32) -> Rgb {
    Rgb {
        r: round_channel(f32::from(color.r) * factor),
        g: round_channel(f32::from(color.g) * factor),
        b: round_channel(f32::from(color.b) * factor),
    }
}

const fn clamp_channel(value: i32) -> u8 {
    if value < 0 {
        0
    } else if value > 255 {
        255
    } else {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        {
            value as u8
        }
    }
}

/// Round a float channel to the nearest integer and clamp to `[0, 255]`.
pub(crate) fn round_channel(value: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation)]
    clamp_channel(roundf(value) as i32)
}
