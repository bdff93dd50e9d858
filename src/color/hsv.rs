//! Floating-point HSV conversions.
//!
//! Hue is in degrees (`[0, 360)`), saturation and value in `[0, 1]`.
//! The pair round-trips within one unit per RGB channel.

use libm::floorf;

use super::{Rgb, round_channel};
use crate::math::wrap01;

/// Convert HSV to RGB.
///
/// Hue wraps modulo 360; saturation and value are clamped to `[0, 1]`.
pub fn hsv_to_rgb(hue: f32, sat: f32, val: f32) -> Rgb {
    let sat = sat.clamp(0.0, 1.0);
    let val = val.clamp(0.0, 1.0);

    let h6 = wrap01(hue / 360.0) * 6.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let sector = (floorf(h6) as u32) % 6;
    let frac = h6 - floorf(h6);

    let c = sat * val;
    let x = if sector & 1 == 0 {
        c * frac
    } else {
        c * (1.0 - frac)
    };
    let m = val - c;

    let (r, g, b) = match sector {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb {
        r: round_channel((r + m) * 255.0),
        g: round_channel((g + m) * 255.0),
        b: round_channel((b + m) * 255.0),
    }
}

/// Convert RGB to HSV `(hue, sat, val)`.
pub fn rgb_to_hsv(color: Rgb) -> (f32, f32, f32) {
    let r = f32::from(color.r) / 255.0;
    let g = f32::from(color.g) / 255.0;
    let b = f32::from(color.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let val = max;
    let sat = if max > 0.0 { delta / max } else { 0.0 };

    let hue = if delta <= 0.0 {
        0.0
    } else if max == r {
        let h = 60.0 * ((g - b) / delta);
        if h < 0.0 { h + 360.0 } else { h }
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (hue, sat, val)
}
