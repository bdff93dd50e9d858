//! Seasonally-parameterized sunrise/sunset color profiles.
//!
//! Each season defines a palette of `(fraction, color)` keyframes sampled
//! from seasonal color-temperature curves (deep red/orange predawn up to a
//! warm near-white daylight), a peak brightness, and a cloud-noise
//! intensity. A sunset evaluates the sunrise curve in reverse.

use embassy_time::Duration;

use crate::color::Rgb;
use crate::gradient::ColorStop;
use crate::math::{SmoothNoise, ease, lerp};

/// Brightness floor; the strip never goes fully dark mid-animation.
const MIN_BRIGHTNESS: f32 = 0.01;

/// Cloud noise is suppressed below this brightness, where the human eye is
/// most sensitive to flicker.
const CLOUD_SUPPRESS_BELOW: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunDirection {
    Sunrise,
    Sunset,
}

/// Immutable per-season palette and tuning.
#[derive(Debug, Clone, Copy)]
pub struct SeasonProfile {
    /// Sunrise color keyframes, ascending by fraction. Sunset reads them
    /// in reverse.
    keyframes: &'static [ColorStop],
    /// Peak daylight brightness.
    max_brightness: f32,
    /// Amplitude of the cloud brightness noise.
    cloud_intensity: f32,
    /// Scaling applied to requested animation durations.
    duration_scale: f32,
    /// Seed for the cloud noise, distinct per season.
    noise_seed: u64,
}

const fn stop(position: f32, r: u8, g: u8, b: u8) -> ColorStop {
    ColorStop::new(position, Rgb { r, g, b })
}

static WINTER_KEYFRAMES: [ColorStop; 5] = [
    stop(0.0, 255, 42, 0),
    stop(0.25, 255, 113, 48),
    stop(0.5, 255, 169, 96),
    stop(0.75, 255, 211, 143),
    stop(1.0, 255, 239, 191),
];

static SPRING_KEYFRAMES: [ColorStop; 5] = [
    stop(0.0, 255, 64, 0),
    stop(0.25, 255, 136, 51),
    stop(0.5, 255, 191, 102),
    stop(0.75, 255, 230, 153),
    stop(1.0, 255, 251, 204),
];

static SUMMER_KEYFRAMES: [ColorStop; 5] = [
    stop(0.0, 255, 102, 25),
    stop(0.25, 255, 164, 73),
    stop(0.5, 255, 210, 121),
    stop(0.75, 255, 241, 169),
    stop(1.0, 255, 255, 217),
];

static AUTUMN_KEYFRAMES: [ColorStop; 5] = [
    stop(0.0, 255, 51, 0),
    stop(0.25, 255, 120, 45),
    stop(0.5, 255, 175, 89),
    stop(0.75, 255, 216, 134),
    stop(1.0, 255, 242, 178),
];

static WINTER: SeasonProfile = SeasonProfile {
    keyframes: &WINTER_KEYFRAMES,
    max_brightness: 0.8,
    cloud_intensity: 0.02,
    duration_scale: 0.85,
    noise_seed: 0x5EA5_0001,
};

static SPRING: SeasonProfile = SeasonProfile {
    keyframes: &SPRING_KEYFRAMES,
    max_brightness: 1.0,
    cloud_intensity: 0.03,
    duration_scale: 1.0,
    noise_seed: 0x5EA5_0002,
};

static SUMMER: SeasonProfile = SeasonProfile {
    keyframes: &SUMMER_KEYFRAMES,
    max_brightness: 1.0,
    cloud_intensity: 0.04,
    duration_scale: 1.15,
    noise_seed: 0x5EA5_0003,
};

static AUTUMN: SeasonProfile = SeasonProfile {
    keyframes: &AUTUMN_KEYFRAMES,
    max_brightness: 0.9,
    cloud_intensity: 0.03,
    duration_scale: 0.95,
    noise_seed: 0x5EA5_0004,
};

impl Season {
    pub fn profile(self) -> &'static SeasonProfile {
        match self {
            Self::Winter => &WINTER,
            Self::Spring => &SPRING,
            Self::Summer => &SUMMER,
            Self::Autumn => &AUTUMN,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            "winter" => Some(Self::Winter),
            "spring" => Some(Self::Spring),
            "summer" => Some(Self::Summer),
            "autumn" => Some(Self::Autumn),
            _ => None,
        }
    }
}

impl SeasonProfile {
    /// Color at `elapsed_fraction` of the animation, `[0, 1]`.
    pub fn color_at(&self, elapsed_fraction: f32, direction: SunDirection) -> Rgb {
        let f = ease(oriented_fraction(elapsed_fraction, direction));
        crate::gradient::sample_stops(self.keyframes, f)
    }

    /// Brightness at `elapsed_fraction`, with a slow cloud-noise overlay.
    ///
    /// The noise timebase is real elapsed time (`fraction * duration`), so
    /// cloud variation looks the same regardless of the total duration.
    pub fn brightness_at(
        &self,
        elapsed_fraction: f32,
        direction: SunDirection,
        duration: Duration,
    ) -> f32 {
        let f = ease(oriented_fraction(elapsed_fraction, direction));
        let base = lerp(MIN_BRIGHTNESS, self.max_brightness, f);

        if base < CLOUD_SUPPRESS_BELOW {
            return base;
        }

        let elapsed_secs =
            elapsed_fraction.clamp(0.0, 1.0) * duration_as_secs_f32(duration);
        let noise = SmoothNoise::new(self.noise_seed).sample(elapsed_secs);
        (base + noise * self.cloud_intensity).clamp(MIN_BRIGHTNESS, self.max_brightness)
    }

    pub const fn max_brightness(&self) -> f32 {
        self.max_brightness
    }

    /// Requested duration scaled for the season.
    pub fn scaled_duration(&self, duration: Duration) -> Duration {
        let millis = duration_as_secs_f32(duration) * 1000.0 * self.duration_scale;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            Duration::from_millis(millis as u64)
        }
    }
}

/// A sunset runs the sunrise curve backwards.
fn oriented_fraction(fraction: f32, direction: SunDirection) -> f32 {
    let f = fraction.clamp(0.0, 1.0);
    match direction {
        SunDirection::Sunrise => f,
        SunDirection::Sunset => 1.0 - f,
    }
}

#[allow(clippy::cast_precision_loss)]
fn duration_as_secs_f32(duration: Duration) -> f32 {
    duration.as_millis() as f32 / 1000.0
}
