//! Multi-stop gradient configuration and rasterizer.
//!
//! [`render_into`] is pure: identical inputs always produce an identical
//! frame, which also lets a status query re-derive the currently displayed
//! frame.

use core::f32::consts::TAU;

use heapless::Vec;
use libm::sinf;

use crate::color::{Rgb, hsv_to_rgb, lerp_rgb, scale_rgb};
use crate::math::wrap01;

/// Maximum number of color stops in one gradient.
pub const MAX_STOPS: usize = 16;

/// Single color anchor point in a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position along the strip, `[0, 1]`.
    pub position: f32,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(position: f32, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// Time-based transform applied to a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationMode {
    /// Cyclic scroll of the gradient along the strip.
    Shift,
    /// Global brightness pulse, positions unchanged.
    Pulse,
    /// Full-spectrum hue rotation, stops ignored.
    Rainbow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationDirection {
    Forward,
    Backward,
}

impl AnimationDirection {
    const fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Animation parameters for a gradient. Absence means static.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    mode: AnimationMode,
    speed: f32,
    direction: AnimationDirection,
}

impl AnimationSpec {
    /// Create an animation spec. Speed must be positive.
    pub fn new(
        mode: AnimationMode,
        speed: f32,
        direction: AnimationDirection,
    ) -> Result<Self, ValidationError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ValidationError::NonPositiveSpeed);
        }
        Ok(Self {
            mode,
            speed,
            direction,
        })
    }

    pub const fn mode(&self) -> AnimationMode {
        self.mode
    }

    pub const fn speed(&self) -> f32 {
        self.speed
    }

    pub const fn direction(&self) -> AnimationDirection {
        self.direction
    }
}

/// Error for malformed gradient requests. Rejected synchronously at
/// construction; engine state stays unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Fewer than two color stops.
    NotEnoughStops,
    /// More than [`MAX_STOPS`] color stops.
    TooManyStops,
    /// A stop position outside `[0, 1]`.
    StopPositionOutOfRange,
    /// Brightness outside `[0, 1]`.
    BrightnessOutOfRange,
    /// Animation speed not strictly positive.
    NonPositiveSpeed,
    /// An animated operation was requested with a static config.
    MissingAnimation,
    /// A bounded animation was requested with a zero duration.
    ZeroDuration,
}

/// Complete gradient configuration.
///
/// Constructed through [`GradientConfig::new`], which validates the request
/// and stably sorts the stops ascending by position. With duplicate
/// positions the later stop in caller order wins at the exact boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientConfig {
    stops: Vec<ColorStop, MAX_STOPS>,
    brightness: f32,
    animation: Option<AnimationSpec>,
}

impl GradientConfig {
    pub fn new(stops: &[ColorStop], brightness: f32) -> Result<Self, ValidationError> {
        if stops.len() < 2 {
            return Err(ValidationError::NotEnoughStops);
        }
        for stop in stops {
            if !(0.0..=1.0).contains(&stop.position) {
                return Err(ValidationError::StopPositionOutOfRange);
            }
        }
        if !(0.0..=1.0).contains(&brightness) {
            return Err(ValidationError::BrightnessOutOfRange);
        }

        let mut sorted: Vec<ColorStop, MAX_STOPS> =
            Vec::from_slice(stops).map_err(|()| ValidationError::TooManyStops)?;
        insertion_sort(&mut sorted);

        Ok(Self {
            stops: sorted,
            brightness,
            animation: None,
        })
    }

    /// Attach an animation spec.
    #[must_use]
    pub fn with_animation(mut self, spec: AnimationSpec) -> Self {
        self.animation = Some(spec);
        self
    }

    /// Stops, sorted ascending by position.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn animation(&self) -> Option<&AnimationSpec> {
        self.animation.as_ref()
    }

    pub const fn is_animated(&self) -> bool {
        self.animation.is_some()
    }
}

/// Stable sort by position; keeps caller order for equal positions so the
/// later stop wins at an exact boundary.
fn insertion_sort(stops: &mut [ColorStop]) {
    for i in 1..stops.len() {
        let mut j = i;
        while j > 0 && stops[j - 1].position > stops[j].position {
            stops.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Rasterize a gradient into `frame` at animation time `t` (seconds).
pub fn render_into(config: &GradientConfig, frame: &mut [Rgb], t: f32) {
    if frame.is_empty() {
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let last = frame.len().saturating_sub(1).max(1) as f32;

    match config.animation {
        None => {
            for (i, led) in frame.iter_mut().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let p = i as f32 / last;
                *led = scale_rgb(sample_stops(config.stops(), p), config.brightness);
            }
        }
        Some(spec) => match spec.mode {
            AnimationMode::Shift => {
                let offset = spec.direction.sign() * spec.speed * t;
                for (i, led) in frame.iter_mut().enumerate() {
                    #[allow(clippy::cast_precision_loss)]
                    let p = wrap01(i as f32 / last + offset);
                    *led = scale_rgb(sample_stops(config.stops(), p), config.brightness);
                }
            }
            AnimationMode::Pulse => {
                let pulse = 0.5 + 0.5 * sinf(TAU * spec.speed * t);
                let factor = config.brightness * pulse;
                for (i, led) in frame.iter_mut().enumerate() {
                    #[allow(clippy::cast_precision_loss)]
                    let p = i as f32 / last;
                    *led = scale_rgb(sample_stops(config.stops(), p), factor);
                }
            }
            AnimationMode::Rainbow => {
                let offset = spec.direction.sign() * spec.speed * t;
                for (i, led) in frame.iter_mut().enumerate() {
                    #[allow(clippy::cast_precision_loss)]
                    let hue = wrap01(i as f32 / last + offset) * 360.0;
                    *led = scale_rgb(hsv_to_rgb(hue, 1.0, 1.0), config.brightness);
                }
            }
        },
    }
}

/// Interpolated color at normalized position `p`.
///
/// Positions before the first stop or after the last clamp to the nearest
/// edge stop; there is no extrapolation. `stops` must be sorted ascending.
pub(crate) fn sample_stops(stops: &[ColorStop], p: f32) -> Rgb {
    debug_assert!(stops.len() >= 2);

    let first = stops[0];
    let last = stops[stops.len() - 1];
    if p <= first.position {
        return first.color;
    }
    if p >= last.position {
        return last.color;
    }

    // Left neighbor is the last stop at or before p, so at an exact shared
    // boundary the later stop takes effect.
    let mut left = first;
    let mut right = last;
    for pair in stops.windows(2) {
        if pair[0].position <= p {
            left = pair[0];
            right = pair[1];
        } else {
            break;
        }
    }

    let span = right.position - left.position;
    if span <= 0.0 {
        return left.color;
    }
    lerp_rgb(left.color, right.color, (p - left.position) / span)
}
