//! Numeric primitives for smooth, non-flickering light behavior.
//!
//! Everything here is a pure function of its inputs. [`SmoothNoise`] in
//! particular carries no mutable state, so the same seed and time always
//! reproduce the same sample.

use libm::floorf;

/// Error returned for degenerate numeric input (e.g. equal interpolation
/// edges).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainError;

/// Cubic Hermite ease between two edges.
///
/// Returns 0 for `x <= edge0`, 1 for `x >= edge1` and `3t^2 - 2t^3` in
/// between. Equal edges are rejected rather than dividing by zero.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> Result<f32, DomainError> {
    if edge0 == edge1 {
        return Err(DomainError);
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    Ok(t * t * (3.0 - 2.0 * t))
}

/// Cubic Hermite ease on the fixed `[0, 1]` edge pair.
///
/// Infallible variant of [`smoothstep`] for the common case.
pub fn ease(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation, `t` unclamped (callers clamp upstream).
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Wrap a value into `[0, 1)`.
#[inline]
pub fn wrap01(x: f32) -> f32 {
    x - floorf(x)
}

/// Deterministic low-frequency noise generator.
///
/// Picks a pseudo-random keyframe value every `interval` seconds and eases
/// between the two bracketing keyframes, so the signal is continuous with
/// no visible steps. Used to simulate slow cloud movement without flicker.
#[derive(Debug, Clone, Copy)]
pub struct SmoothNoise {
    seed: u64,
    interval: f32,
}

/// Default keyframe spacing in seconds.
const DEFAULT_INTERVAL_SECS: f32 = 4.0;

impl SmoothNoise {
    /// Create a generator with the default 4 s keyframe spacing.
    pub const fn new(seed: u64) -> Self {
        Self::with_interval(seed, DEFAULT_INTERVAL_SECS)
    }

    /// Create a generator with custom keyframe spacing.
    ///
    /// Non-positive intervals fall back to the default.
    pub const fn with_interval(seed: u64, interval: f32) -> Self {
        let interval = if interval > 0.0 {
            interval
        } else {
            DEFAULT_INTERVAL_SECS
        };
        Self { seed, interval }
    }

    /// Sample the signal at time `t` (seconds). Output is in `[-1, 1]`.
    pub fn sample(&self, t: f32) -> f32 {
        let cell = floorf(t / self.interval);
        let frac = t / self.interval - cell;

        #[allow(clippy::cast_possible_truncation)]
        let index = cell as i64;
        let k0 = self.keyframe(index);
        let k1 = self.keyframe(index.wrapping_add(1));

        lerp(k0, k1, ease(frac))
    }

    /// Pseudo-random keyframe value in `[-1, 1]` for a keyframe index.
    fn keyframe(&self, index: i64) -> f32 {
        #[allow(clippy::cast_sign_loss)]
        let hashed = hash(self.seed ^ (index as u64));
        #[allow(clippy::cast_precision_loss)]
        let unit = (hashed >> 8) as f32 / (1u32 << 24) as f32;
        unit * 2.0 - 1.0
    }
}

/// SplitMix64-style mixing, folded down to u32.
#[inline]
const fn hash(x: u64) -> u32 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    #[allow(clippy::cast_possible_truncation)]
    {
        (z ^ (z >> 31)) as u32
    }
}
