//! Shared lighting state and read-only snapshots.
//!
//! The live record is owned by the engine and mutated only through its
//! command entry points; readers get a [`LightingSnapshot`] deep copy, so a
//! torn read is impossible by construction.

use crate::color::Rgb;
use crate::gradient::GradientConfig;
use crate::scheduler::AnimationHandle;

/// What the strip is currently showing. Exactly one mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingMode {
    Off,
    Solid,
    GradientStatic,
    GradientAnimated,
    Sunrise,
    Sunset,
}

/// Live state record, engine-internal.
#[derive(Debug, Clone)]
pub(crate) struct LightingState {
    pub(crate) mode: LightingMode,
    /// Last known solid color (kept across `off` like a power toggle).
    pub(crate) solid_color: Rgb,
    pub(crate) brightness: f32,
    pub(crate) gradient: Option<GradientConfig>,
}

impl LightingState {
    pub(crate) const fn new() -> Self {
        Self {
            mode: LightingMode::Off,
            solid_color: Rgb { r: 0, g: 0, b: 0 },
            brightness: 1.0,
            gradient: None,
        }
    }
}

/// Progress of the active animation, as seen by a status query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationProgress {
    pub handle: AnimationHandle,
    /// Completed fraction in `[0, 1]`; `None` for unbounded animations.
    pub fraction: Option<f32>,
}

/// Immutable deep copy of the lighting state.
#[derive(Debug, Clone, PartialEq)]
pub struct LightingSnapshot {
    pub mode: LightingMode,
    pub solid_color: Rgb,
    pub brightness: f32,
    pub gradient: Option<GradientConfig>,
    pub animation: Option<AnimationProgress>,
}
