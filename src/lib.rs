#![no_std]

pub mod color;
pub mod engine;
pub mod frame_scheduler;
pub mod gamma;
pub mod gradient;
pub mod math;
pub mod presets;
pub mod scheduler;
pub mod state;
pub mod sun_cycle;

pub use engine::{EngineConfig, EngineError, LightEngine};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use gamma::GammaTable;
pub use gradient::{
    AnimationDirection, AnimationMode, AnimationSpec, ColorStop, GradientConfig,
    ValidationError,
};
pub use math::{DomainError, SmoothNoise};
pub use presets::{PresetError, PresetStore};
pub use scheduler::{AnimationHandle, AnimationStatus};
pub use state::{AnimationProgress, LightingMode, LightingSnapshot};
pub use sun_cycle::{Season, SeasonProfile, SunDirection};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Error returned by a [`PixelSink`] when a write to the strip fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareError;

/// Abstract LED strip output capability
///
/// Implement this trait to support different hardware transports.
/// The engine is generic over this trait and never touches hardware itself.
pub trait PixelSink {
    /// Write a full frame to the strip.
    ///
    /// `brightness` is a global scalar in `[0, 1]` applied by the transport
    /// after the per-channel values (e.g. a driver-level PWM brightness).
    fn write(&mut self, frame: &[Rgb], brightness: f32) -> Result<(), HardwareError>;
}
