//! Named gradient presets.
//!
//! Persistence lives outside the engine behind [`PresetStore`]; this module
//! only defines the capability plus the built-in palettes, so a deployment
//! without durable storage still has something to show.

use crate::color::Rgb;
use crate::gradient::{
    AnimationDirection, AnimationMode, AnimationSpec, ColorStop, GradientConfig,
};

/// Error surfaced by a preset store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetError {
    /// No preset with the requested name.
    NotFound,
    /// The backing storage failed.
    Storage,
}

/// Capability for loading and saving named gradient configurations.
///
/// Implemented by the host on top of whatever storage it has (flash,
/// filesystem, in-memory map in tests).
pub trait PresetStore {
    fn load(&self, name: &str) -> Result<GradientConfig, PresetError>;
    fn save(&mut self, name: &str, config: &GradientConfig) -> Result<(), PresetError>;
}

/// Names of the built-in presets.
pub const DEFAULT_PRESET_NAMES: &[&str] =
    &["sunset", "ocean", "rainbow", "fire", "forest", "aurora"];

const fn stop(position: f32, r: u8, g: u8, b: u8) -> ColorStop {
    ColorStop::new(position, Rgb { r, g, b })
}

/// Look up a built-in preset by name.
pub fn default_preset(name: &str) -> Option<GradientConfig> {
    // Stop lists are well-formed by construction, so the validation in
    // GradientConfig::new cannot fail here.
    let config = match name {
        "sunset" => GradientConfig::new(
            &[
                stop(0.0, 255, 94, 77),
                stop(0.3, 255, 140, 0),
                stop(0.6, 255, 69, 0),
                stop(1.0, 75, 0, 130),
            ],
            0.9,
        ),
        "ocean" => GradientConfig::new(
            &[
                stop(0.0, 0, 105, 148),
                stop(0.5, 0, 191, 255),
                stop(1.0, 64, 224, 208),
            ],
            0.8,
        ),
        "rainbow" => GradientConfig::new(
            &[
                stop(0.0, 255, 0, 0),
                stop(0.2, 255, 165, 0),
                stop(0.4, 255, 255, 0),
                stop(0.6, 0, 255, 0),
                stop(0.8, 0, 0, 255),
                stop(1.0, 138, 43, 226),
            ],
            1.0,
        )
        .map(|config| {
            animated(config, AnimationMode::Rainbow)
        }),
        "fire" => GradientConfig::new(
            &[
                stop(0.0, 255, 255, 0),
                stop(0.4, 255, 140, 0),
                stop(0.7, 255, 69, 0),
                stop(1.0, 139, 0, 0),
            ],
            0.95,
        ),
        "forest" => GradientConfig::new(
            &[
                stop(0.0, 34, 139, 34),
                stop(0.5, 0, 128, 0),
                stop(1.0, 107, 142, 35),
            ],
            0.85,
        ),
        "aurora" => GradientConfig::new(
            &[
                stop(0.0, 0, 255, 127),
                stop(0.5, 64, 224, 208),
                stop(1.0, 138, 43, 226),
            ],
            0.7,
        )
        .map(|config| animated(config, AnimationMode::Pulse)),
        _ => return None,
    };

    config.ok()
}

fn animated(config: GradientConfig, mode: AnimationMode) -> GradientConfig {
    match AnimationSpec::new(mode, 1.0, AnimationDirection::Forward) {
        Ok(spec) => config.with_animation(spec),
        Err(_) => config,
    }
}
