//! Gamma correction lookup table.

use libm::{powf, roundf};

use crate::color::Rgb;

/// 256-entry gamma correction LUT.
///
/// Applied to color channels before the sink's global brightness scaling,
/// matching drivers whose global brightness is a separate PWM stage.
#[derive(Debug, Clone)]
pub struct GammaTable {
    lut: [u8; 256],
}

impl GammaTable {
    /// Build a table for the given gamma (2.2 is typical for WS28xx strips).
    pub fn new(gamma: f32) -> Self {
        let mut lut = [0u8; 256];
        for (i, entry) in lut.iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let normalized = i as f32 / 255.0;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                *entry = roundf(powf(normalized, gamma) * 255.0) as u8;
            }
        }
        Self { lut }
    }

    /// Correct a single channel value.
    #[inline]
    pub fn correct(&self, value: u8) -> u8 {
        self.lut[value as usize]
    }

    /// Correct a whole frame in place.
    pub fn apply(&self, frame: &mut [Rgb]) {
        for led in frame {
            led.r = self.correct(led.r);
            led.g = self.correct(led.g);
            led.b = self.correct(led.b);
        }
    }
}

impl Default for GammaTable {
    fn default() -> Self {
        Self::new(2.2)
    }
}
