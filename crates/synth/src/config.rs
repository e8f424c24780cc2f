//! Configuration for shape generation.

use crate::error::SynthError;

/// Generation parameters shared by all shapes.
///
/// # Example
///
/// ```
/// use hpfr_synth::ShapeConfig;
///
/// let config = ShapeConfig::new().with_noise(0.1).with_scale(10.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeConfig {
    /// Standard deviation of Gaussian jitter, in unit-shape coordinates.
    noise: f64,
    /// Multiplier applied to every coordinate.
    scale: f64,
}

impl ShapeConfig {
    /// Defaults: `noise = 0.05`, `scale = 1.0`.
    pub fn new() -> Self {
        Self {
            noise: 0.05,
            scale: 1.0,
        }
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn noise(&self) -> f64 {
        self.noise
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rejects negative or non-finite noise and non-positive scale.
    pub fn validate(&self) -> Result<(), SynthError> {
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(SynthError::InvalidConfig {
                reason: format!("noise must be finite and >= 0, got {}", self.noise),
            });
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(SynthError::InvalidConfig {
                reason: format!("scale must be finite and > 0, got {}", self.scale),
            });
        }
        Ok(())
    }
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self::new()
    }
}
