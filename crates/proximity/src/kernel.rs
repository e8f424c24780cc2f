//! Distance-decay kernels.

use crate::error::ProximityError;
use crate::point::Point;

/// Spatial-decay function turning a distance into a proximity.
///
/// | Kernel | Formula |
/// |--------|---------|
/// | InverseDistance | `1 / (1 + d)` |
/// | InverseSquare | `1 / (1 + d²)` |
/// | Gaussian | `exp(-d² / 2bw²)` |
///
/// All three are symmetric, equal 1 at `d = 0`, and decrease monotonically.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Kernel {
    /// `1 / (1 + d)`.
    #[default]
    InverseDistance,
    /// `1 / (1 + d²)`.
    InverseSquare,
    /// `exp(-d² / (2 * bandwidth²))`.
    Gaussian {
        /// Kernel width in coordinate units.
        bandwidth: f64,
    },
}

impl Kernel {
    /// Evaluates the kernel at distance `d`.
    pub fn eval(&self, d: f64) -> f64 {
        match *self {
            Kernel::InverseDistance => 1.0 / (1.0 + d),
            Kernel::InverseSquare => 1.0 / (1.0 + d * d),
            Kernel::Gaussian { bandwidth } => (-d * d / (2.0 * bandwidth * bandwidth)).exp(),
        }
    }

    /// Proximity between two points.
    pub fn between(&self, a: &Point, b: &Point) -> f64 {
        self.eval(a.distance(b))
    }

    /// Validates kernel parameters.
    pub fn validate(&self) -> Result<(), ProximityError> {
        match *self {
            Kernel::Gaussian { bandwidth } if !bandwidth.is_finite() || bandwidth <= 0.0 => {
                Err(ProximityError::InvalidBandwidth { bandwidth })
            }
            _ => Ok(()),
        }
    }
}
