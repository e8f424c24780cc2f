//! Named point-set shapes.

use std::fmt;
use std::str::FromStr;

use crate::error::SynthError;

/// Built-in synthetic layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Two-armed S curve.
    SCurve,
    /// Gaussian blobs on a ring.
    Bubble,
    /// Three-petal rose, dense along the petal axes.
    Flower,
    /// Uniform disk.
    Disk,
    /// Noisy sine band.
    Snake,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::SCurve,
        Shape::Bubble,
        Shape::Flower,
        Shape::Disk,
        Shape::Snake,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Shape::SCurve => "s_curve",
            Shape::Bubble => "bubble",
            Shape::Flower => "flower",
            Shape::Disk => "disk",
            Shape::Snake => "snake",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = SynthError;

    /// Accepts the canonical name, case-insensitively, with `-` for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == key)
            .ok_or_else(|| SynthError::UnknownShape {
                name: s.to_string(),
            })
    }
}
