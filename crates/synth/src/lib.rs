//! Synthetic 2D point sets for strategy comparisons.
//!
//! ```
//! use hpfr_synth::{Shape, generate};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let shape: Shape = "flower".parse().unwrap();
//! let points = generate(shape, 1000, &mut rng).unwrap();
//! assert_eq!(points.len(), 1000);
//! ```

mod config;
mod error;
mod generate;
mod shape;

pub use config::ShapeConfig;
pub use error::SynthError;
pub use generate::{generate, generate_with};
pub use shape::Shape;
