//! Subset samplers for diversified spatial top-k selection.
//!
//! Every sampler takes the point set S, a [`ProximityTable`] built from it, a
//! [`SamplerConfig`] and an explicit RNG, and returns a [`Selection`] scored
//! with the HPFR objective.
//!
//! | Strategy | Preparation | Draw |
//! |----------|-------------|------|
//! | [`baseline`] | full table | reservoir over S |
//! | [`grid_standard`] | uniform grid | quotas by population, then per cell |
//! | [`grid_weighted`] | uniform grid | quotas by population × weight, then per cell |
//! | [`quadtree`] | quadtree | quotas by leaf population, then per leaf |
//! | [`biased`] | none | uniform over S |
//! | [`hybrid`] | pre-filter to K' + pool table | inner strategy on the pool |
//!
//! # Quick start
//!
//! ```
//! use hpfr_proximity::{Kernel, Point, ProximityTable, TableMode};
//! use hpfr_sampling::{SamplerConfig, Strategy, select};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let points: Vec<Point> = (0..100)
//!     .map(|i| Point::new(i, (i % 10) as f64, (i / 10) as f64, 1.0))
//!     .collect();
//! let table = ProximityTable::build(&points, Kernel::default(), TableMode::Full).unwrap();
//! let config = SamplerConfig::new(10, 2.5).with_resolution(4);
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let selection = select(Strategy::GridStandard, &points, &table, &config, &mut rng).unwrap();
//! assert_eq!(selection.indices().len(), 10);
//! ```

mod baseline;
mod biased;
mod config;
mod draw;
mod error;
mod grid;
mod hybrid;
mod quadtree;
mod result;
mod select;

pub use baseline::baseline;
pub use biased::biased;
pub use config::{HybridConfig, Prefilter, SamplerConfig, Strategy};
pub use error::SamplingError;
pub use grid::{grid_standard, grid_weighted};
pub use hybrid::hybrid;
pub use quadtree::quadtree;
pub use result::{CellKey, CellStat, HybridInfo, Selection};
pub use select::select;
