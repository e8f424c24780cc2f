//! Weighted spatial points and pairwise proximity precomputation.
//!
//! A [`ProximityTable`] holds, for a point set S, the symmetric proximity of
//! every unordered pair and each point's proximity sum to the rest of S. It is
//! the one O(n²) step of the selection pipeline, computed once per dataset and
//! shared read-only by every sampler.
//!
//! # Quick start
//!
//! ```
//! use hpfr_proximity::{Kernel, PairProximity, Point, ProximityTable, TableMode};
//!
//! let points = vec![
//!     Point::new(0, 0.0, 0.0, 1.0),
//!     Point::new(1, 1.0, 0.0, 1.0),
//!     Point::new(2, 0.0, 1.0, 1.0),
//! ];
//! let table = ProximityTable::build(&points, Kernel::InverseDistance, TableMode::Full).unwrap();
//! let pairs = table.lookup(&points);
//!
//! assert_eq!(pairs.proximity(0, 1), pairs.proximity(1, 0));
//! assert_eq!(table.sum(0), pairs.proximity(0, 1) + pairs.proximity(0, 2));
//! ```

pub mod error;
pub mod kernel;
pub mod lookup;
pub mod point;
pub mod table;

pub use error::ProximityError;
pub use kernel::Kernel;
pub use lookup::{KernelPairs, PairProximity, SparsePairs};
pub use point::{Point, validate_points};
pub use table::{ProximityTable, TableLookup, TableMode};
