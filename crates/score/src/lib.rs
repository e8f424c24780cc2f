//! Relevance-minus-redundancy objective over point subsets.
//!
//! | Function | Output | Use |
//! |----------|--------|-----|
//! | [`hpf`] | pairwise contribution | single-pair diagnostics |
//! | [`hpfr`] | [`Objective`] | aggregate score of a subset |
//! | [`hpfr_split`] | [`SplitObjective`] | decomposed reporting |
//! | [`IncrementalScore`] | running state | growing a subset point by point |
//!
//! Redundancy is measured inside the selected subset: `intra[i]` is recomputed
//! over R on every call, while the relevance-side proximity sums come from the
//! full set S.
//!
//! # Quick start
//!
//! ```
//! use hpfr_proximity::{Kernel, Point, ProximityTable, TableMode};
//! use hpfr_score::hpfr;
//!
//! let points = vec![
//!     Point::new(0, 0.0, 0.0, 1.0),
//!     Point::new(1, 1.0, 0.0, 1.0),
//!     Point::new(2, 5.0, 5.0, 1.0),
//! ];
//! let table = ProximityTable::build(&points, Kernel::default(), TableMode::Full).unwrap();
//! let objective = hpfr(&points, &[0, 2], table.sums(), &table.lookup(&points), 1.0, points.len()).unwrap();
//! assert!(objective.score() > 0.0);
//! ```

mod error;
mod hpfr;
mod incremental;
mod objective;

pub use error::ScoreError;
pub use hpfr::{hpf, hpfr, hpfr_split};
pub use incremental::IncrementalScore;
pub use objective::{Objective, SplitObjective};
