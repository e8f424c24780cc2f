//! Spatial partitions of a point set and proportional budget allocation.
//!
//! - [`UniformGrid`]: `G × G` equal cells over the bounding box.
//! - [`QuadTree`]: recursive four-way split until a leaf holds at most `m`
//!   points or reaches depth `d`.
//! - [`allocate`]: splits an integer budget across cells in proportion to a
//!   score, rounding by largest remainder and respecting cell populations.
//!
//! Both partitions refer to points by their index in the input slice and
//! cover every index exactly once.

mod allocate;
mod bounds;
mod error;
mod grid;
mod quadtree;

pub use allocate::{Allocation, CellDemand, allocate, largest_remainder};
pub use bounds::Bounds;
pub use error::PartitionError;
pub use grid::{Cell, CellId, UniformGrid};
pub use quadtree::{NodeId, QuadNode, QuadTree};
