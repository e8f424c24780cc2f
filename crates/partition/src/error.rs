//! Error types for the hpfr-partition crate.

/// Error type for all fallible operations in the hpfr-partition crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PartitionError {
    /// Returned when a partition is requested over no points.
    #[error("point set is empty")]
    EmptyInputSet,

    /// Returned when the grid resolution is zero.
    #[error("grid resolution must be >= 1, got {resolution}")]
    InvalidResolution {
        /// The invalid resolution.
        resolution: usize,
    },

    /// Returned when the quadtree leaf capacity is zero.
    #[error("quadtree capacity must be >= 1, got {capacity}")]
    InvalidCapacity {
        /// The invalid capacity.
        capacity: usize,
    },

    /// Returned when every cell score is zero.
    #[error("cell scores sum to zero; nothing to allocate proportionally")]
    ZeroAllocationMass,

    /// Returned when a cell score is negative or non-finite.
    #[error("cell {index} has invalid score {score}")]
    InvalidCellScore {
        /// Position of the cell in the input.
        index: usize,
        /// The offending score.
        score: f64,
    },
}
