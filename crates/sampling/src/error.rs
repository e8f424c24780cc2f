//! Error types for the hpfr-sampling crate.

/// Error type for all fallible operations in the hpfr-sampling crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SamplingError {
    /// Returned when a sampler is handed no points.
    #[error("point set is empty")]
    EmptyInputSet,

    /// Returned when a sampler ends up selecting nothing.
    #[error("selection is empty")]
    EmptySelection,

    /// Returned when the hybrid pool size is zero or exceeds |S|.
    #[error("hybrid pool size {pool_size} is outside 1..={set_size}")]
    InvalidPoolSize {
        /// Requested K'.
        pool_size: usize,
        /// |S|.
        set_size: usize,
    },

    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a strategy name is not recognised.
    #[error("unknown strategy: {name}")]
    UnknownStrategy {
        /// The name as given.
        name: String,
    },

    /// Proximity error.
    #[error(transparent)]
    Proximity(#[from] hpfr_proximity::ProximityError),

    /// Scoring error.
    #[error(transparent)]
    Score(#[from] hpfr_score::ScoreError),

    /// Partition error.
    #[error(transparent)]
    Partition(#[from] hpfr_partition::PartitionError),
}
