//! Comparison error types.

/// Errors that can occur while running a comparison.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// Returned when the comparison configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Returned when a dataset cannot be produced.
    #[error("failed to load dataset '{dataset}': {reason}")]
    Load { dataset: String, reason: String },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// Proximity error.
    #[error(transparent)]
    Proximity(#[from] hpfr_proximity::ProximityError),

    /// Sampling error.
    #[error(transparent)]
    Sampling(#[from] hpfr_sampling::SamplingError),
}
