//! Error types for the hpfr-proximity crate.

/// Error type for all fallible operations in the hpfr-proximity crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProximityError {
    /// Returned when a point carries a NaN or infinite coordinate or weight.
    #[error("non-finite {field} for point {id}")]
    NonFiniteInput {
        /// Identifier of the offending point.
        id: u64,
        /// Name of the non-finite field.
        field: &'static str,
    },

    /// Returned when two points share an identifier.
    #[error("duplicate point id {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: u64,
    },

    /// Returned when a Gaussian kernel bandwidth is non-finite or non-positive.
    #[error("kernel bandwidth must be finite and positive, got {bandwidth}")]
    InvalidBandwidth {
        /// The invalid bandwidth.
        bandwidth: f64,
    },
}
