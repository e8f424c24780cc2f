//! Error types for the hpfr-synth crate.

/// Error type for all fallible operations in the hpfr-synth crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SynthError {
    /// Returned when a shape name is not recognised.
    #[error("unknown shape: {name}")]
    UnknownShape {
        /// The name as given.
        name: String,
    },

    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
