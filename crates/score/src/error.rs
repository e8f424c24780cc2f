//! Error types for the hpfr-score crate.

/// Error type for all fallible operations in the hpfr-score crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScoreError {
    /// Returned when the subset is too small for the pairwise terms.
    #[error("subset size must be >= 2, got {k}")]
    InvalidBudget {
        /// The offending subset size.
        k: usize,
    },

    /// Returned when `W == K`, which zeroes the HPFR denominator.
    #[error("diversity weight {w} equals set size {set_size}")]
    DegenerateWeight {
        /// The diversity weight.
        w: f64,
        /// Size of the full set S.
        set_size: usize,
    },

    /// Returned when a subset index does not address a point.
    #[error("index {index} out of range for {len} points")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of points.
        len: usize,
    },

    /// Returned when a subset lists the same point twice.
    #[error("index {index} appears more than once in the subset")]
    DuplicateIndex {
        /// The repeated index.
        index: usize,
    },

    /// Returned when the proximity sums do not cover the point slice.
    #[error("proximity sums cover {sums} points, expected {points}")]
    LengthMismatch {
        /// Length of the sums slice.
        sums: usize,
        /// Length of the points slice.
        points: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_budget() {
        let e = ScoreError::InvalidBudget { k: 1 };
        assert_eq!(e.to_string(), "subset size must be >= 2, got 1");
    }

    #[test]
    fn display_degenerate_weight() {
        let e = ScoreError::DegenerateWeight {
            w: 4.0,
            set_size: 4,
        };
        assert_eq!(e.to_string(), "diversity weight 4 equals set size 4");
    }

    #[test]
    fn display_index_out_of_range() {
        let e = ScoreError::IndexOutOfRange { index: 9, len: 3 };
        assert_eq!(e.to_string(), "index 9 out of range for 3 points");
    }

    #[test]
    fn display_duplicate_index() {
        let e = ScoreError::DuplicateIndex { index: 2 };
        assert_eq!(e.to_string(), "index 2 appears more than once in the subset");
    }

    #[test]
    fn display_length_mismatch() {
        let e = ScoreError::LengthMismatch { sums: 2, points: 3 };
        assert_eq!(e.to_string(), "proximity sums cover 2 points, expected 3");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ScoreError>();
    }
}
