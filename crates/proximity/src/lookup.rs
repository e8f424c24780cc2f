//! Symmetric pair lookup.
//!
//! Pair stores keep one direction per unordered pair. [`PairProximity::proximity`]
//! hides that: it tries `(i, j)`, then `(j, i)`, and treats a missing pair as
//! non-adjacent (`0.0`). Partition-based samplers rely on the zero default for
//! pairs they never materialise.

use std::collections::HashMap;

use crate::kernel::Kernel;
use crate::point::Point;

/// Read-only store of pairwise proximities keyed by point index.
pub trait PairProximity {
    /// Returns the value stored for the ordered key `(i, j)`, if any.
    fn pair(&self, i: usize, j: usize) -> Option<f64>;

    /// Symmetric lookup with a zero default.
    fn proximity(&self, i: usize, j: usize) -> f64 {
        self.pair(i, j).or_else(|| self.pair(j, i)).unwrap_or(0.0)
    }
}

/// Sparse pair store for pruned pair sets.
///
/// Keys are kept exactly as inserted, so a pair inserted as `(3, 1)` is only
/// found by `pair(3, 1)`; use [`PairProximity::proximity`] for symmetric access.
#[derive(Debug, Clone, Default)]
pub struct SparsePairs {
    pairs: HashMap<(usize, usize), f64>,
}

impl SparsePairs {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under the ordered key `(i, j)`.
    pub fn insert(&mut self, i: usize, j: usize, value: f64) {
        self.pairs.insert((i, j), value);
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pair is stored.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl PairProximity for SparsePairs {
    fn pair(&self, i: usize, j: usize) -> Option<f64> {
        self.pairs.get(&(i, j)).copied()
    }
}

/// Evaluates a kernel on demand instead of storing pairs.
#[derive(Debug, Clone, Copy)]
pub struct KernelPairs<'a> {
    points: &'a [Point],
    kernel: Kernel,
}

impl<'a> KernelPairs<'a> {
    /// Wraps `points` with `kernel`.
    pub fn new(points: &'a [Point], kernel: Kernel) -> Self {
        Self { points, kernel }
    }
}

impl PairProximity for KernelPairs<'_> {
    fn pair(&self, i: usize, j: usize) -> Option<f64> {
        if i == j {
            return None;
        }
        let a = self.points.get(i)?;
        let b = self.points.get(j)?;
        Some(self.kernel.between(a, b))
    }
}
