//! Pairwise proximity precomputation.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::ProximityError;
use crate::kernel::Kernel;
use crate::lookup::{KernelPairs, PairProximity};
use crate::point::{Point, validate_points};

/// What a [`ProximityTable`] keeps after the O(n²) pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableMode {
    /// Per-point sums and every pair value (O(n²) space).
    #[default]
    Full,
    /// Per-point sums only (O(n) space). Pairs are re-evaluated on demand.
    SumsOnly,
}

/// Proximity statistics of a full point set S.
///
/// `sums[i]` is the proximity of point `i` to every other point of S. Pair
/// values are packed into the upper triangle (`i < j`) so each unordered pair
/// is stored once. Pairs are read through [`ProximityTable::lookup`], which
/// also serves [`TableMode::SumsOnly`] tables.
///
/// Built once per S and read-only afterward; share it between samplers.
#[derive(Debug, Clone)]
pub struct ProximityTable {
    n: usize,
    sums: Vec<f64>,
    pairs: Option<Vec<f64>>,
    kernel: Option<Kernel>,
    build_time: Duration,
}

impl ProximityTable {
    /// Builds a table for `points` with `kernel`.
    ///
    /// Costs O(n²) kernel evaluations in both modes. With fewer than two
    /// points every sum is zero and no pairs exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProximityError`] if the kernel or any point is invalid.
    #[tracing::instrument(skip(points), fields(n = points.len()))]
    pub fn build(points: &[Point], kernel: Kernel, mode: TableMode) -> Result<Self, ProximityError> {
        kernel.validate()?;
        let mut table = Self::compute(points, mode, |a, b| kernel.between(a, b))?;
        table.kernel = Some(kernel);
        Ok(table)
    }

    /// Builds a full table from an arbitrary symmetric proximity function.
    ///
    /// # Errors
    ///
    /// Returns [`ProximityError`] if any point is invalid.
    pub fn from_fn<F>(points: &[Point], f: F) -> Result<Self, ProximityError>
    where
        F: Fn(&Point, &Point) -> f64,
    {
        Self::compute(points, TableMode::Full, f)
    }

    fn compute<F>(points: &[Point], mode: TableMode, f: F) -> Result<Self, ProximityError>
    where
        F: Fn(&Point, &Point) -> f64,
    {
        validate_points(points)?;
        let start = Instant::now();
        let n = points.len();
        let mut sums = vec![0.0; n];
        let mut pairs = match mode {
            TableMode::Full => Some(Vec::with_capacity(n * n.saturating_sub(1) / 2)),
            TableMode::SumsOnly => None,
        };

        for i in 0..n {
            for j in (i + 1)..n {
                let p = f(&points[i], &points[j]);
                sums[i] += p;
                sums[j] += p;
                if let Some(pairs) = pairs.as_mut() {
                    pairs.push(p);
                }
            }
        }

        let build_time = start.elapsed();
        debug!(n, ?mode, ?build_time, "proximity table built");
        Ok(Self {
            n,
            sums,
            pairs,
            kernel: None,
            build_time,
        })
    }

    /// Number of points the table was built from.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` if built from an empty set.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Per-point proximity sums, indexed like the input slice.
    pub fn sums(&self) -> &[f64] {
        &self.sums
    }

    /// Proximity sum of point `i`.
    pub fn sum(&self, i: usize) -> f64 {
        self.sums[i]
    }

    /// Storage mode.
    pub fn mode(&self) -> TableMode {
        if self.pairs.is_some() {
            TableMode::Full
        } else {
            TableMode::SumsOnly
        }
    }

    /// Kernel used for [`ProximityTable::build`]; `None` for [`ProximityTable::from_fn`].
    pub fn kernel(&self) -> Option<Kernel> {
        self.kernel
    }

    /// Wall-clock time spent computing the table.
    pub fn build_time(&self) -> Duration {
        self.build_time
    }

    /// Pair lookup over `points` that falls back to the kernel when pairs
    /// were not stored.
    ///
    /// `points` must be the slice the table was built from.
    pub fn lookup<'a>(&'a self, points: &'a [Point]) -> TableLookup<'a> {
        TableLookup {
            table: self,
            on_demand: match (&self.pairs, self.kernel) {
                (None, Some(kernel)) => Some(KernelPairs::new(points, kernel)),
                _ => None,
            },
        }
    }

    fn packed_index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < j && j < self.n);
        i * (2 * self.n - i - 1) / 2 + (j - i - 1)
    }

    /// Stored direction only: `Some` for `i < j < n` in full mode.
    fn stored(&self, i: usize, j: usize) -> Option<f64> {
        let pairs = self.pairs.as_ref()?;
        if i < j && j < self.n {
            Some(pairs[self.packed_index(i, j)])
        } else {
            None
        }
    }
}

/// Pair view returned by [`ProximityTable::lookup`].
#[derive(Debug, Clone, Copy)]
pub struct TableLookup<'a> {
    table: &'a ProximityTable,
    on_demand: Option<KernelPairs<'a>>,
}

impl PairProximity for TableLookup<'_> {
    fn pair(&self, i: usize, j: usize) -> Option<f64> {
        match &self.on_demand {
            Some(kp) => kp.pair(i, j),
            None => self.table.stored(i, j),
        }
    }
}
