//! Comparison configuration.

use hpfr_proximity::Kernel;
use hpfr_sampling::Strategy;

use crate::error::CompareError;

/// Parameter sweep for a strategy comparison.
///
/// Every `(K, k)` combo is crossed with every gamma; the diversity weight of
/// a run is `W = K / (g·k)`. Grid strategies repeat once per resolution and
/// hybrids once per pool fraction (`K' = ⌊K·f⌋`).
///
/// # Example
///
/// ```
/// use hpfr_compare::ComparisonConfig;
///
/// let config = ComparisonConfig::new()
///     .with_combos(vec![(1000, 10), (1000, 20)])
///     .with_gammas(vec![4.0])
///     .with_resolutions(vec![8, 16, 25]);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    /// `(K, k)` pairs.
    combos: Vec<(usize, usize)>,
    gammas: Vec<f64>,
    /// Grid resolutions G.
    resolutions: Vec<usize>,
    /// Quadtree `(m, d)`.
    quadtree: (usize, usize),
    /// Hybrid pool fractions of K.
    pool_fractions: Vec<f64>,
    /// Also run the hybrid with a grid pre-filter at each resolution.
    grid_prefilter: bool,
    kernel: Kernel,
    /// Strategies compared against the baseline.
    strategies: Vec<Strategy>,
}

impl ComparisonConfig {
    /// Creates a configuration with the experiment defaults.
    ///
    /// Defaults: combos `(1000, 10), (1000, 20), (1000, 50)`, gamma `4`,
    /// resolutions `8, 16, 25`, quadtree `(30, 6)`, pool fraction `0.2`,
    /// grid pre-filter on, inverse-distance kernel, every non-baseline
    /// strategy.
    pub fn new() -> Self {
        Self {
            combos: vec![(1000, 10), (1000, 20), (1000, 50)],
            gammas: vec![4.0],
            resolutions: vec![8, 16, 25],
            quadtree: (30, 6),
            pool_fractions: vec![0.2],
            grid_prefilter: true,
            kernel: Kernel::InverseDistance,
            strategies: Strategy::ALL
                .into_iter()
                .filter(|s| *s != Strategy::Baseline)
                .collect(),
        }
    }

    pub fn with_combos(mut self, combos: Vec<(usize, usize)>) -> Self {
        self.combos = combos;
        self
    }

    pub fn with_gammas(mut self, gammas: Vec<f64>) -> Self {
        self.gammas = gammas;
        self
    }

    pub fn with_resolutions(mut self, resolutions: Vec<usize>) -> Self {
        self.resolutions = resolutions;
        self
    }

    /// Sets quadtree leaf capacity and maximum depth.
    pub fn with_quadtree(mut self, capacity: usize, max_depth: usize) -> Self {
        self.quadtree = (capacity, max_depth);
        self
    }

    pub fn with_pool_fractions(mut self, pool_fractions: Vec<f64>) -> Self {
        self.pool_fractions = pool_fractions;
        self
    }

    pub fn with_grid_prefilter(mut self, grid_prefilter: bool) -> Self {
        self.grid_prefilter = grid_prefilter;
        self
    }

    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Sets the compared strategies. The baseline always runs regardless.
    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn combos(&self) -> &[(usize, usize)] {
        &self.combos
    }

    pub fn gammas(&self) -> &[f64] {
        &self.gammas
    }

    pub fn resolutions(&self) -> &[usize] {
        &self.resolutions
    }

    pub fn quadtree(&self) -> (usize, usize) {
        self.quadtree
    }

    pub fn pool_fractions(&self) -> &[f64] {
        &self.pool_fractions
    }

    pub fn grid_prefilter(&self) -> bool {
        self.grid_prefilter
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), CompareError> {
        let invalid = |reason: String| Err(CompareError::InvalidConfig { reason });

        if self.combos.is_empty() {
            return invalid("at least one (K, k) combo is required".to_string());
        }
        if let Some(&(big_k, k)) = self.combos.iter().find(|(big_k, k)| *k == 0 || *big_k == 0) {
            return invalid(format!("combo ({big_k}, {k}) must have K >= 1 and k >= 1"));
        }
        if self.gammas.is_empty() {
            return invalid("at least one gamma is required".to_string());
        }
        if let Some(g) = self.gammas.iter().find(|g| !g.is_finite() || **g <= 0.0) {
            return invalid(format!("gamma must be finite and positive, got {g}"));
        }
        if self.resolutions.contains(&0) {
            return invalid("grid resolutions must be >= 1".to_string());
        }
        let needs_grid = self.strategies.iter().any(Strategy::uses_grid)
            || (self.grid_prefilter && self.strategies.contains(&Strategy::Hybrid));
        if needs_grid && self.resolutions.is_empty() {
            return invalid("grid strategies need at least one resolution".to_string());
        }
        if self.quadtree.0 == 0 {
            return invalid("quadtree capacity must be >= 1".to_string());
        }
        if let Some(f) = self
            .pool_fractions
            .iter()
            .find(|f| !f.is_finite() || **f <= 0.0 || **f > 1.0)
        {
            return invalid(format!("pool fraction must be in (0, 1], got {f}"));
        }
        if self.strategies.contains(&Strategy::Hybrid) && self.pool_fractions.is_empty() {
            return invalid("hybrid strategy needs at least one pool fraction".to_string());
        }
        self.kernel.validate()?;
        Ok(())
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self::new()
    }
}
