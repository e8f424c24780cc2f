//! Configuration for subset samplers.

use std::fmt;
use std::str::FromStr;

use crate::error::SamplingError;

/// Which sampler to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Uniform reservoir sample over S, scored against the full table.
    Baseline,
    /// Uniform grid, quota proportional to cell population.
    GridStandard,
    /// Uniform grid, quota proportional to population × weight sum.
    GridWeighted,
    /// Adaptive quadtree leaves, quota proportional to leaf population.
    Quadtree,
    /// Plain uniform draw with no preparation phase.
    Biased,
    /// Pre-filter to a pool of K' points, then run an inner strategy on it.
    Hybrid,
}

impl Strategy {
    /// Every strategy, in reporting order.
    pub const ALL: [Strategy; 6] = [
        Strategy::Baseline,
        Strategy::GridStandard,
        Strategy::GridWeighted,
        Strategy::Quadtree,
        Strategy::Biased,
        Strategy::Hybrid,
    ];

    /// Stable lowercase name, accepted back by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Baseline => "baseline",
            Strategy::GridStandard => "grid",
            Strategy::GridWeighted => "grid-weighted",
            Strategy::Quadtree => "quadtree",
            Strategy::Biased => "biased",
            Strategy::Hybrid => "hybrid",
        }
    }

    /// Whether the strategy draws per grid cell.
    pub fn uses_grid(&self) -> bool {
        matches!(self, Strategy::GridStandard | Strategy::GridWeighted)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Strategy::ALL
            .into_iter()
            .find(|st| st.name() == lower)
            .ok_or_else(|| SamplingError::UnknownStrategy {
                name: s.to_string(),
            })
    }
}

/// How the hybrid sampler shrinks S to its pool.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Prefilter {
    /// K' points uniformly at random.
    #[default]
    Random,
    /// K' points drawn per grid cell in proportion to cell population.
    Grid {
        /// Cells per axis.
        resolution: usize,
    },
}

/// Configuration for the hybrid sampler.
///
/// # Example
///
/// ```
/// use hpfr_sampling::{HybridConfig, Prefilter, Strategy};
///
/// let config = HybridConfig::new(200)
///     .with_prefilter(Prefilter::Grid { resolution: 8 })
///     .with_inner(Strategy::Baseline);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HybridConfig {
    /// Pool size K'.
    pool_size: usize,
    prefilter: Prefilter,
    /// Strategy run on the pool.
    inner: Strategy,
}

impl HybridConfig {
    /// Creates a configuration with pool size `pool_size`.
    ///
    /// Defaults: `prefilter = Random`, `inner = Baseline`.
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool_size,
            prefilter: Prefilter::Random,
            inner: Strategy::Baseline,
        }
    }

    /// Sets the pre-filter.
    pub fn with_prefilter(mut self, prefilter: Prefilter) -> Self {
        self.prefilter = prefilter;
        self
    }

    /// Sets the inner strategy.
    pub fn with_inner(mut self, inner: Strategy) -> Self {
        self.inner = inner;
        self
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn prefilter(&self) -> Prefilter {
        self.prefilter
    }

    pub fn inner(&self) -> Strategy {
        self.inner
    }

    /// Validates this configuration independently of |S|.
    pub fn validate(&self) -> Result<(), SamplingError> {
        if self.pool_size == 0 {
            return Err(SamplingError::InvalidPoolSize {
                pool_size: 0,
                set_size: 0,
            });
        }
        if self.inner == Strategy::Hybrid {
            return Err(SamplingError::InvalidConfig {
                reason: "hybrid inner strategy cannot itself be hybrid".to_string(),
            });
        }
        if let Prefilter::Grid { resolution: 0 } = self.prefilter {
            return Err(SamplingError::InvalidConfig {
                reason: "pre-filter grid resolution must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Parameters shared by every sampler.
///
/// # Example
///
/// ```
/// use hpfr_sampling::SamplerConfig;
///
/// let config = SamplerConfig::new(20, 12.5)
///     .with_resolution(16)
///     .with_quadtree(30, 6);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Budget k.
    k: usize,
    /// Diversity weight W.
    w: f64,
    /// Grid cells per axis (G).
    resolution: usize,
    /// Quadtree leaf capacity (m).
    quadtree_capacity: usize,
    /// Quadtree maximum depth (d).
    quadtree_max_depth: usize,
    hybrid: Option<HybridConfig>,
}

impl SamplerConfig {
    /// Creates a configuration for budget `k` and weight `w`.
    ///
    /// Defaults: `resolution = 16`, `quadtree = (30, 6)`, no hybrid settings.
    pub fn new(k: usize, w: f64) -> Self {
        Self {
            k,
            w,
            resolution: 16,
            quadtree_capacity: 30,
            quadtree_max_depth: 6,
            hybrid: None,
        }
    }

    /// Sets the budget.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Sets the diversity weight.
    pub fn with_w(mut self, w: f64) -> Self {
        self.w = w;
        self
    }

    /// Sets the grid resolution.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets quadtree leaf capacity and maximum depth.
    pub fn with_quadtree(mut self, capacity: usize, max_depth: usize) -> Self {
        self.quadtree_capacity = capacity;
        self.quadtree_max_depth = max_depth;
        self
    }

    /// Sets the hybrid settings.
    pub fn with_hybrid(mut self, hybrid: HybridConfig) -> Self {
        self.hybrid = Some(hybrid);
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn w(&self) -> f64 {
        self.w
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn quadtree_capacity(&self) -> usize {
        self.quadtree_capacity
    }

    pub fn quadtree_max_depth(&self) -> usize {
        self.quadtree_max_depth
    }

    pub fn hybrid(&self) -> Option<&HybridConfig> {
        self.hybrid.as_ref()
    }

    /// Validates this configuration.
    ///
    /// A zero budget is accepted here and surfaces as an empty selection.
    pub fn validate(&self) -> Result<(), SamplingError> {
        if !self.w.is_finite() || self.w < 0.0 {
            return Err(SamplingError::InvalidConfig {
                reason: format!("diversity weight must be finite and >= 0, got {}", self.w),
            });
        }
        if self.resolution == 0 {
            return Err(SamplingError::InvalidConfig {
                reason: "grid resolution must be >= 1".to_string(),
            });
        }
        if self.quadtree_capacity == 0 {
            return Err(SamplingError::InvalidConfig {
                reason: "quadtree capacity must be >= 1".to_string(),
            });
        }
        if let Some(h) = &self.hybrid {
            h.validate()?;
        }
        Ok(())
    }
}
