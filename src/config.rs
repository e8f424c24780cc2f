use std::path::PathBuf;

use serde::Deserialize;

/// Top-level HPFR configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HpfrConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Proximity kernel and table settings.
    #[serde(default)]
    pub proximity: ProximityToml,

    /// Selection settings for the `select` command.
    #[serde(default)]
    pub selection: SelectionToml,

    /// Uniform grid settings.
    #[serde(default)]
    pub grid: GridToml,

    /// Quadtree settings.
    #[serde(default)]
    pub quadtree: QuadtreeToml,

    /// Hybrid sampler settings.
    #[serde(default)]
    pub hybrid: HybridToml,

    /// Comparison sweep settings.
    #[serde(default)]
    pub experiment: ExperimentToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    /// JSON point file (`[{"id", "x", "y", "weight"}]`).
    pub points: Option<PathBuf>,
    /// Report output path.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProximityToml {
    #[serde(default = "default_kernel")]
    pub kernel: String,
    #[serde(default)]
    pub bandwidth: Option<f64>,
    #[serde(default = "default_table_mode")]
    pub mode: String,
}

impl Default for ProximityToml {
    fn default() -> Self {
        Self {
            kernel: default_kernel(),
            bandwidth: None,
            mode: default_table_mode(),
        }
    }
}

fn default_kernel() -> String {
    "inverse-distance".to_string()
}
fn default_table_mode() -> String {
    "full".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionToml {
    /// Fixed diversity weight; derived from `gamma` when unset.
    #[serde(default)]
    pub w: Option<f64>,
    /// `W = |S| / (gamma · k)`.
    #[serde(default = "default_gamma")]
    pub gamma: f64,
}

impl Default for SelectionToml {
    fn default() -> Self {
        Self {
            w: None,
            gamma: default_gamma(),
        }
    }
}

fn default_gamma() -> f64 {
    4.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridToml {
    #[serde(default = "default_resolution")]
    pub resolution: usize,
}

impl Default for GridToml {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
        }
    }
}

fn default_resolution() -> usize {
    16
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuadtreeToml {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for QuadtreeToml {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_capacity() -> usize {
    30
}
fn default_max_depth() -> usize {
    6
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HybridToml {
    /// K' as a fraction of |S|.
    #[serde(default = "default_pool_fraction")]
    pub pool_fraction: f64,
    /// `random` or `grid`.
    #[serde(default = "default_prefilter")]
    pub prefilter: String,
    /// Pre-filter grid resolution; falls back to `[grid].resolution`.
    #[serde(default)]
    pub prefilter_resolution: Option<usize>,
    /// Strategy run on the pool.
    #[serde(default = "default_inner")]
    pub inner: String,
}

impl Default for HybridToml {
    fn default() -> Self {
        Self {
            pool_fraction: default_pool_fraction(),
            prefilter: default_prefilter(),
            prefilter_resolution: None,
            inner: default_inner(),
        }
    }
}

fn default_pool_fraction() -> f64 {
    0.2
}
fn default_prefilter() -> String {
    "random".to_string()
}
fn default_inner() -> String {
    "baseline".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentToml {
    /// `[K, k]` pairs.
    #[serde(default = "default_combos")]
    pub combos: Vec<[usize; 2]>,
    #[serde(default = "default_gammas")]
    pub gammas: Vec<f64>,
    #[serde(default = "default_grid_resolutions")]
    pub grid_resolutions: Vec<usize>,
    #[serde(default = "default_pool_fractions")]
    pub pool_fractions: Vec<f64>,
    #[serde(default = "default_true")]
    pub grid_prefilter: bool,
    /// Synthetic shapes used when `[io].points` is unset.
    #[serde(default = "default_datasets")]
    pub datasets: Vec<String>,
    /// Strategies compared against the baseline; all when unset.
    #[serde(default)]
    pub strategies: Option<Vec<String>>,
    /// Gaussian jitter of synthetic shapes.
    #[serde(default = "default_shape_noise")]
    pub shape_noise: f64,
}

impl Default for ExperimentToml {
    fn default() -> Self {
        Self {
            combos: default_combos(),
            gammas: default_gammas(),
            grid_resolutions: default_grid_resolutions(),
            pool_fractions: default_pool_fractions(),
            grid_prefilter: true,
            datasets: default_datasets(),
            strategies: None,
            shape_noise: default_shape_noise(),
        }
    }
}

fn default_combos() -> Vec<[usize; 2]> {
    vec![[1000, 10], [1000, 20], [1000, 50]]
}
fn default_gammas() -> Vec<f64> {
    vec![4.0]
}
fn default_grid_resolutions() -> Vec<usize> {
    vec![8, 16, 25]
}
fn default_pool_fractions() -> Vec<f64> {
    vec![0.2]
}
fn default_true() -> bool {
    true
}
fn default_datasets() -> Vec<String> {
    ["s_curve", "bubble", "flower", "disk", "snake"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_shape_noise() -> f64 {
    0.05
}
