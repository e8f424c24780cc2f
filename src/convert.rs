//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use hpfr_compare::ComparisonConfig;
use hpfr_proximity::{Kernel, TableMode};
use hpfr_sampling::{HybridConfig, Prefilter, SamplerConfig, Strategy};
use hpfr_synth::{Shape, ShapeConfig};

use crate::config::*;

/// Parses a kernel name into the corresponding enum variant.
///
/// `gaussian` requires a bandwidth.
pub fn parse_kernel(name: &str, bandwidth: Option<f64>) -> Result<Kernel> {
    let kernel = match name.to_lowercase().as_str() {
        "inverse-distance" | "inverse_distance" => Kernel::InverseDistance,
        "inverse-square" | "inverse_square" => Kernel::InverseSquare,
        "gaussian" => match bandwidth {
            Some(bandwidth) => Kernel::Gaussian { bandwidth },
            None => bail!("gaussian kernel requires [proximity].bandwidth"),
        },
        other => bail!("unknown kernel: {other:?}"),
    };
    kernel.validate()?;
    Ok(kernel)
}

/// Parses a proximity table mode.
pub fn parse_table_mode(s: &str) -> Result<TableMode> {
    match s.to_lowercase().as_str() {
        "full" => Ok(TableMode::Full),
        "sums-only" | "sums_only" => Ok(TableMode::SumsOnly),
        other => bail!("unknown table mode: {other:?}"),
    }
}

/// Parses a strategy name.
pub fn parse_strategy(s: &str) -> Result<Strategy> {
    s.parse::<Strategy>()
        .with_context(|| format!("invalid strategy {s:?}"))
}

/// Parses a pre-filter name, using `resolution` for the grid variant.
pub fn parse_prefilter(s: &str, resolution: usize) -> Result<Prefilter> {
    match s.to_lowercase().as_str() {
        "random" => Ok(Prefilter::Random),
        "grid" => Ok(Prefilter::Grid { resolution }),
        other => bail!("unknown pre-filter: {other:?}"),
    }
}

/// Diversity weight for a `select` run on `set_size` points.
pub fn selection_weight(selection: &SelectionToml, set_size: usize, k: usize) -> Result<f64> {
    if let Some(w) = selection.w {
        return Ok(w);
    }
    if k == 0 {
        bail!("k must be >= 1");
    }
    if !selection.gamma.is_finite() || selection.gamma <= 0.0 {
        bail!("[selection].gamma must be finite and positive, got {}", selection.gamma);
    }
    Ok(set_size as f64 / (selection.gamma * k as f64))
}

/// Builds a [`HybridConfig`] for a set of `set_size` points.
pub fn build_hybrid_config(cfg: &HpfrConfig, set_size: usize) -> Result<HybridConfig> {
    let hybrid = &cfg.hybrid;
    if !hybrid.pool_fraction.is_finite() || hybrid.pool_fraction <= 0.0 || hybrid.pool_fraction > 1.0
    {
        bail!(
            "[hybrid].pool_fraction must be in (0, 1], got {}",
            hybrid.pool_fraction
        );
    }
    let pool_size = ((set_size as f64 * hybrid.pool_fraction).floor() as usize).max(1);
    let resolution = hybrid.prefilter_resolution.unwrap_or(cfg.grid.resolution);
    Ok(HybridConfig::new(pool_size)
        .with_prefilter(parse_prefilter(&hybrid.prefilter, resolution)?)
        .with_inner(parse_strategy(&hybrid.inner)?))
}

/// Builds a [`SamplerConfig`] for a `select` run.
pub fn build_sampler_config(cfg: &HpfrConfig, set_size: usize, k: usize) -> Result<SamplerConfig> {
    let w = selection_weight(&cfg.selection, set_size, k)?;
    let sampler = SamplerConfig::new(k, w)
        .with_resolution(cfg.grid.resolution)
        .with_quadtree(cfg.quadtree.capacity, cfg.quadtree.max_depth)
        .with_hybrid(build_hybrid_config(cfg, set_size)?);
    sampler.validate()?;
    Ok(sampler)
}

/// Builds a [`ComparisonConfig`] from the experiment section.
pub fn build_comparison_config(cfg: &HpfrConfig) -> Result<ComparisonConfig> {
    let exp = &cfg.experiment;
    let mut comparison = ComparisonConfig::new()
        .with_combos(exp.combos.iter().map(|&[big_k, k]| (big_k, k)).collect())
        .with_gammas(exp.gammas.clone())
        .with_resolutions(exp.grid_resolutions.clone())
        .with_quadtree(cfg.quadtree.capacity, cfg.quadtree.max_depth)
        .with_pool_fractions(exp.pool_fractions.clone())
        .with_grid_prefilter(exp.grid_prefilter)
        .with_kernel(parse_kernel(&cfg.proximity.kernel, cfg.proximity.bandwidth)?);
    if let Some(names) = &exp.strategies {
        let strategies = names
            .iter()
            .map(|s| parse_strategy(s))
            .collect::<Result<Vec<_>>>()?;
        comparison = comparison.with_strategies(strategies);
    }
    comparison.validate()?;
    Ok(comparison)
}

/// Parses the experiment dataset names into shapes.
pub fn parse_shapes(names: &[String]) -> Result<Vec<Shape>> {
    names
        .iter()
        .map(|n| n.parse::<Shape>().with_context(|| format!("invalid dataset {n:?}")))
        .collect()
}

/// Builds a [`ShapeConfig`] from the experiment section.
pub fn build_shape_config(exp: &ExperimentToml) -> Result<ShapeConfig> {
    let shape = ShapeConfig::new().with_noise(exp.shape_noise);
    shape.validate()?;
    Ok(shape)
}
