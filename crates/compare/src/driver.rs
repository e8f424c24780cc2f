//! The comparison loop.

use std::time::Duration;

use hpfr_proximity::{Point, ProximityTable, TableMode};
use hpfr_sampling::{HybridConfig, Prefilter, SamplerConfig, Selection, Strategy, select};
use hpfr_score::Objective;
use rand::Rng;
use tracing::{info, info_span, warn};

use crate::config::ComparisonConfig;
use crate::error::CompareError;
use crate::output::{ComparisonRow, pct_diff};

/// One sampler invocation planned for a dataset.
#[derive(Debug, Clone)]
struct Run {
    label: &'static str,
    strategy: Strategy,
    resolution: Option<usize>,
    hybrid: Option<HybridConfig>,
}

/// Runs the baseline and every configured strategy over every dataset.
///
/// For each `(K, k)` combo, gamma and dataset name, `loader(name, K, rng)`
/// produces S; the full proximity table is built once and shared by all
/// runs on that S. Hybrid results are rescored against the full table so
/// their rows compare with the rest.
///
/// A strategy that fails is logged and skipped. A dataset whose baseline
/// fails still reports the other strategies, without percentage columns.
///
/// # Errors
///
/// Returns [`CompareError::InvalidConfig`] for an invalid configuration and
/// whatever `loader` or table construction returns.
#[tracing::instrument(skip_all, fields(n_datasets = datasets.len()))]
pub fn run_comparison<R, L>(
    config: &ComparisonConfig,
    datasets: &[String],
    mut loader: L,
    rng: &mut R,
) -> Result<Vec<ComparisonRow>, CompareError>
where
    R: Rng,
    L: FnMut(&str, usize, &mut R) -> Result<Vec<Point>, CompareError>,
{
    config.validate()?;
    let mut rows = Vec::new();

    for &(set_size, k) in config.combos() {
        for &gamma in config.gammas() {
            let w = set_size as f64 / (gamma * k as f64);
            info!(set_size, k, gamma, w, "comparing strategies");

            for name in datasets {
                let _span = info_span!("dataset", name = %name).entered();
                let points = loader(name, set_size, &mut *rng)?;
                let table = ProximityTable::build(&points, config.kernel(), TableMode::Full)?;
                let base = SamplerConfig::new(k, w)
                    .with_quadtree(config.quadtree().0, config.quadtree().1);
                let ctx = RowContext {
                    dataset: name,
                    set_size: points.len(),
                    k,
                    gamma,
                    w,
                };

                let baseline = match select(Strategy::Baseline, &points, &table, &base, rng) {
                    Ok(sel) => {
                        let objective = sel.objective();
                        rows.push(ctx.row("baseline", &sel, objective, None, None));
                        Some(objective)
                    }
                    Err(e) => {
                        warn!(error = %e, "baseline failed; percentages unavailable");
                        None
                    }
                };

                for run in plan(config, points.len()) {
                    let mut cfg = base.clone();
                    if let Some(g) = run.resolution {
                        cfg = cfg.with_resolution(g);
                    }
                    if let Some(h) = run.hybrid.clone() {
                        cfg = cfg.with_hybrid(h);
                    }
                    let outcome = select(run.strategy, &points, &table, &cfg, rng).and_then(|sel| {
                        let objective = rescore(&points, &table, w, &sel)?;
                        Ok((sel, objective))
                    });
                    match outcome {
                        Ok((sel, objective)) => {
                            rows.push(ctx.row(run.label, &sel, objective, run.resolution, baseline));
                        }
                        Err(e) => warn!(strategy = run.label, error = %e, "strategy failed; skipped"),
                    }
                }
            }
        }
    }

    info!(n_rows = rows.len(), "comparison finished");
    Ok(rows)
}

/// Expands the strategy list into concrete runs for a set of `set_size` points.
fn plan(config: &ComparisonConfig, set_size: usize) -> Vec<Run> {
    let mut runs = Vec::new();
    for &strategy in config.strategies() {
        match strategy {
            Strategy::Baseline => {}
            Strategy::GridStandard | Strategy::GridWeighted => {
                runs.extend(config.resolutions().iter().map(|&g| Run {
                    label: strategy.name(),
                    strategy,
                    resolution: Some(g),
                    hybrid: None,
                }));
            }
            Strategy::Quadtree | Strategy::Biased => runs.push(Run {
                label: strategy.name(),
                strategy,
                resolution: None,
                hybrid: None,
            }),
            Strategy::Hybrid => {
                for &f in config.pool_fractions() {
                    let pool_size = ((set_size as f64 * f).floor() as usize).max(1);
                    runs.push(Run {
                        label: "hybrid",
                        strategy,
                        resolution: None,
                        hybrid: Some(HybridConfig::new(pool_size)),
                    });
                    if config.grid_prefilter() {
                        runs.extend(config.resolutions().iter().map(|&g| Run {
                            label: "hybrid-grid",
                            strategy,
                            resolution: Some(g),
                            hybrid: Some(
                                HybridConfig::new(pool_size)
                                    .with_prefilter(Prefilter::Grid { resolution: g }),
                            ),
                        }));
                    }
                }
            }
        }
    }
    runs
}

/// Objective of `sel` on the full set; hybrids report pool-relative values.
fn rescore(
    points: &[Point],
    table: &ProximityTable,
    w: f64,
    sel: &Selection,
) -> Result<Objective, hpfr_sampling::SamplingError> {
    if sel.hybrid().is_none() {
        return Ok(sel.objective());
    }
    let lookup = table.lookup(points);
    Ok(hpfr_score::hpfr(
        points,
        sel.indices(),
        table.sums(),
        &lookup,
        w,
        points.len(),
    )?)
}

struct RowContext<'a> {
    dataset: &'a str,
    set_size: usize,
    k: usize,
    gamma: f64,
    w: f64,
}

impl RowContext<'_> {
    fn row(
        &self,
        label: &str,
        sel: &Selection,
        objective: Objective,
        resolution: Option<usize>,
        baseline: Option<Objective>,
    ) -> ComparisonRow {
        ComparisonRow {
            dataset: self.dataset.to_string(),
            strategy: label.to_string(),
            set_size: self.set_size,
            k: self.k,
            gamma: self.gamma,
            w: self.w,
            resolution,
            pool_size: sel.hybrid().map(|h| h.pool_size()),
            effective_weight: sel.hybrid().map(|h| h.effective_weight()),
            score: objective.score(),
            sum_baseline: objective.sum_baseline(),
            sum_penalty: objective.sum_penalty(),
            prep_ms: millis(sel.prep_time()),
            select_ms: millis(sel.select_time()),
            total_ms: millis(sel.total_time()),
            score_pct_diff: baseline.and_then(|b| pct_diff(objective.score(), b.score())),
            sum_baseline_pct_diff: baseline
                .and_then(|b| pct_diff(objective.sum_baseline(), b.sum_baseline())),
        }
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
