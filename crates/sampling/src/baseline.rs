//! Exact reference sampler.

use std::time::Instant;

use hpfr_proximity::{Point, ProximityTable};
use rand::Rng;
use tracing::debug;

use crate::config::{SamplerConfig, Strategy};
use crate::draw::{ensure_points, finish};
use crate::error::SamplingError;
use crate::result::Selection;

/// Draws `min(k, |S|)` points uniformly by reservoir sampling (Algorithm R)
/// and scores them against the full table.
///
/// Preparation time is the table's own build time.
///
/// # Errors
///
/// [`SamplingError::EmptyInputSet`] for no points,
/// [`SamplingError::EmptySelection`] for `k == 0`, scoring errors otherwise.
#[tracing::instrument(skip_all, fields(n = points.len(), k = config.k()))]
pub fn baseline(
    points: &[Point],
    table: &ProximityTable,
    config: &SamplerConfig,
    rng: &mut impl Rng,
) -> Result<Selection, SamplingError> {
    config.validate()?;
    ensure_points(points)?;

    let start = Instant::now();
    let indices = reservoir(points.len(), config.k(), rng);
    let select_time = start.elapsed();
    debug!(selected = indices.len(), ?select_time, "reservoir filled");

    finish(
        Strategy::Baseline,
        points,
        table,
        config.w(),
        indices,
        table.build_time(),
        select_time,
    )
}

/// Algorithm R over `0..n`.
fn reservoir(n: usize, k: usize, rng: &mut impl Rng) -> Vec<usize> {
    let k = k.min(n);
    let mut kept: Vec<usize> = (0..k).collect();
    if k == 0 {
        return kept;
    }
    for i in k..n {
        let j = rng.random_range(0..=i);
        if j < k {
            kept[j] = i;
        }
    }
    kept
}
