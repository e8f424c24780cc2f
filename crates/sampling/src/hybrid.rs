//! Two-phase sampler: shrink S to a pool, then run an inner strategy on it.

use std::collections::HashMap;
use std::time::Instant;

use hpfr_partition::UniformGrid;
use hpfr_proximity::{PairProximity, Point, ProximityTable};
use hpfr_score::ScoreError;
use rand::Rng;
use tracing::debug;

use crate::config::{Prefilter, SamplerConfig, Strategy};
use crate::draw::{Unit, allocate_units, draw_units, ensure_points, uniform_draw};
use crate::error::SamplingError;
use crate::result::{CellKey, HybridInfo, Selection};
use crate::select::select;

/// Pre-filters S down to K' points, builds a proximity table over the pool
/// (O(K'²)) and runs the configured inner strategy there with
/// `W' = W·K'/K`, which keeps `K/W` unchanged.
///
/// Returned indices point into `points`. The objective and any cell
/// statistics are those of the inner run, i.e. relative to the pool; rescore
/// against `table` to compare with other strategies on S.
///
/// # Errors
///
/// [`SamplingError::InvalidConfig`] when `config` has no hybrid settings,
/// [`SamplingError::InvalidPoolSize`] when `K' > |S|`, and whatever the
/// inner strategy returns.
#[tracing::instrument(skip_all, fields(n = points.len(), k = config.k()))]
pub fn hybrid(
    points: &[Point],
    table: &ProximityTable,
    config: &SamplerConfig,
    rng: &mut impl Rng,
) -> Result<Selection, SamplingError> {
    config.validate()?;
    ensure_points(points)?;
    let settings = config.hybrid().ok_or_else(|| SamplingError::InvalidConfig {
        reason: "hybrid strategy requires hybrid settings".to_string(),
    })?;
    let n = points.len();
    if table.len() != n {
        return Err(ScoreError::LengthMismatch {
            sums: table.len(),
            points: n,
        }
        .into());
    }
    let pool_size = settings.pool_size();
    if pool_size > n {
        return Err(SamplingError::InvalidPoolSize {
            pool_size,
            set_size: n,
        });
    }

    let start = Instant::now();
    let mut pool = match settings.prefilter() {
        Prefilter::Random => uniform_draw(n, pool_size, rng),
        Prefilter::Grid { resolution } => grid_prefilter(points, resolution, pool_size, rng)?,
    };
    pool.sort_unstable();
    let pool_points: Vec<Point> = pool.iter().map(|&i| points[i]).collect();
    let pool_table = pool_table(points, table, &pool, &pool_points)?;
    let prefilter_time = start.elapsed();

    let effective_weight = config.w() * pool_size as f64 / n as f64;
    let inner_config = SamplerConfig::new(config.k(), effective_weight)
        .with_resolution(config.resolution())
        .with_quadtree(config.quadtree_capacity(), config.quadtree_max_depth());
    let inner = select(
        settings.inner(),
        &pool_points,
        &pool_table,
        &inner_config,
        rng,
    )?;
    debug!(
        pool_size,
        effective_weight,
        inner = %settings.inner(),
        ?prefilter_time,
        "hybrid inner run done"
    );

    let indices = inner.indices().iter().map(|&i| pool[i]).collect();
    Ok(Selection::new(
        Strategy::Hybrid,
        indices,
        inner.objective(),
        prefilter_time + inner.prep_time(),
        inner.select_time(),
    )
    .with_cell_stats(inner.cell_stats().to_vec())
    .with_hybrid(HybridInfo::new(pool_size, effective_weight, prefilter_time)))
}

/// Pool drawn per grid cell in proportion to cell population.
fn grid_prefilter(
    points: &[Point],
    resolution: usize,
    pool_size: usize,
    rng: &mut impl Rng,
) -> Result<Vec<usize>, SamplingError> {
    let grid = UniformGrid::build(points, resolution)?;
    let units: Vec<Unit<'_>> = grid
        .cells()
        .iter()
        .map(|c| Unit {
            key: CellKey::Grid(c.id()),
            members: c.members(),
            score: c.len() as f64,
        })
        .collect();
    let allocation = allocate_units(&units, pool_size)?;
    let (pool, _) = draw_units(&units, &allocation, rng);
    Ok(pool)
}

/// Proximity table over the pool.
///
/// Rebuilt from the kernel when the full table has one; otherwise the pool
/// pairs are read out of the full table.
fn pool_table(
    points: &[Point],
    table: &ProximityTable,
    pool: &[usize],
    pool_points: &[Point],
) -> Result<ProximityTable, SamplingError> {
    if let Some(kernel) = table.kernel() {
        return Ok(ProximityTable::build(pool_points, kernel, table.mode())?);
    }
    let lookup = table.lookup(points);
    let origin: HashMap<u64, usize> = pool.iter().map(|&i| (points[i].id(), i)).collect();
    Ok(ProximityTable::from_fn(pool_points, |a, b| {
        match (origin.get(&a.id()), origin.get(&b.id())) {
            (Some(&i), Some(&j)) => lookup.proximity(i, j),
            _ => 0.0,
        }
    })?)
}
