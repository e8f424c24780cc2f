//! Uniform-grid samplers.

use std::time::Instant;

use hpfr_partition::UniformGrid;
use hpfr_proximity::{Point, ProximityTable};
use rand::Rng;
use tracing::debug;

use crate::config::{SamplerConfig, Strategy};
use crate::draw::{Unit, allocate_units, draw_units, ensure_points, finish};
use crate::error::SamplingError;
use crate::result::{CellKey, Selection};

/// Grid sampler with quotas proportional to cell population.
///
/// # Errors
///
/// [`SamplingError::EmptyInputSet`], partition errors, and
/// [`SamplingError::EmptySelection`] for `k == 0`.
#[tracing::instrument(skip_all, fields(n = points.len(), k = config.k(), g = config.resolution()))]
pub fn grid_standard(
    points: &[Point],
    table: &ProximityTable,
    config: &SamplerConfig,
    rng: &mut impl Rng,
) -> Result<Selection, SamplingError> {
    grid_sample(Strategy::GridStandard, points, table, config, rng)
}

/// Grid sampler with quotas proportional to `population × Σ weight`.
///
/// A cell whose weights sum to zero or less scores 0 and gets no quota unless
/// capacity elsewhere runs out. When no cell has positive weight, quotas fall
/// back to population as in [`grid_standard`].
///
/// # Errors
///
/// As [`grid_standard`].
#[tracing::instrument(skip_all, fields(n = points.len(), k = config.k(), g = config.resolution()))]
pub fn grid_weighted(
    points: &[Point],
    table: &ProximityTable,
    config: &SamplerConfig,
    rng: &mut impl Rng,
) -> Result<Selection, SamplingError> {
    grid_sample(Strategy::GridWeighted, points, table, config, rng)
}

fn grid_sample(
    strategy: Strategy,
    points: &[Point],
    table: &ProximityTable,
    config: &SamplerConfig,
    rng: &mut impl Rng,
) -> Result<Selection, SamplingError> {
    config.validate()?;
    ensure_points(points)?;

    let start = Instant::now();
    let grid = UniformGrid::build(points, config.resolution())?;
    let mut units: Vec<Unit<'_>> = grid
        .cells()
        .iter()
        .map(|c| {
            let population = c.len() as f64;
            Unit {
                key: CellKey::Grid(c.id()),
                members: c.members(),
                score: match strategy {
                    Strategy::GridWeighted => (population * c.weight_sum()).max(0.0),
                    _ => population,
                },
            }
        })
        .collect();
    if strategy == Strategy::GridWeighted && units.iter().all(|u| u.score == 0.0) {
        debug!("no cell has positive weight; allocating by population");
        for unit in &mut units {
            unit.score = unit.members.len() as f64;
        }
    }
    let prep_time = start.elapsed();

    let start = Instant::now();
    let allocation = allocate_units(&units, config.k())?;
    let (indices, stats) = draw_units(&units, &allocation, rng);
    let select_time = start.elapsed();
    debug!(
        %strategy,
        n_cells = units.len(),
        selected = indices.len(),
        "grid draw done"
    );

    Ok(finish(
        strategy,
        points,
        table,
        config.w(),
        indices,
        prep_time,
        select_time,
    )?
    .with_cell_stats(stats))
}
