//! Quadtree-leaf sampler.

use std::time::Instant;

use hpfr_partition::QuadTree;
use hpfr_proximity::{Point, ProximityTable};
use rand::Rng;
use tracing::debug;

use crate::config::{SamplerConfig, Strategy};
use crate::draw::{Unit, allocate_units, draw_units, ensure_points, finish};
use crate::error::SamplingError;
use crate::result::{CellKey, Selection};

/// Builds a quadtree with capacity m and depth d from `config`, allocates
/// quotas by leaf population and draws within each non-empty leaf.
///
/// Dense regions end up in more, smaller leaves, so they are sampled with
/// finer spatial spread than under a uniform grid.
///
/// # Errors
///
/// [`SamplingError::EmptyInputSet`], partition errors, and
/// [`SamplingError::EmptySelection`] for `k == 0`.
#[tracing::instrument(
    skip_all,
    fields(n = points.len(), k = config.k(), m = config.quadtree_capacity(), d = config.quadtree_max_depth())
)]
pub fn quadtree(
    points: &[Point],
    table: &ProximityTable,
    config: &SamplerConfig,
    rng: &mut impl Rng,
) -> Result<Selection, SamplingError> {
    config.validate()?;
    ensure_points(points)?;

    let start = Instant::now();
    let tree = QuadTree::build(points, config.quadtree_capacity(), config.quadtree_max_depth())?;
    let units: Vec<Unit<'_>> = tree
        .leaves()
        .into_iter()
        .map(|id| (id, tree.node(id).members()))
        .filter(|(_, members)| !members.is_empty())
        .map(|(id, members)| Unit {
            key: CellKey::Leaf(id),
            members,
            score: members.len() as f64,
        })
        .collect();
    let prep_time = start.elapsed();

    let start = Instant::now();
    let allocation = allocate_units(&units, config.k())?;
    let (indices, stats) = draw_units(&units, &allocation, rng);
    let select_time = start.elapsed();
    debug!(
        n_leaves = units.len(),
        height = tree.height(),
        selected = indices.len(),
        "quadtree draw done"
    );

    Ok(finish(
        Strategy::Quadtree,
        points,
        table,
        config.w(),
        indices,
        prep_time,
        select_time,
    )?
    .with_cell_stats(stats))
}
