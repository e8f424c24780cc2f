//! Strategy dispatch.

use hpfr_proximity::{Point, ProximityTable};
use rand::Rng;

use crate::config::{SamplerConfig, Strategy};
use crate::error::SamplingError;
use crate::result::Selection;

/// Runs `strategy` on `points`.
///
/// `table` must have been built from `points`; every strategy scores its
/// subset against it (the hybrid builds its own pool table on top).
pub fn select(
    strategy: Strategy,
    points: &[Point],
    table: &ProximityTable,
    config: &SamplerConfig,
    rng: &mut impl Rng,
) -> Result<Selection, SamplingError> {
    match strategy {
        Strategy::Baseline => crate::baseline::baseline(points, table, config, rng),
        Strategy::GridStandard => crate::grid::grid_standard(points, table, config, rng),
        Strategy::GridWeighted => crate::grid::grid_weighted(points, table, config, rng),
        Strategy::Quadtree => crate::quadtree::quadtree(points, table, config, rng),
        Strategy::Biased => crate::biased::biased(points, table, config, rng),
        Strategy::Hybrid => crate::hybrid::hybrid(points, table, config, rng),
    }
}
