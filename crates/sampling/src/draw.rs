//! Steps shared by the samplers: per-unit quota allocation, per-unit drawing
//! and final scoring.

use std::time::Duration;

use hpfr_partition::{Allocation, CellDemand, allocate};
use hpfr_proximity::{Point, ProximityTable};
use rand::Rng;
use rand::seq::index;

use crate::config::Strategy;
use crate::error::SamplingError;
use crate::result::{CellKey, CellStat, Selection};

/// One partition unit offered to the allocator.
pub(crate) struct Unit<'a> {
    pub key: CellKey,
    pub members: &'a [usize],
    pub score: f64,
}

pub(crate) fn ensure_points(points: &[Point]) -> Result<(), SamplingError> {
    if points.is_empty() {
        return Err(SamplingError::EmptyInputSet);
    }
    Ok(())
}

/// Quota per unit, capped at unit population.
pub(crate) fn allocate_units(units: &[Unit<'_>], k: usize) -> Result<Allocation<usize>, SamplingError> {
    let demands: Vec<CellDemand<usize>> = units
        .iter()
        .enumerate()
        .map(|(i, u)| CellDemand::new(i, u.score, u.members.len()))
        .collect();
    Ok(allocate(&demands, k)?)
}

/// Draws each unit's quota without replacement and concatenates in unit order.
pub(crate) fn draw_units(
    units: &[Unit<'_>],
    allocation: &Allocation<usize>,
    rng: &mut impl Rng,
) -> (Vec<usize>, Vec<CellStat>) {
    let mut picked = Vec::with_capacity(allocation.total());
    let mut stats = Vec::with_capacity(units.len());
    for (unit, &(_, quota)) in units.iter().zip(allocation.quotas()) {
        let take = quota.min(unit.members.len());
        picked.extend(
            index::sample(rng, unit.members.len(), take)
                .into_iter()
                .map(|j| unit.members[j]),
        );
        stats.push(CellStat::new(unit.key, unit.members.len(), take));
    }
    (picked, stats)
}

/// Uniform draw of `min(k, n)` distinct indices out of `0..n`.
pub(crate) fn uniform_draw(n: usize, k: usize, rng: &mut impl Rng) -> Vec<usize> {
    index::sample(rng, n, k.min(n)).into_vec()
}

/// Scores `indices` against `table` and wraps them into a [`Selection`].
pub(crate) fn finish(
    strategy: Strategy,
    points: &[Point],
    table: &ProximityTable,
    w: f64,
    indices: Vec<usize>,
    prep_time: Duration,
    select_time: Duration,
) -> Result<Selection, SamplingError> {
    if indices.is_empty() {
        return Err(SamplingError::EmptySelection);
    }
    let lookup = table.lookup(points);
    let objective = hpfr_score::hpfr(points, &indices, table.sums(), &lookup, w, points.len())?;
    Ok(Selection::new(
        strategy,
        indices,
        objective,
        prep_time,
        select_time,
    ))
}
