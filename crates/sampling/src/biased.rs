//! Preparation-free random sampler.

use std::time::{Duration, Instant};

use hpfr_proximity::{Point, ProximityTable};
use rand::Rng;

use crate::config::{SamplerConfig, Strategy};
use crate::draw::{ensure_points, finish, uniform_draw};
use crate::error::SamplingError;
use crate::result::Selection;

/// Draws `min(k, |S|)` points uniformly without replacement.
///
/// Reports zero preparation time: the table passed in is only used to
/// score the result.
///
/// # Errors
///
/// [`SamplingError::EmptyInputSet`] for no points,
/// [`SamplingError::EmptySelection`] for `k == 0`, scoring errors otherwise.
#[tracing::instrument(skip_all, fields(n = points.len(), k = config.k()))]
pub fn biased(
    points: &[Point],
    table: &ProximityTable,
    config: &SamplerConfig,
    rng: &mut impl Rng,
) -> Result<Selection, SamplingError> {
    config.validate()?;
    ensure_points(points)?;

    let start = Instant::now();
    let indices = uniform_draw(points.len(), config.k(), rng);
    let select_time = start.elapsed();

    finish(
        Strategy::Biased,
        points,
        table,
        config.w(),
        indices,
        Duration::ZERO,
        select_time,
    )
}
