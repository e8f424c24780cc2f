//! Point generation per shape.

use std::f64::consts::{PI, TAU};

use hpfr_proximity::Point;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::config::ShapeConfig;
use crate::error::SynthError;
use crate::shape::Shape;

/// Blob count for [`Shape::Bubble`].
const BUBBLES: usize = 5;

/// `n` points of `shape` with default settings.
///
/// Ids run `0..n`; weights are uniform in `[0, 1)`.
pub fn generate(shape: Shape, n: usize, rng: &mut impl Rng) -> Result<Vec<Point>, SynthError> {
    generate_with(shape, n, &ShapeConfig::default(), rng)
}

/// `n` points of `shape` using `config`.
///
/// # Errors
///
/// Returns [`SynthError::InvalidConfig`] if `config` fails validation.
pub fn generate_with(
    shape: Shape,
    n: usize,
    config: &ShapeConfig,
    rng: &mut impl Rng,
) -> Result<Vec<Point>, SynthError> {
    config.validate()?;
    let jitter = Normal::new(0.0, config.noise()).map_err(|e| SynthError::InvalidConfig {
        reason: e.to_string(),
    })?;

    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let (x, y) = match shape {
            Shape::SCurve => s_curve(rng),
            Shape::Bubble => bubble(i, rng),
            Shape::Flower => flower(rng),
            Shape::Disk => disk(rng),
            Shape::Snake => snake(rng),
        };
        let x = (x + jitter.sample(rng)) * config.scale();
        let y = (y + jitter.sample(rng)) * config.scale();
        let weight: f64 = rng.random();
        points.push(Point::new(i as u64, x, y, weight));
    }
    Ok(points)
}

fn s_curve(rng: &mut impl Rng) -> (f64, f64) {
    let t = rng.random_range(-1.5 * PI..1.5 * PI);
    (t.sin(), t.signum() * (t.cos() - 1.0))
}

/// Blobs of decreasing spread on a ring; point `i` goes to blob `i % BUBBLES`.
fn bubble(i: usize, rng: &mut impl Rng) -> (f64, f64) {
    let b = i % BUBBLES;
    let angle = TAU * b as f64 / BUBBLES as f64;
    let spread = 0.35 / (1.0 + b as f64);
    let (cx, cy) = (2.0 * angle.cos(), 2.0 * angle.sin());
    let dx: f64 = rand_distr::StandardNormal.sample(rng);
    let dy: f64 = rand_distr::StandardNormal.sample(rng);
    (cx + spread * dx, cy + spread * dy)
}

fn flower(rng: &mut impl Rng) -> (f64, f64) {
    let theta = rng.random_range(0.0..TAU);
    let r = (3.0 * theta).cos().abs() * rng.random::<f64>().sqrt();
    (r * theta.cos(), r * theta.sin())
}

fn disk(rng: &mut impl Rng) -> (f64, f64) {
    let theta = rng.random_range(0.0..TAU);
    let r = rng.random::<f64>().sqrt();
    (r * theta.cos(), r * theta.sin())
}

fn snake(rng: &mut impl Rng) -> (f64, f64) {
    let x = rng.random_range(0.0..2.0 * TAU);
    (x, x.sin())
}
