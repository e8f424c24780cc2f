//! JSON point file reader.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use hpfr_proximity::{Point, validate_points};

/// One entry of a point file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PointRecord {
    id: u64,
    x: f64,
    y: f64,
    #[serde(default = "default_weight")]
    weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Reads a JSON array of `{"id", "x", "y", "weight"}` records.
///
/// `weight` defaults to 1.0. The file must hold at least one point and every
/// point must pass [`validate_points`].
pub fn read_points(path: &Path) -> Result<Vec<Point>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read point file: {}", path.display()))?;
    let records: Vec<PointRecord> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse point file: {}", path.display()))?;
    if records.is_empty() {
        bail!("point file {} contains no points", path.display());
    }
    let points: Vec<Point> = records
        .into_iter()
        .map(|r| Point::new(r.id, r.x, r.y, r.weight))
        .collect();
    validate_points(&points)
        .with_context(|| format!("invalid points in {}", path.display()))?;
    Ok(points)
}
