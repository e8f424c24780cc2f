//! Comparison rows, averaging across datasets, and JSON output.

use serde::Serialize;

use crate::error::CompareError;

/// One strategy run on one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub dataset: String,
    /// Strategy label, e.g. `grid` or `hybrid-grid`.
    pub strategy: String,
    /// |S|.
    pub set_size: usize,
    pub k: usize,
    pub gamma: f64,
    pub w: f64,
    /// Grid resolution, for grid strategies and grid-prefiltered hybrids.
    pub resolution: Option<usize>,
    /// K', for hybrids.
    pub pool_size: Option<usize>,
    /// W', for hybrids.
    pub effective_weight: Option<f64>,
    pub score: f64,
    pub sum_baseline: f64,
    pub sum_penalty: f64,
    pub prep_ms: f64,
    pub select_ms: f64,
    pub total_ms: f64,
    /// Score difference to the baseline, in percent.
    pub score_pct_diff: Option<f64>,
    /// Difference of `Σ sums[i]` to the baseline, in percent.
    pub sum_baseline_pct_diff: Option<f64>,
}

/// Mean of [`ComparisonRow`]s sharing strategy and parameters.
#[derive(Debug, Clone, Serialize)]
pub struct AveragedRow {
    pub strategy: String,
    pub set_size: usize,
    pub k: usize,
    pub gamma: f64,
    pub w: f64,
    pub resolution: Option<usize>,
    pub pool_size: Option<usize>,
    pub effective_weight: Option<f64>,
    /// Number of datasets averaged.
    pub datasets: usize,
    pub score: f64,
    pub sum_baseline: f64,
    pub sum_penalty: f64,
    pub prep_ms: f64,
    pub select_ms: f64,
    pub total_ms: f64,
    pub score_pct_diff: Option<f64>,
    pub sum_baseline_pct_diff: Option<f64>,
}

/// `100·(new − exact)/exact`, or `None` when `exact` is zero.
pub fn pct_diff(new: f64, exact: f64) -> Option<f64> {
    if exact == 0.0 {
        None
    } else {
        Some(100.0 * (new - exact) / exact)
    }
}

/// Groups rows by `(strategy, K, k, gamma, G, K')` and averages every
/// numeric field across datasets.
///
/// Optional fields average over the rows where they are present. Output is
/// sorted by `K`, `k`, gamma, `G`, `K'`, then strategy label.
pub fn average_rows(rows: &[ComparisonRow]) -> Vec<AveragedRow> {
    let mut groups: Vec<(AveragedRow, Accum)> = Vec::new();
    for row in rows {
        let found = groups.iter_mut().find(|(avg, _)| {
            avg.strategy == row.strategy
                && avg.set_size == row.set_size
                && avg.k == row.k
                && avg.gamma.to_bits() == row.gamma.to_bits()
                && avg.resolution == row.resolution
                && avg.pool_size == row.pool_size
        });
        match found {
            Some((_, acc)) => acc.add(row),
            None => {
                let mut acc = Accum::default();
                acc.add(row);
                groups.push((header(row), acc));
            }
        }
    }

    let mut out: Vec<AveragedRow> = groups
        .into_iter()
        .map(|(mut avg, acc)| {
            acc.fill(&mut avg);
            avg
        })
        .collect();
    out.sort_by(|a, b| {
        a.set_size
            .cmp(&b.set_size)
            .then(a.k.cmp(&b.k))
            .then(a.gamma.total_cmp(&b.gamma))
            .then(a.resolution.cmp(&b.resolution))
            .then(a.pool_size.cmp(&b.pool_size))
            .then(a.strategy.cmp(&b.strategy))
    });
    out
}

/// Serialize rows to a pretty JSON string.
pub fn to_json<T: Serialize + ?Sized>(rows: &T) -> Result<String, CompareError> {
    serde_json::to_string_pretty(rows).map_err(|e| CompareError::Serialization {
        reason: e.to_string(),
    })
}

fn header(row: &ComparisonRow) -> AveragedRow {
    AveragedRow {
        strategy: row.strategy.clone(),
        set_size: row.set_size,
        k: row.k,
        gamma: row.gamma,
        w: row.w,
        resolution: row.resolution,
        pool_size: row.pool_size,
        effective_weight: row.effective_weight,
        datasets: 0,
        score: 0.0,
        sum_baseline: 0.0,
        sum_penalty: 0.0,
        prep_ms: 0.0,
        select_ms: 0.0,
        total_ms: 0.0,
        score_pct_diff: None,
        sum_baseline_pct_diff: None,
    }
}

/// Running sums for one group.
#[derive(Default)]
struct Accum {
    n: usize,
    score: f64,
    sum_baseline: f64,
    sum_penalty: f64,
    prep_ms: f64,
    select_ms: f64,
    total_ms: f64,
    score_pct: Mean,
    sum_baseline_pct: Mean,
}

impl Accum {
    fn add(&mut self, row: &ComparisonRow) {
        self.n += 1;
        self.score += row.score;
        self.sum_baseline += row.sum_baseline;
        self.sum_penalty += row.sum_penalty;
        self.prep_ms += row.prep_ms;
        self.select_ms += row.select_ms;
        self.total_ms += row.total_ms;
        self.score_pct.add(row.score_pct_diff);
        self.sum_baseline_pct.add(row.sum_baseline_pct_diff);
    }

    fn fill(&self, avg: &mut AveragedRow) {
        let n = self.n as f64;
        avg.datasets = self.n;
        avg.score = self.score / n;
        avg.sum_baseline = self.sum_baseline / n;
        avg.sum_penalty = self.sum_penalty / n;
        avg.prep_ms = self.prep_ms / n;
        avg.select_ms = self.select_ms / n;
        avg.total_ms = self.total_ms / n;
        avg.score_pct_diff = self.score_pct.get();
        avg.sum_baseline_pct_diff = self.sum_baseline_pct.get();
    }
}

/// Mean over the `Some` values only.
#[derive(Default)]
struct Mean {
    sum: f64,
    n: usize,
}

impl Mean {
    fn add(&mut self, v: Option<f64>) {
        if let Some(v) = v {
            self.sum += v;
            self.n += 1;
        }
    }

    fn get(&self) -> Option<f64> {
        (self.n > 0).then(|| self.sum / self.n as f64)
    }
}
