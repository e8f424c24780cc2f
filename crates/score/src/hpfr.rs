//! Pairwise (HPF) and aggregate (HPFR) objectives.

use hpfr_proximity::{PairProximity, Point};

use crate::error::ScoreError;
use crate::incremental::IncrementalScore;
use crate::objective::{Objective, SplitObjective};

/// Pairwise contribution of points `i` and `j` in a subset of size `k`.
///
/// ```text
/// HPF = ((W·k − k)·(w_i − w_j) + sums[i] + sums[j]) / (k − 1) − 2·W·proximity(i, j)
/// ```
///
/// Used for single-pair diagnostics; aggregate scoring goes through [`hpfr`].
///
/// # Errors
///
/// Returns [`ScoreError::InvalidBudget`] if `k < 2` and
/// [`ScoreError::IndexOutOfRange`] if either index misses `points` or `sums`.
pub fn hpf<P>(
    points: &[Point],
    i: usize,
    j: usize,
    w: f64,
    sums: &[f64],
    pairs: &P,
    k: usize,
) -> Result<f64, ScoreError>
where
    P: PairProximity + ?Sized,
{
    if k < 2 {
        return Err(ScoreError::InvalidBudget { k });
    }
    let len = points.len().min(sums.len());
    for index in [i, j] {
        if index >= len {
            return Err(ScoreError::IndexOutOfRange { index, len });
        }
    }

    let kf = k as f64;
    let scaled = w * kf;
    let weight_term = (scaled - kf) * (points[i].weight() - points[j].weight());
    Ok((weight_term + sums[i] + sums[j]) / (kf - 1.0) - 2.0 * w * pairs.proximity(i, j))
}

/// Aggregate objective of subset `subset` (indices into `points`).
///
/// ```text
/// score = Σ w_i / 2k + Σ (sums[i] − W·intra[i]) / (2k(K − W))
/// ```
///
/// where `k = |subset|`, `K = set_size` and `intra[i]` is the proximity of
/// `i` to the other subset members. `sums` are the full-set proximity sums.
///
/// # Errors
///
/// Returns [`ScoreError::InvalidBudget`] if `k < 2`,
/// [`ScoreError::DegenerateWeight`] if `W == K`, and index errors for
/// out-of-range or repeated subset entries.
pub fn hpfr<P>(
    points: &[Point],
    subset: &[usize],
    sums: &[f64],
    pairs: &P,
    w: f64,
    set_size: usize,
) -> Result<Objective, ScoreError>
where
    P: PairProximity + ?Sized,
{
    Ok(hpfr_split(points, subset, sums, pairs, w, set_size)?.to_objective())
}

/// Like [`hpfr`] but returns the relevance and proximity terms unnormalised.
///
/// # Errors
///
/// Same as [`hpfr`].
pub fn hpfr_split<P>(
    points: &[Point],
    subset: &[usize],
    sums: &[f64],
    pairs: &P,
    w: f64,
    set_size: usize,
) -> Result<SplitObjective, ScoreError>
where
    P: PairProximity + ?Sized,
{
    if subset.len() < 2 {
        return Err(ScoreError::InvalidBudget { k: subset.len() });
    }
    let mut acc = IncrementalScore::new(points, sums, pairs, w, set_size)?;
    for &i in subset {
        acc.push(i)?;
    }
    acc.split()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hpfr_proximity::{Kernel, ProximityTable, SparsePairs, TableMode};

    fn triangle() -> (Vec<Point>, ProximityTable) {
        let pts = vec![
            Point::new(0, 0.0, 0.0, 2.0),
            Point::new(1, 1.0, 0.0, 1.0),
            Point::new(2, 3.0, 0.0, 0.5),
        ];
        let t = ProximityTable::build(&pts, Kernel::InverseDistance, TableMode::Full).unwrap();
        (pts, t)
    }

    #[test]
    fn test_hpf_by_hand() {
        let (pts, t) = triangle();
        // sums: s0 = 1/2 + 1/4, s1 = 1/2 + 1/3
        let s0 = 0.5 + 0.25;
        let s1 = 0.5 + 1.0 / 3.0;
        let (w, k) = (1.5, 2usize);
        let expected = ((w * 2.0 - 2.0) * (2.0 - 1.0) + s0 + s1) / 1.0 - 2.0 * w * 0.5;
        let got = hpf(&pts, 0, 1, w, t.sums(), &t.lookup(&pts), k).unwrap();
        assert_abs_diff_eq!(got, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_hpf_errors() {
        let (pts, t) = triangle();
        assert!(matches!(
            hpf(&pts, 0, 1, 1.0, t.sums(), &t.lookup(&pts), 1),
            Err(ScoreError::InvalidBudget { k: 1 })
        ));
        assert!(matches!(
            hpf(&pts, 0, 3, 1.0, t.sums(), &t.lookup(&pts), 2),
            Err(ScoreError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_hpfr_by_hand() {
        let (pts, t) = triangle();
        let s0 = 0.75;
        let s2 = 0.25 + 1.0 / 3.0;
        let (w, set_size) = (1.0, 3usize);
        // k = 2, intra = p(0,2) = 1/4 for both members
        let relevance = (2.0 + 0.5) / 4.0;
        let prox = (s0 + s2 - 2.0 * w * 0.25) / (4.0 * (3.0 - w));
        let o = hpfr(&pts, &[0, 2], t.sums(), &t.lookup(&pts), w, set_size).unwrap();
        assert_abs_diff_eq!(o.score(), relevance + prox, epsilon = 1e-12);
        assert_abs_diff_eq!(o.sum_baseline(), s0 + s2, epsilon = 1e-12);
        assert_abs_diff_eq!(o.sum_penalty(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_split_matches_aggregate() {
        let (pts, t) = triangle();
        let o = hpfr(&pts, &[2, 0, 1], t.sums(), &t.lookup(&pts), 0.5, 3).unwrap();
        let s = hpfr_split(&pts, &[2, 0, 1], t.sums(), &t.lookup(&pts), 0.5, 3).unwrap();
        assert_abs_diff_eq!(s.relevance(), 3.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.combined(), o.score(), epsilon = 1e-12);
        assert_eq!(s.sum_baseline(), o.sum_baseline());
        assert_eq!(s.sum_penalty(), o.sum_penalty());
    }

    #[test]
    fn test_order_independent() {
        let (pts, t) = triangle();
        let a = hpfr(&pts, &[0, 1, 2], t.sums(), &t.lookup(&pts), 0.5, 3).unwrap();
        let b = hpfr(&pts, &[2, 1, 0], t.sums(), &t.lookup(&pts), 0.5, 3).unwrap();
        assert_abs_diff_eq!(a.score(), b.score(), epsilon = 1e-12);
    }

    #[test]
    fn test_missing_pairs_count_as_zero() {
        let (pts, t) = triangle();
        let empty = SparsePairs::new();
        let o = hpfr(&pts, &[0, 1], t.sums(), &empty, 1.0, 3).unwrap();
        assert_eq!(o.sum_penalty(), 0.0);
    }

    #[test]
    fn test_hpfr_errors() {
        let (pts, t) = triangle();
        assert!(matches!(
            hpfr(&pts, &[0], t.sums(), &t.lookup(&pts), 1.0, 3),
            Err(ScoreError::InvalidBudget { k: 1 })
        ));
        assert!(matches!(
            hpfr(&pts, &[], t.sums(), &t.lookup(&pts), 1.0, 3),
            Err(ScoreError::InvalidBudget { k: 0 })
        ));
        assert!(matches!(
            hpfr(&pts, &[0, 1], t.sums(), &t.lookup(&pts), 3.0, 3),
            Err(ScoreError::DegenerateWeight { .. })
        ));
        assert!(matches!(
            hpfr(&pts, &[0, 0], t.sums(), &t.lookup(&pts), 1.0, 3),
            Err(ScoreError::DuplicateIndex { index: 0 })
        ));
        assert!(matches!(
            hpfr(&pts, &[0, 4], t.sums(), &t.lookup(&pts), 1.0, 3),
            Err(ScoreError::IndexOutOfRange { index: 4, len: 3 })
        ));
    }
}
