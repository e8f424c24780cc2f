//! Four-point scenario: three points near the origin and one far outlier.

use approx::assert_abs_diff_eq;
use hpfr_proximity::{Kernel, Point, ProximityTable, TableMode};
use hpfr_score::{IncrementalScore, ScoreError, hpfr, hpfr_split};

fn scenario() -> (Vec<Point>, ProximityTable) {
    let pts = vec![
        Point::new(0, 0.0, 0.0, 1.0),
        Point::new(1, 1.0, 0.0, 1.0),
        Point::new(2, 0.0, 1.0, 1.0),
        Point::new(3, 10.0, 10.0, 1.0),
    ];
    let t = ProximityTable::build(&pts, Kernel::InverseDistance, TableMode::Full).unwrap();
    (pts, t)
}

/// `1 / (1 + d)` computed directly from coordinates.
fn prox(a: (f64, f64), b: (f64, f64)) -> f64 {
    1.0 / (1.0 + (a.0 - b.0).hypot(a.1 - b.1))
}

#[test]
fn all_pairs_match_hand_computation() {
    let (pts, t) = scenario();
    let coords = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (10.0, 10.0)];
    let sums: Vec<f64> = (0..4)
        .map(|i| {
            (0..4)
                .filter(|&j| j != i)
                .map(|j| prox(coords[i], coords[j]))
                .sum()
        })
        .collect();

    let (w, set_size, k) = (1.0, 4.0, 2.0);
    for i in 0..4 {
        for j in (i + 1)..4 {
            let p = prox(coords[i], coords[j]);
            let expected = 2.0 / (2.0 * k) + (sums[i] + sums[j] - 2.0 * w * p) / (2.0 * k * (set_size - w));
            let got = hpfr(&pts, &[i, j], t.sums(), &t.lookup(&pts), w, 4).unwrap();
            assert_abs_diff_eq!(got.score(), expected, epsilon = 1e-12);
            assert_abs_diff_eq!(got.sum_baseline(), sums[i] + sums[j], epsilon = 1e-12);
            assert_abs_diff_eq!(got.sum_penalty(), 2.0 * w * p, epsilon = 1e-12);
        }
    }
}

#[test]
fn spread_pair_beats_adjacent_pair() {
    let (pts, t) = scenario();
    // (1,0) and (0,1) are sqrt(2) apart; (0,0) and (1,0) are adjacent.
    let spread = hpfr(&pts, &[1, 2], t.sums(), &t.lookup(&pts), 1.0, 4).unwrap();
    let adjacent = hpfr(&pts, &[0, 1], t.sums(), &t.lookup(&pts), 1.0, 4).unwrap();
    assert!(
        spread.score() > adjacent.score(),
        "spread {} <= adjacent {}",
        spread.score(),
        adjacent.score()
    );
}

#[test]
fn exact_value_for_adjacent_pair() {
    let (pts, t) = scenario();
    let s0 = 0.5 + 0.5 + 1.0 / (1.0 + 200f64.sqrt());
    let s1 = 0.5 + 1.0 / (1.0 + 2f64.sqrt()) + 1.0 / (1.0 + 181f64.sqrt());
    let expected = 0.5 + (s0 + s1 - 1.0) / 12.0;
    let got = hpfr(&pts, &[0, 1], t.sums(), &t.lookup(&pts), 1.0, 4).unwrap();
    assert_abs_diff_eq!(got.score(), expected, epsilon = 1e-12);
}

#[test]
fn scoring_is_idempotent() {
    let (pts, t) = scenario();
    let a = hpfr(&pts, &[0, 3, 2], t.sums(), &t.lookup(&pts), 1.0, 4).unwrap();
    let b = hpfr(&pts, &[0, 3, 2], t.sums(), &t.lookup(&pts), 1.0, 4).unwrap();
    assert_eq!(a, b);
}

#[test]
fn incremental_matches_batch() {
    let (pts, t) = scenario();
    let pairs = t.lookup(&pts);
    let mut inc = IncrementalScore::new(&pts, t.sums(), &pairs, 0.5, 4).unwrap();
    for i in [3, 1, 0] {
        inc.push(i).unwrap();
    }
    let batch = hpfr_split(&pts, &[3, 1, 0], t.sums(), &t.lookup(&pts), 0.5, 4).unwrap();
    let running = inc.split().unwrap();
    assert_abs_diff_eq!(running.combined(), batch.combined(), epsilon = 1e-12);
    assert_abs_diff_eq!(running.proximity(), batch.proximity(), epsilon = 1e-12);
}

#[test]
fn single_point_subset_is_invalid_budget() {
    let pts = vec![Point::new(0, 0.0, 0.0, 1.0)];
    let t = ProximityTable::build(&pts, Kernel::default(), TableMode::Full).unwrap();
    assert!(matches!(
        hpfr(&pts, &[0], t.sums(), &t.lookup(&pts), 0.5, 1),
        Err(ScoreError::InvalidBudget { k: 1 })
    ));
}

#[test]
fn sums_only_table_scores_like_full_table() {
    let pts: Vec<Point> = (0..6)
        .map(|i| Point::new(i, i as f64 * 0.1, 0.0, 1.0))
        .collect();
    let full = ProximityTable::build(&pts, Kernel::InverseDistance, TableMode::Full).unwrap();
    let lean = ProximityTable::build(&pts, Kernel::InverseDistance, TableMode::SumsOnly).unwrap();

    let a = hpfr(&pts, &[0, 1, 2], full.sums(), &full.lookup(&pts), 1.0, 6).unwrap();
    let b = hpfr(&pts, &[0, 1, 2], lean.sums(), &lean.lookup(&pts), 1.0, 6).unwrap();
    assert!(a.sum_penalty() > 0.0);
    assert_abs_diff_eq!(a.score(), b.score(), epsilon = 1e-12);
    assert_abs_diff_eq!(a.sum_baseline(), b.sum_baseline(), epsilon = 1e-12);
    assert_abs_diff_eq!(a.sum_penalty(), b.sum_penalty(), epsilon = 1e-12);
}
