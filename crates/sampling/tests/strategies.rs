//! End-to-end behaviour of every strategy on a clustered point set.

use std::collections::HashSet;

use approx::assert_relative_eq;
use hpfr_proximity::{Kernel, Point, ProximityTable, TableMode};
use hpfr_sampling::{
    CellKey, HybridConfig, Prefilter, SamplerConfig, SamplingError, Selection, Strategy, select,
};
use hpfr_score::ScoreError;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Two clusters: a dense blob near the origin and a sparse ring around it.
fn clustered(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            let a = t * 2.399_963_229_7;
            let r = if i % 4 == 0 {
                10.0 + (t * 0.31).fract()
            } else {
                (t * 0.618_033_988_7).fract()
            };
            Point::new(i as u64, r * a.cos(), r * a.sin(), 0.5 + (i % 3) as f64)
        })
        .collect()
}

fn setup(n: usize) -> (Vec<Point>, ProximityTable) {
    let pts = clustered(n);
    let table = ProximityTable::build(&pts, Kernel::default(), TableMode::Full).unwrap();
    (pts, table)
}

fn config(k: usize, pool: usize) -> SamplerConfig {
    SamplerConfig::new(k, 4.0)
        .with_resolution(5)
        .with_quadtree(10, 5)
        .with_hybrid(HybridConfig::new(pool))
}

fn assert_valid(sel: &Selection, n: usize, k: usize) {
    assert_eq!(sel.indices().len(), k, "{} returned wrong size", sel.strategy());
    let unique: HashSet<usize> = sel.indices().iter().copied().collect();
    assert_eq!(unique.len(), k, "{} repeated an index", sel.strategy());
    assert!(sel.indices().iter().all(|&i| i < n));
    assert!(sel.objective().score().is_finite());
}

#[test]
fn every_strategy_returns_k_distinct_points() {
    let (pts, table) = setup(400);
    let cfg = config(20, 80);
    for strategy in Strategy::ALL {
        let mut rng = StdRng::seed_from_u64(7);
        let sel = select(strategy, &pts, &table, &cfg, &mut rng).unwrap();
        assert_eq!(sel.strategy(), strategy);
        assert_valid(&sel, pts.len(), 20);
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let (pts, table) = setup(300);
    let cfg = config(15, 60);
    for strategy in Strategy::ALL {
        let a = select(strategy, &pts, &table, &cfg, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = select(strategy, &pts, &table, &cfg, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a.indices(), b.indices(), "{strategy} not reproducible");
        assert_eq!(a.objective(), b.objective());
    }
}

#[test]
fn baseline_with_k_equal_n_returns_all() {
    let (pts, table) = setup(50);
    let cfg = SamplerConfig::new(50, 2.0);
    let mut rng = StdRng::seed_from_u64(1);
    let sel = select(Strategy::Baseline, &pts, &table, &cfg, &mut rng).unwrap();
    let mut got = sel.indices().to_vec();
    got.sort_unstable();
    assert_eq!(got, (0..50).collect::<Vec<_>>());
    assert_eq!(sel.prep_time(), table.build_time());
}

#[test]
fn budget_above_n_is_capped() {
    let (pts, table) = setup(30);
    let cfg = config(500, 30);
    for strategy in [
        Strategy::Baseline,
        Strategy::GridStandard,
        Strategy::Quadtree,
        Strategy::Biased,
    ] {
        let sel = select(strategy, &pts, &table, &cfg, &mut StdRng::seed_from_u64(4)).unwrap();
        assert_valid(&sel, 30, 30);
    }
}

#[test]
fn selection_score_matches_direct_scoring() {
    let (pts, table) = setup(200);
    let cfg = config(12, 40);
    for strategy in [Strategy::Baseline, Strategy::GridWeighted, Strategy::Quadtree] {
        let sel = select(strategy, &pts, &table, &cfg, &mut StdRng::seed_from_u64(5)).unwrap();
        let pairs = table.lookup(&pts);
        let direct =
            hpfr_score::hpfr(&pts, sel.indices(), table.sums(), &pairs, cfg.w(), pts.len()).unwrap();
        assert_relative_eq!(sel.objective().score(), direct.score(), max_relative = 1e-12);
    }
}

#[test]
fn grid_cell_stats_account_for_every_draw() {
    let (pts, table) = setup(400);
    let cfg = config(25, 80);
    let sel = select(Strategy::GridStandard, &pts, &table, &cfg, &mut StdRng::seed_from_u64(3)).unwrap();
    let stats = sel.cell_stats();
    assert!(!stats.is_empty());
    assert_eq!(stats.iter().map(|s| s.selected()).sum::<usize>(), 25);
    assert_eq!(stats.iter().map(|s| s.total()).sum::<usize>(), 400);
    assert!(stats.iter().all(|s| s.selected() <= s.total()));
    assert!(stats.iter().all(|s| matches!(s.cell(), CellKey::Grid(_))));
}

#[test]
fn quadtree_cell_stats_are_leaves() {
    let (pts, table) = setup(400);
    let cfg = config(25, 80);
    let sel = select(Strategy::Quadtree, &pts, &table, &cfg, &mut StdRng::seed_from_u64(3)).unwrap();
    assert!(sel.cell_stats().iter().all(|s| matches!(s.cell(), CellKey::Leaf(_))));
    assert_eq!(sel.cell_stats().iter().map(|s| s.total()).sum::<usize>(), 400);
}

#[test]
fn biased_reports_no_preparation() {
    let (pts, table) = setup(100);
    let sel = select(
        Strategy::Biased,
        &pts,
        &table,
        &config(10, 20),
        &mut StdRng::seed_from_u64(8),
    )
    .unwrap();
    assert!(sel.prep_time().is_zero());
    assert!(sel.cell_stats().is_empty());
    assert!(sel.hybrid().is_none());
}

#[test]
fn hybrid_maps_back_into_s_and_reports_pool() {
    let (pts, table) = setup(500);
    for prefilter in [Prefilter::Random, Prefilter::Grid { resolution: 6 }] {
        for inner in [Strategy::Baseline, Strategy::GridStandard, Strategy::Quadtree] {
            let cfg = SamplerConfig::new(20, 5.0)
                .with_resolution(4)
                .with_hybrid(HybridConfig::new(100).with_prefilter(prefilter).with_inner(inner));
            let sel = select(Strategy::Hybrid, &pts, &table, &cfg, &mut StdRng::seed_from_u64(6)).unwrap();
            assert_valid(&sel, pts.len(), 20);
            let info = sel.hybrid().unwrap();
            assert_eq!(info.pool_size(), 100);
            assert_relative_eq!(info.effective_weight(), 5.0 * 100.0 / 500.0);
            assert!(sel.prep_time() >= info.prefilter_time());
        }
    }
}

#[test]
fn hybrid_with_full_pool_keeps_weight() {
    let (pts, table) = setup(60);
    let cfg = SamplerConfig::new(10, 3.0).with_hybrid(HybridConfig::new(60));
    let sel = select(Strategy::Hybrid, &pts, &table, &cfg, &mut StdRng::seed_from_u64(2)).unwrap();
    assert_relative_eq!(sel.hybrid().unwrap().effective_weight(), 3.0);
    let pairs = table.lookup(&pts);
    let direct = hpfr_score::hpfr(&pts, sel.indices(), table.sums(), &pairs, 3.0, 60).unwrap();
    assert_relative_eq!(sel.objective().score(), direct.score(), max_relative = 1e-9);
}

#[test]
fn sums_only_table_scores_like_full() {
    let pts = clustered(120);
    let full = ProximityTable::build(&pts, Kernel::default(), TableMode::Full).unwrap();
    let lean = ProximityTable::build(&pts, Kernel::default(), TableMode::SumsOnly).unwrap();
    let cfg = config(10, 40);
    let a = select(Strategy::Baseline, &pts, &full, &cfg, &mut StdRng::seed_from_u64(1)).unwrap();
    let b = select(Strategy::Baseline, &pts, &lean, &cfg, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(a.indices(), b.indices());
    assert_relative_eq!(a.objective().score(), b.objective().score(), max_relative = 1e-12);
}

#[test]
fn empty_input_is_rejected() {
    let table = ProximityTable::build(&[], Kernel::default(), TableMode::Full).unwrap();
    for strategy in Strategy::ALL {
        let r = select(strategy, &[], &table, &config(5, 5), &mut StdRng::seed_from_u64(0));
        assert!(matches!(r, Err(SamplingError::EmptyInputSet)), "{strategy}");
    }
}

#[test]
fn zero_budget_is_an_empty_selection() {
    let (pts, table) = setup(40);
    for strategy in [
        Strategy::Baseline,
        Strategy::GridStandard,
        Strategy::GridWeighted,
        Strategy::Quadtree,
        Strategy::Biased,
    ] {
        let r = select(strategy, &pts, &table, &config(0, 10), &mut StdRng::seed_from_u64(0));
        assert!(matches!(r, Err(SamplingError::EmptySelection)), "{strategy}");
    }
}

#[test]
fn single_point_budget_fails_scoring() {
    let pts = vec![Point::new(0, 1.0, 1.0, 1.0)];
    let table = ProximityTable::build(&pts, Kernel::default(), TableMode::Full).unwrap();
    let r = select(
        Strategy::Baseline,
        &pts,
        &table,
        &SamplerConfig::new(1, 0.5),
        &mut StdRng::seed_from_u64(0),
    );
    assert!(matches!(
        r,
        Err(SamplingError::Score(ScoreError::InvalidBudget { k: 1 }))
    ));
}

#[test]
fn hybrid_errors() {
    let (pts, table) = setup(20);
    let mut rng = StdRng::seed_from_u64(0);

    let no_settings = SamplerConfig::new(5, 1.0);
    assert!(matches!(
        select(Strategy::Hybrid, &pts, &table, &no_settings, &mut rng),
        Err(SamplingError::InvalidConfig { .. })
    ));

    let too_big = SamplerConfig::new(5, 1.0).with_hybrid(HybridConfig::new(21));
    assert!(matches!(
        select(Strategy::Hybrid, &pts, &table, &too_big, &mut rng),
        Err(SamplingError::InvalidPoolSize {
            pool_size: 21,
            set_size: 20
        })
    ));
}

/// Two cells of `left + right` points on the x axis, `G = 2`.
///
/// The left cluster sits in `[0, 0.9]` and the right one in `[9.1, 10]`, so
/// the grid splits them into cells `(0, 0)` and `(1, 0)`.
fn two_cells(left: usize, right: usize, left_weight: f64, right_weight: f64) -> Vec<Point> {
    let l = (0..left).map(|i| Point::new(i as u64, i as f64 * 0.09, 0.0, left_weight));
    let r = (0..right).map(|i| {
        let x = 10.0 - i as f64 * 0.9 / right as f64;
        Point::new((left + i) as u64, x, 0.0, right_weight)
    });
    l.chain(r).collect()
}

fn selected_per_cell(sel: &Selection) -> Vec<usize> {
    sel.cell_stats().iter().map(|c| c.selected()).collect()
}

fn run(strategy: Strategy, pts: &[Point], cfg: &SamplerConfig) -> Result<Selection, SamplingError> {
    let table = ProximityTable::build(pts, Kernel::default(), TableMode::Full).unwrap();
    select(strategy, pts, &table, cfg, &mut StdRng::seed_from_u64(0))
}

#[test]
fn grid_quotas_follow_population() {
    let pts = two_cells(10, 10, 1.0, 3.0);
    let cfg = SamplerConfig::new(8, 1.0).with_resolution(2);
    let sel = run(Strategy::GridStandard, &pts, &cfg).unwrap();
    assert_eq!(selected_per_cell(&sel), vec![4, 4]);
    assert_eq!(sel.indices().iter().filter(|&&i| i < 10).count(), 4);
}

#[test]
fn weighted_grid_quotas_follow_population_times_weight() {
    let pts = two_cells(10, 10, 1.0, 3.0);
    let cfg = SamplerConfig::new(8, 1.0).with_resolution(2);
    let sel = run(Strategy::GridWeighted, &pts, &cfg).unwrap();
    assert_eq!(selected_per_cell(&sel), vec![2, 6]);
    assert_eq!(sel.indices().iter().filter(|&&i| i < 10).count(), 2);
}

#[test]
fn quadtree_quotas_follow_leaf_population() {
    // 40 points > m = 30 splits the root once; the leaves hold 10 and 30.
    let pts = two_cells(10, 30, 5.0, 1.0);
    let cfg = SamplerConfig::new(8, 1.0).with_quadtree(30, 1);
    let sel = run(Strategy::Quadtree, &pts, &cfg).unwrap();
    let totals: Vec<usize> = sel.cell_stats().iter().map(|c| c.total()).collect();
    assert_eq!(totals, vec![10, 30]);
    assert_eq!(selected_per_cell(&sel), vec![2, 6]);
}

#[test]
fn weighted_grid_skips_negative_weight_cells() {
    let pts = two_cells(10, 10, -1.0, 1.0);
    let cfg = SamplerConfig::new(6, 1.0).with_resolution(2);
    let sel = run(Strategy::GridWeighted, &pts, &cfg).unwrap();
    assert_eq!(selected_per_cell(&sel), vec![0, 6]);
    assert!(sel.indices().iter().all(|&i| i >= 10));
}

#[test]
fn weighted_grid_fills_past_negative_cells_when_short_of_room() {
    let pts = two_cells(10, 4, -1.0, 1.0);
    let cfg = SamplerConfig::new(6, 1.0).with_resolution(2);
    let sel = run(Strategy::GridWeighted, &pts, &cfg).unwrap();
    assert_eq!(selected_per_cell(&sel), vec![2, 4]);
}

#[test]
fn weighted_grid_without_positive_weight_falls_back_to_population() {
    let pts = two_cells(10, 30, -2.0, 0.0);
    let cfg = SamplerConfig::new(8, 1.0).with_resolution(2);
    let weighted = run(Strategy::GridWeighted, &pts, &cfg).unwrap();
    let standard = run(Strategy::GridStandard, &pts, &cfg).unwrap();
    assert_eq!(selected_per_cell(&weighted), vec![2, 6]);
    assert_eq!(selected_per_cell(&weighted), selected_per_cell(&standard));
}
