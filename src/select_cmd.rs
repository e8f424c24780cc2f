//! Select command: draw k points with one strategy and report the result.

use std::time::Duration;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, info_span};

use hpfr_proximity::{Point, ProximityTable};
use hpfr_sampling::{CellKey, Selection, select};

use crate::cli::SelectArgs;
use crate::config::HpfrConfig;
use crate::convert;
use crate::points::read_points;

/// JSON report of one selection.
#[derive(Debug, Serialize)]
struct SelectReport {
    strategy: &'static str,
    set_size: usize,
    k: usize,
    w: f64,
    indices: Vec<usize>,
    ids: Vec<u64>,
    score: f64,
    sum_baseline: f64,
    sum_penalty: f64,
    prep_ms: f64,
    select_ms: f64,
    total_ms: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cells: Vec<CellReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hybrid: Option<HybridReport>,
}

#[derive(Debug, Serialize)]
struct CellReport {
    cell: String,
    total: usize,
    selected: usize,
}

#[derive(Debug, Serialize)]
struct HybridReport {
    pool_size: usize,
    effective_weight: f64,
    prefilter_ms: f64,
}

/// Run a single selection.
pub fn run(args: SelectArgs) -> Result<()> {
    let _cmd = info_span!("select").entered();
    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let mut config: HpfrConfig =
        toml::from_str(&toml_str).context("failed to parse TOML config")?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    // 2. Read points
    let path = args
        .points
        .as_ref()
        .or(config.io.points.as_ref())
        .ok_or_else(|| anyhow::anyhow!("no point file: set [io].points in config or use --points"))?;
    info!(path = %path.display(), "reading points");
    let points = read_points(path)?;
    info!(n_points = points.len(), "points loaded");

    // 3. Proximity table
    let kernel = convert::parse_kernel(&config.proximity.kernel, config.proximity.bandwidth)?;
    let mode = convert::parse_table_mode(&config.proximity.mode)?;
    let table = ProximityTable::build(&points, kernel, mode)
        .context("failed to build proximity table")?;

    // 4. Select
    let strategy = convert::parse_strategy(&args.strategy)?;
    let sampler = convert::build_sampler_config(&config, points.len(), args.k)?;
    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    info!(%strategy, k = args.k, w = sampler.w(), "selecting");
    let selection = select(strategy, &points, &table, &sampler, &mut rng)
        .with_context(|| format!("{strategy} selection failed"))?;
    info!(score = selection.objective().score(), "selection done");

    // 5. Report
    let report = build_report(&points, &selection, sampler.w());
    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    match &config.io.output {
        Some(out) => {
            std::fs::write(out, &json)
                .with_context(|| format!("failed to write report: {}", out.display()))?;
            info!(path = %out.display(), "report written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn build_report(points: &[Point], selection: &Selection, w: f64) -> SelectReport {
    let objective = selection.objective();
    SelectReport {
        strategy: selection.strategy().name(),
        set_size: points.len(),
        k: selection.indices().len(),
        w,
        indices: selection.indices().to_vec(),
        ids: selection.indices().iter().map(|&i| points[i].id()).collect(),
        score: objective.score(),
        sum_baseline: objective.sum_baseline(),
        sum_penalty: objective.sum_penalty(),
        prep_ms: millis(selection.prep_time()),
        select_ms: millis(selection.select_time()),
        total_ms: millis(selection.total_time()),
        cells: selection
            .cell_stats()
            .iter()
            .map(|c| CellReport {
                cell: cell_label(c.cell()),
                total: c.total(),
                selected: c.selected(),
            })
            .collect(),
        hybrid: selection.hybrid().map(|h| HybridReport {
            pool_size: h.pool_size(),
            effective_weight: h.effective_weight(),
            prefilter_ms: millis(h.prefilter_time()),
        }),
    }
}

fn cell_label(key: CellKey) -> String {
    match key {
        CellKey::Grid(id) => format!("grid({}, {})", id.gx, id.gy),
        CellKey::Leaf(id) => format!("leaf({})", id.index()),
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
