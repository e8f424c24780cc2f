//! Compare command: sweep every strategy against the baseline.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use tracing::{info, info_span};

use hpfr_compare::{CompareError, average_rows, run_comparison, to_json};
use hpfr_proximity::Point;
use hpfr_synth::{Shape, ShapeConfig, generate_with};

use crate::cli::CompareArgs;
use crate::config::HpfrConfig;
use crate::convert;
use crate::points::read_points;

/// Where comparison datasets come from.
enum Source {
    /// Subsets of one point file, redrawn per dataset name.
    File(Vec<Point>),
    /// Synthetic shapes.
    Synthetic(ShapeConfig),
}

/// Run the comparison sweep.
pub fn run(args: CompareArgs) -> Result<()> {
    let _cmd = info_span!("compare").entered();
    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let mut config: HpfrConfig =
        toml::from_str(&toml_str).context("failed to parse TOML config")?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    let comparison = convert::build_comparison_config(&config)?;

    // 2. Resolve datasets
    let source = match &config.io.points {
        Some(path) => {
            info!(path = %path.display(), "reading points");
            Source::File(read_points(path)?)
        }
        None => {
            convert::parse_shapes(&config.experiment.datasets)?;
            Source::Synthetic(convert::build_shape_config(&config.experiment)?)
        }
    };
    let datasets = config.experiment.datasets.clone();

    // 3. Sweep
    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    info!(n_datasets = datasets.len(), "running comparison");
    let rows = run_comparison(
        &comparison,
        &datasets,
        |name, n, rng| load(&source, name, n, rng),
        &mut rng,
    )
    .context("comparison failed")?;

    // 4. Average and write
    let averaged = average_rows(&rows);
    let json = to_json(&averaged).context("failed to serialize report")?;
    match args.output.as_ref().or(config.io.output.as_ref()) {
        Some(out) => {
            std::fs::write(out, &json)
                .with_context(|| format!("failed to write report: {}", out.display()))?;
            info!(path = %out.display(), n_rows = averaged.len(), "report written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Produces `n` points for dataset `name`.
fn load(source: &Source, name: &str, n: usize, rng: &mut StdRng) -> Result<Vec<Point>, CompareError> {
    match source {
        Source::File(points) => {
            if n > points.len() {
                return Err(CompareError::Load {
                    dataset: name.to_string(),
                    reason: format!("requested {n} points, file holds {}", points.len()),
                });
            }
            let mut picked = index::sample(rng, points.len(), n).into_vec();
            picked.sort_unstable();
            Ok(picked.into_iter().map(|i| points[i]).collect())
        }
        Source::Synthetic(shape_cfg) => {
            let shape = name.parse::<Shape>().map_err(|e| CompareError::Load {
                dataset: name.to_string(),
                reason: e.to_string(),
            })?;
            generate_with(shape, n, shape_cfg, rng).map_err(|e| CompareError::Load {
                dataset: name.to_string(),
                reason: e.to_string(),
            })
        }
    }
}
