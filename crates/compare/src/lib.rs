//! Strategy comparison against the exact baseline.
//!
//! Sweeps `(K, k)` combos, gammas, grid resolutions and hybrid pool sizes,
//! runs every sampler on every dataset, and reports each result relative to
//! the baseline. Rows average across datasets with [`average_rows`].
//!
//! ```ignore
//! use hpfr_compare::{ComparisonConfig, average_rows, run_comparison, to_json};
//!
//! let config = ComparisonConfig::new().with_combos(vec![(500, 10)]);
//! let rows = run_comparison(&config, &names, |name, n, rng| load(name, n, rng), &mut rng)?;
//! println!("{}", to_json(&average_rows(&rows))?);
//! ```

mod config;
mod driver;
mod error;
mod output;

pub use config::ComparisonConfig;
pub use driver::run_comparison;
pub use error::CompareError;
pub use output::{AveragedRow, ComparisonRow, average_rows, pct_diff, to_json};
