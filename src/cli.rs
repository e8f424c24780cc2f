use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Diversified spatial top-k selection.
#[derive(Parser)]
#[command(
    name = "hpfr",
    version,
    about = "Diversified spatial top-k selection with the HPFR objective"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Select k points with one strategy and print the result as JSON.
    Select(SelectArgs),
    /// Compare every strategy against the baseline over a parameter sweep.
    Compare(CompareArgs),
}

/// Arguments for the `select` subcommand.
#[derive(clap::Args)]
pub struct SelectArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "hpfr.toml")]
    pub config: PathBuf,

    /// Strategy name: baseline, grid, grid-weighted, quadtree, biased, hybrid.
    #[arg(long)]
    pub strategy: String,

    /// Number of points to select.
    #[arg(short)]
    pub k: usize,

    /// Override the JSON point file from config.
    #[arg(short, long)]
    pub points: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `compare` subcommand.
#[derive(clap::Args)]
pub struct CompareArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "hpfr.toml")]
    pub config: PathBuf,

    /// Path for the averaged JSON report (stdout when unset).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}
