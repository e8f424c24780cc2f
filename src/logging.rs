use tracing_subscriber::EnvFilter;

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &[
    "hpfr",
    "hpfr_compare",
    "hpfr_partition",
    "hpfr_proximity",
    "hpfr_sampling",
    "hpfr_score",
    "hpfr_synth",
];

/// Initialize tracing based on CLI verbosity level.
///
/// Mapping:
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
///
/// `RUST_LOG` env var overrides the CLI flag if set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert!(default_filter(0).starts_with("hpfr=warn,"));
        assert!(default_filter(1).contains("hpfr_sampling=info"));
        assert!(default_filter(2).contains("hpfr_partition=debug"));
        assert!(default_filter(7).ends_with("hpfr_synth=trace"));
    }
}
