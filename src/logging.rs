use tracing_subscriber::EnvFilter;

/// Workspace crates whose events the default filter lets through.
const CRATE_TARGETS: &[&str] = &[
    "fos",
    "fos_basins",
    "fos_calendar",
    "fos_io",
    "fos_models",
    "fos_peaks",
    "fos_plot",
    "fos_series",
    "fos_stats",
];

/// Installs the global tracing subscriber.
///
/// Repeating `-v` raises the level: warn by default, then info, debug,
/// and trace. A set `RUST_LOG` environment variable wins over the flag.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let directives = CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
