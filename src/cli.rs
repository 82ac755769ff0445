use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fate-of-SNOTEL station/model comparison toolkit.
#[derive(Parser)]
#[command(
    name = "fos",
    version,
    about = "Compare SNOTEL station SWE against WRF model output"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Record per-stage wall-clock timings and dump them on exit.
    #[arg(long, global = true)]
    pub profile: bool,

    /// Destination of the timing dump when profiling is on.
    #[arg(long, global = true, default_value = "profile.out")]
    pub profile_output: PathBuf,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Assemble the per-station water-year peak table.
    Peaks(PeaksArgs),
    /// Fit and score the bias-correction strategies for one station.
    Evaluate(EvaluateArgs),
    /// Assign each station to its coarse and fine watershed.
    Basins(BasinsArgs),
    /// Inventory the WRF archive and coordinate grid.
    WrfInfo(WrfInfoArgs),
}

/// Arguments for the `peaks` subcommand.
#[derive(clap::Args)]
pub struct PeaksArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "fos.toml")]
    pub config: PathBuf,

    /// Override peak-table CSV path (default `<outdir>/peaks.csv`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Render the diagnostic figures as well.
    #[arg(long)]
    pub plots: bool,
}

/// Arguments for the `evaluate` subcommand.
#[derive(clap::Args)]
pub struct EvaluateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "fos.toml")]
    pub config: PathBuf,

    /// Numeric site identifier of the station to evaluate.
    #[arg(short, long)]
    pub station: u32,

    /// Fit a single strategy instead of the whole roster.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Override diagnostics JSON path (default `<outdir>/evaluate_<station>.json`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Render a per-window figure for each fitted strategy.
    #[arg(long)]
    pub plots: bool,
}

/// Arguments for the `basins` subcommand.
#[derive(clap::Args)]
pub struct BasinsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "fos.toml")]
    pub config: PathBuf,

    /// Override assignment-table CSV path (default `<outdir>/basins.csv`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `wrf-info` subcommand.
#[derive(clap::Args)]
pub struct WrfInfoArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "fos.toml")]
    pub config: PathBuf,

    /// Report file coverage for this model (needs --variant).
    #[arg(short, long, requires = "variant")]
    pub model: Option<String>,

    /// Model variant label, for example `r1i1p1f1` (needs --model).
    #[arg(long, requires = "model")]
    pub variant: Option<String>,
}
