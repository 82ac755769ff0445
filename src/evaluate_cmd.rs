//! The `evaluate` subcommand: fit the bias-correction strategies for one
//! station and score every evaluation window.

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, info_span};

use fos_io::{LoadOutcome, Station, load_station_series, read_station_table};
use fos_models::{ModelOutput, Strategy, fit_and_apply};
use fos_plot::model_windows;

use crate::cli::EvaluateArgs;
use crate::config::FosConfig;
use crate::convert;
use crate::profile::Profiler;

pub fn run(args: EvaluateArgs, profiler: &mut Profiler) -> Result<()> {
    let _cmd = info_span!("evaluate").entered();

    // 1. Load project TOML
    profiler.stage("load config");
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let config: FosConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;
    let paths = convert::resolve_dirs(&config.dirs);
    let windows = convert::build_window_set(&config.evaluate)?;
    let params = convert::build_model_params(&config.evaluate);

    // 2. Find the station and load its series
    profiler.stage("load series");
    let table = paths.station_table();
    let stations = read_station_table(&table)
        .with_context(|| format!("failed to read station table: {}", table.display()))?;
    let station = stations
        .iter()
        .find(|s| s.site_number() == args.station)
        .ok_or_else(|| anyhow!("station {} not in {}", args.station, table.display()))?;
    let series = match load_station_series(station, &paths.snoteldir, &paths.wrfdir) {
        LoadOutcome::Loaded(series) => *series,
        LoadOutcome::Missing { path } => bail!("series file missing: {}", path.display()),
        LoadOutcome::Malformed { path, reason } => {
            bail!("series file malformed: {} ({reason})", path.display())
        }
    };

    // 3. Pair the forcing and observation frames on a shared date axis.
    //    Station records have gaps, so the frames are cut to the dates
    //    both carry; the windows then split identical axes.
    profiler.stage("pair frames");
    let forcing = series.snotel().clone().renamed("SWE", "SNOTEL_SWE")?;
    let obs = series.wrf_basin().clone();
    let span = forcing
        .common_span(&obs)
        .ok_or_else(|| anyhow!("station and WRF basin series do not overlap in time"))?;
    let (forcing, obs) = forcing.aligned(&obs);
    info!(
        n_days = forcing.len(),
        start = %span.start(),
        end = %span.end(),
        "paired series"
    );
    let forcing_windows = windows.partition(&forcing);
    let obs_windows = windows.partition(&obs);
    let order = windows.order();

    // 4. Fit every strategy and apply it to all windows
    profiler.stage("fit models");
    let strategies = match &args.model {
        Some(name) => vec![convert::parse_strategy(name, config.evaluate.degree)?],
        None => Strategy::roster(config.evaluate.degree),
    };
    let mut outputs = Vec::new();
    for strategy in &strategies {
        let output = fit_and_apply(strategy, &forcing_windows, &obs_windows, &order, &params)
            .with_context(|| format!("fit failed for strategy '{}'", strategy.name()))?;
        outputs.push(output);
    }

    // 5. Score each window and write the diagnostics JSON
    profiler.stage("write outputs");
    let diagnostics = Diagnostics {
        site_number: station.site_number(),
        site_name: station.site_name().to_string(),
        n_days: forcing.len(),
        windows: windows
            .iter()
            .map(|(name, span)| WindowMeta {
                name: name.to_string(),
                start: span.start(),
                end: span.end(),
            })
            .collect(),
        models: outputs
            .iter()
            .map(|output| ModelReport {
                model: output.name().to_string(),
                scores: window_scores(output),
            })
            .collect(),
    };
    std::fs::create_dir_all(&paths.outdir)
        .with_context(|| format!("failed to create output dir: {}", paths.outdir.display()))?;
    let diag_path = args
        .output
        .unwrap_or_else(|| paths.outdir.join(format!("evaluate_{}.json", args.station)));
    let json =
        serde_json::to_string_pretty(&diagnostics).context("failed to serialize diagnostics")?;
    std::fs::write(&diag_path, &json)
        .with_context(|| format!("failed to write diagnostics: {}", diag_path.display()))?;
    info!(path = %diag_path.display(), n_models = diagnostics.models.len(), "diagnostics written");

    // 6. Optional per-strategy figures
    if args.plots {
        for output in &outputs {
            for variable in &config.evaluate.vars {
                let fig = paths.outdir.join(format!(
                    "evaluate_{}_{}_{}.png",
                    args.station,
                    output.name(),
                    variable.to_lowercase()
                ));
                let title = figure_title(station, output, variable);
                model_windows(&fig, &title, output, variable)
                    .with_context(|| format!("failed to render {}", fig.display()))?;
            }
        }
    }

    Ok(())
}

/// Everything one evaluation run reports.
#[derive(Serialize)]
struct Diagnostics {
    site_number: u32,
    site_name: String,
    n_days: usize,
    windows: Vec<WindowMeta>,
    models: Vec<ModelReport>,
}

#[derive(Serialize)]
struct WindowMeta {
    name: String,
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Serialize)]
struct ModelReport {
    model: String,
    scores: Vec<WindowScores>,
}

/// Skill scores of one (window, variable) segment. A score is `null`
/// when the segment lacks the finite samples it needs.
#[derive(Serialize)]
struct WindowScores {
    window: String,
    variable: String,
    n_samples: usize,
    nse: Option<f64>,
    mae: Option<f64>,
    rmse: Option<f64>,
    pbias: Option<f64>,
    pearson: Option<f64>,
}

fn window_scores(output: &ModelOutput) -> Vec<WindowScores> {
    output
        .segments()
        .iter()
        .map(|segment| {
            let obs = output.observed(segment);
            let sim = output.simulated(segment);
            WindowScores {
                window: segment.window().to_string(),
                variable: segment.variable().to_string(),
                n_samples: segment.len(),
                nse: fos_stats::nse(sim, obs),
                mae: fos_stats::mae(sim, obs),
                rmse: fos_stats::rmse(sim, obs),
                pbias: fos_stats::pbias(sim, obs),
                pearson: fos_stats::pearson_correlation(sim, obs),
            }
        })
        .collect()
}

/// Figure title carrying the model's test-window skill.
fn figure_title(station: &Station, output: &ModelOutput, variable: &str) -> String {
    let nse = output
        .segment("test", variable)
        .and_then(|segment| fos_stats::nse(output.simulated(segment), output.observed(segment)))
        .map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));
    format!(
        "{} ({}) {variable}, {}, test NSE {nse}",
        station.site_name(),
        station.site_number(),
        output.name()
    )
}
