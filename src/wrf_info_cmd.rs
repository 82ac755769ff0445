//! The `wrf-info` subcommand: inventory the bias-corrected archive and
//! the coordinate grid.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use fos_io::{
    Scenario, find_model_files, list_bc_model_sets, model_set_dir, read_day_axis,
    read_grid_coordinates, read_station_table, screen_days,
};

use crate::cli::WrfInfoArgs;
use crate::config::FosConfig;
use crate::convert;
use crate::profile::Profiler;

pub fn run(args: WrfInfoArgs, profiler: &mut Profiler) -> Result<()> {
    let _cmd = info_span!("wrf_info").entered();

    // 1. Load project TOML
    profiler.stage("load config");
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let config: FosConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;
    let paths = convert::resolve_dirs(&config.dirs);

    // 2. List the bias-corrected model sets
    profiler.stage("list model sets");
    let sets = list_bc_model_sets(&paths.wrfdir)
        .with_context(|| format!("no usable WRF archive under {}", paths.wrfdir.display()))?;
    println!(
        "{} bias-corrected model sets under {}:",
        sets.len(),
        paths.wrfdir.display()
    );
    for name in &sets {
        println!("  {name}");
    }

    // 3. Read the coordinate grid
    profiler.stage("read grid");
    let grid = read_grid_coordinates(&paths.coorddir, &paths.domain).with_context(|| {
        format!("failed to read grid coordinates for domain {}", paths.domain)
    })?;
    let (n_rows, n_cols) = grid.shape();
    println!("grid {}: {n_rows} x {n_cols} cells", paths.domain);
    if let Some((lo, hi)) = grid.terrain_range() {
        println!("terrain height: {lo:.0} m to {hi:.0} m");
    }

    // 4. Optional per-model file coverage
    if let (Some(model), Some(variant)) = (&args.model, &args.variant) {
        profiler.stage("discover files");
        for scenario in [Scenario::Historical, Scenario::Projection] {
            let dir = model_set_dir(&paths.wrfdir, model, variant, scenario);
            let files = find_model_files(&dir, "snow", scenario, variant, &paths.domain)
                .with_context(|| {
                    format!(
                        "no {} snow files for {model}_{variant}",
                        scenario.file_token()
                    )
                })?;
            let days = read_day_axis(&files[0])
                .with_context(|| format!("failed to read day axis: {}", files[0].display()))?;
            let in_window = screen_days(&days, scenario).len();
            match (days.first(), days.last()) {
                (Some(first), Some(last)) => println!(
                    "{} {model}_{variant}: {} files, first file {first} to {last} \
                     ({in_window} days in scenario window)",
                    scenario.file_token(),
                    files.len(),
                ),
                _ => println!(
                    "{} {model}_{variant}: {} files, first file has an empty day axis",
                    scenario.file_token(),
                    files.len(),
                ),
            }
        }
    }

    // 5. Nearest grid cells for a sample of stations
    profiler.stage("nearest cells");
    let table = paths.station_table();
    let stations = read_station_table(&table)
        .with_context(|| format!("failed to read station table: {}", table.display()))?;
    for station in stations.iter().take(5) {
        let (row, col) = grid.nearest_cell(station.lon(), station.lat());
        println!(
            "{} ({}) -> cell ({row}, {col})",
            station.site_name(),
            station.site_number()
        );
    }
    info!(
        n_sets = sets.len(),
        n_stations = stations.len(),
        "inventory complete"
    );

    Ok(())
}
