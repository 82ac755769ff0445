//! The `basins` subcommand: assign every station to its coarse and fine
//! watershed.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use fos_basins::Watershed;
use fos_io::{
    AssignmentRow, Station, UNASSIGNED, read_station_table, read_watershed_layer,
    write_assignment_table,
};

use crate::cli::BasinsArgs;
use crate::config::FosConfig;
use crate::convert;
use crate::profile::Profiler;

pub fn run(args: BasinsArgs, profiler: &mut Profiler) -> Result<()> {
    let _cmd = info_span!("basins").entered();

    // 1. Load project TOML
    profiler.stage("load config");
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let config: FosConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;
    let paths = convert::resolve_dirs(&config.dirs);

    // 2. Read the stations and both polygon layers
    profiler.stage("read inputs");
    let table = paths.station_table();
    let stations = read_station_table(&table)
        .with_context(|| format!("failed to read station table: {}", table.display()))?;
    if stations.is_empty() {
        bail!("station table is empty: {}", table.display());
    }
    let huc6_path = paths.watershed_layer("huc6");
    let huc6 = read_watershed_layer(&huc6_path, "huc6", "huc6")
        .with_context(|| format!("failed to read watershed layer: {}", huc6_path.display()))?;
    let huc8_path = paths.watershed_layer("huc8");
    let huc8 = read_watershed_layer(&huc8_path, "huc8", "huc8")
        .with_context(|| format!("failed to read watershed layer: {}", huc8_path.display()))?;

    // 3. Locate every station in both layers
    profiler.stage("assign watersheds");
    let mut rows = Vec::with_capacity(stations.len());
    let mut outside_huc6 = 0usize;
    let mut outside_huc8 = 0usize;
    for station in &stations {
        let point = station.point();
        let coarse = huc6.locate(&point);
        let fine = huc8.locate(&point);
        if coarse.is_none() {
            outside_huc6 += 1;
        }
        if fine.is_none() {
            outside_huc8 += 1;
        }
        rows.push(assignment_row(station, coarse, fine));
    }
    info!(
        n_stations = rows.len(),
        outside_huc6, outside_huc8, "stations assigned"
    );

    // 4. Write the assignment table
    profiler.stage("write outputs");
    std::fs::create_dir_all(&paths.outdir)
        .with_context(|| format!("failed to create output dir: {}", paths.outdir.display()))?;
    let table_path = args
        .output
        .unwrap_or_else(|| paths.outdir.join("basins.csv"));
    write_assignment_table(&table_path, &rows)
        .with_context(|| format!("failed to write assignment table: {}", table_path.display()))?;

    Ok(())
}

/// One table row; stations outside a layer get the sentinel id.
fn assignment_row(
    station: &Station,
    coarse: Option<&Watershed>,
    fine: Option<&Watershed>,
) -> AssignmentRow {
    AssignmentRow {
        site_number: station.site_number(),
        site_name: station.site_name().to_string(),
        state: station.state().to_string(),
        huc6: coarse.map_or_else(|| UNASSIGNED.to_string(), |w| w.id().to_string()),
        huc8: fine.map_or_else(|| UNASSIGNED.to_string(), |w| w.id().to_string()),
    }
}
