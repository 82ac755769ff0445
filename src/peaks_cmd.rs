//! The `peaks` subcommand: one wide table row per station and water year,
//! joining the observed peak with both WRF peaks.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use chrono::Datelike;
use tracing::{info, info_span, warn};

use fos_calendar::shift_to_dowy;
use fos_io::{
    PeakRow, StationSeries, filter_states, load_station_set, read_station_table, write_peak_table,
};
use fos_peaks::{WaterYearPeak, water_year_peaks};
use fos_plot::{histogram, scatter_compare, year_line};

use crate::cli::PeaksArgs;
use crate::config::FosConfig;
use crate::convert::{self, DataPaths};
use crate::profile::Profiler;

pub fn run(args: PeaksArgs, profiler: &mut Profiler) -> Result<()> {
    let _cmd = info_span!("peaks").entered();

    // 1. Load project TOML
    profiler.stage("load config");
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let config: FosConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;
    let paths = convert::resolve_dirs(&config.dirs);

    // 2. Read and filter the station table
    profiler.stage("read stations");
    let table = paths.station_table();
    let stations = read_station_table(&table)
        .with_context(|| format!("failed to read station table: {}", table.display()))?;
    let stations = filter_states(stations, &config.peaks.exclude_states);
    if stations.is_empty() {
        bail!(
            "no stations left after excluding states {:?}",
            config.peaks.exclude_states
        );
    }

    // 3. Load the observed and WRF series for every station
    profiler.stage("load series");
    let (loaded, summary) = load_station_set(&stations, &paths.snoteldir, &paths.wrfdir);
    if loaded.is_empty() {
        bail!(
            "no station series could be loaded ({} missing, {} malformed)",
            summary.n_missing,
            summary.n_malformed
        );
    }

    // 4. Extract water-year peaks and join the three series per year
    profiler.stage("extract peaks");
    let mut rows = Vec::new();
    for series in &loaded {
        match peak_rows(series) {
            Ok(mut station_rows) => rows.append(&mut station_rows),
            Err(e) => warn!(
                station = series.station().site_number(),
                error = %e,
                "skipping station, peak extraction failed"
            ),
        }
    }
    info!(n_rows = rows.len(), "peak table assembled");

    // 5. Write the table
    profiler.stage("write outputs");
    std::fs::create_dir_all(&paths.outdir)
        .with_context(|| format!("failed to create output dir: {}", paths.outdir.display()))?;
    let table_path = args
        .output
        .unwrap_or_else(|| paths.outdir.join("peaks.csv"));
    write_peak_table(&table_path, &rows)
        .with_context(|| format!("failed to write peak table: {}", table_path.display()))?;

    // 6. Optional diagnostic figures
    if args.plots || config.peaks.plots {
        render_figures(&paths, &rows)?;
    }

    Ok(())
}

/// The wide rows for one station: the three peak series joined on water
/// year. Years lacking a peak in any series are dropped.
fn peak_rows(series: &StationSeries) -> Result<Vec<PeakRow>> {
    let station = series.station();
    let snotel = water_year_peaks(series.snotel(), "SWE")?;
    let point = water_year_peaks(series.wrf_point(), "SWE")?;
    let basin = water_year_peaks(series.wrf_basin(), "SWE")?;
    let point: BTreeMap<i32, &WaterYearPeak> =
        point.iter().map(|p| (p.water_year(), p)).collect();
    let basin: BTreeMap<i32, &WaterYearPeak> =
        basin.iter().map(|p| (p.water_year(), p)).collect();

    let mut rows = Vec::new();
    for obs in &snotel {
        let year = obs.water_year();
        let (Some(pt), Some(bs)) = (point.get(&year), basin.get(&year)) else {
            continue;
        };
        rows.push(PeakRow {
            site_number: station.site_number(),
            site_name: station.site_name().to_string(),
            water_year: year,
            snotel_peak: obs.value(),
            snotel_peak_date: obs.date(),
            snotel_peak_dowy: dowy(obs)?,
            point_peak: pt.value(),
            point_peak_date: pt.date(),
            point_peak_dowy: dowy(pt)?,
            basin_peak: bs.value(),
            basin_peak_date: bs.date(),
            basin_peak_dowy: dowy(bs)?,
            point_basin_diff: pt.value() - bs.value(),
        });
    }
    Ok(rows)
}

/// Day of water year of a peak date.
fn dowy(peak: &WaterYearPeak) -> Result<i64> {
    Ok(shift_to_dowy(i64::from(peak.date().ordinal0()))?)
}

/// The three peak diagnostics: difference histogram, point-vs-basin
/// scatter, and mean absolute difference by water year.
fn render_figures(paths: &DataPaths, rows: &[PeakRow]) -> Result<()> {
    if rows.is_empty() {
        warn!("no joined peak rows, skipping figures");
        return Ok(());
    }
    let diffs: Vec<f64> = rows.iter().map(|r| r.point_basin_diff).collect();
    let pairs: Vec<(f64, f64)> = rows.iter().map(|r| (r.point_peak, r.basin_peak)).collect();
    let abs_diffs: Vec<f64> = diffs.iter().map(|d| d.abs()).collect();
    let mae = fos_stats::mean(&abs_diffs);
    let mae_sd = fos_stats::sd(&abs_diffs);

    let hist = paths.outdir.join("peak_diff_hist.png");
    histogram(
        &hist,
        &format!("Point minus basin peak SWE, MAE {mae:.1} +/- {mae_sd:.1} in"),
        "difference (in)",
        &diffs,
        30,
    )
    .with_context(|| format!("failed to render {}", hist.display()))?;

    let scatter = paths.outdir.join("peak_point_vs_basin.png");
    scatter_compare(
        &scatter,
        "Point vs basin peak SWE",
        "point peak (in)",
        "basin peak (in)",
        &pairs,
    )
    .with_context(|| format!("failed to render {}", scatter.display()))?;

    let by_year = paths.outdir.join("peak_diff_by_year.png");
    year_line(
        &by_year,
        &format!("Mean absolute peak difference by water year, MAE {mae:.1} +/- {mae_sd:.1} in"),
        "mean |point - basin| (in)",
        &mean_abs_diff_by_year(rows),
    )
    .with_context(|| format!("failed to render {}", by_year.display()))?;

    Ok(())
}

/// Mean absolute point-basin difference per water year, in year order.
fn mean_abs_diff_by_year(rows: &[PeakRow]) -> Vec<(i32, f64)> {
    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for row in rows {
        by_year
            .entry(row.water_year)
            .or_default()
            .push(row.point_basin_diff.abs());
    }
    by_year
        .into_iter()
        .filter_map(|(year, diffs)| fos_stats::nan_mean(&diffs).map(|mean| (year, mean)))
        .collect()
}
