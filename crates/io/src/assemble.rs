//! Per-station series assembly.
//!
//! Each station contributes three daily series: the SNOTEL observations
//! (`snotel<id>.csv`) and the WRF point and basin-average extractions
//! (`wrfpoint_<token>.csv`, `wrfbasin_<token>.csv`). A station whose files
//! are absent or malformed is reported through [`LoadOutcome`], never
//! silently dropped.

use std::path::{Path, PathBuf};

use fos_series::DailyFrame;
use tracing::{debug, info, warn};

use crate::daily_csv::read_daily_csv;
use crate::error::IoError;
use crate::stations::Station;
use crate::wrf::MM_TO_IN;

/// The three aligned daily series for one station.
#[derive(Debug, Clone)]
pub struct StationSeries {
    station: Station,
    snotel: DailyFrame,
    wrf_point: DailyFrame,
    wrf_basin: DailyFrame,
}

impl StationSeries {
    /// The station the series belong to.
    pub fn station(&self) -> &Station {
        &self.station
    }

    /// Observed SNOTEL series, in inches.
    pub fn snotel(&self) -> &DailyFrame {
        &self.snotel
    }

    /// WRF series at the station's grid cell, converted to inches.
    pub fn wrf_point(&self) -> &DailyFrame {
        &self.wrf_point
    }

    /// WRF series averaged over the station's basin, converted to inches.
    pub fn wrf_basin(&self) -> &DailyFrame {
        &self.wrf_basin
    }
}

/// What happened when one station's series were loaded.
#[derive(Debug)]
pub enum LoadOutcome {
    /// All three series loaded.
    Loaded(Box<StationSeries>),
    /// A required file is absent.
    Missing {
        /// The file that was not found.
        path: PathBuf,
    },
    /// A file exists but failed to parse.
    Malformed {
        /// The file that failed.
        path: PathBuf,
        /// Why it failed.
        reason: String,
    },
}

/// Counts of per-station load outcomes across one assembly pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Stations with all three series loaded.
    pub n_loaded: usize,
    /// Stations skipped because a file was absent.
    pub n_missing: usize,
    /// Stations skipped because a file failed to parse.
    pub n_malformed: usize,
}

impl LoadSummary {
    /// Stations attempted.
    pub fn n_total(&self) -> usize {
        self.n_loaded + self.n_missing + self.n_malformed
    }
}

/// Path of a station's SNOTEL observation file.
pub fn snotel_path(snoteldir: &Path, station: &Station) -> PathBuf {
    snoteldir.join(format!("snotel{}.csv", station.site_number()))
}

/// Path of a station's WRF point extraction.
pub fn wrf_point_path(wrfdir: &Path, station: &Station) -> PathBuf {
    wrfdir.join(format!("wrfpoint_{}.csv", station.file_token()))
}

/// Path of a station's WRF basin-average extraction.
pub fn wrf_basin_path(wrfdir: &Path, station: &Station) -> PathBuf {
    wrfdir.join(format!("wrfbasin_{}.csv", station.file_token()))
}

/// Loads one station's three series.
///
/// The WRF files carry millimetres; both are converted to inches here so
/// everything downstream compares in station units.
pub fn load_station_series(station: &Station, snoteldir: &Path, wrfdir: &Path) -> LoadOutcome {
    let snotel = match load_frame(&snotel_path(snoteldir, station)) {
        Ok(frame) => frame,
        Err(outcome) => return outcome,
    };
    let wrf_point = match load_frame(&wrf_point_path(wrfdir, station)) {
        Ok(frame) => frame.scaled(MM_TO_IN),
        Err(outcome) => return outcome,
    };
    let wrf_basin = match load_frame(&wrf_basin_path(wrfdir, station)) {
        Ok(frame) => frame.scaled(MM_TO_IN),
        Err(outcome) => return outcome,
    };
    LoadOutcome::Loaded(Box::new(StationSeries {
        station: station.clone(),
        snotel,
        wrf_point,
        wrf_basin,
    }))
}

fn load_frame(path: &Path) -> Result<DailyFrame, LoadOutcome> {
    match read_daily_csv(path) {
        Ok(frame) => Ok(frame),
        Err(IoError::FileNotFound { path }) => Err(LoadOutcome::Missing { path }),
        Err(e) => Err(LoadOutcome::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// Loads every station's series, reporting what was skipped.
///
/// Not every station has WRF extractions, so missing files log at debug;
/// malformed files log a warning. The totals go out at info either way.
pub fn load_station_set(
    stations: &[Station],
    snoteldir: &Path,
    wrfdir: &Path,
) -> (Vec<StationSeries>, LoadSummary) {
    let mut loaded = Vec::new();
    let mut summary = LoadSummary::default();
    for station in stations {
        match load_station_series(station, snoteldir, wrfdir) {
            LoadOutcome::Loaded(series) => {
                summary.n_loaded += 1;
                loaded.push(*series);
            }
            LoadOutcome::Missing { path } => {
                summary.n_missing += 1;
                debug!(
                    station = station.site_name(),
                    path = %path.display(),
                    "skipping station, series file missing"
                );
            }
            LoadOutcome::Malformed { path, reason } => {
                summary.n_malformed += 1;
                warn!(
                    station = station.site_name(),
                    path = %path.display(),
                    reason = %reason,
                    "skipping station, malformed series file"
                );
            }
        }
    }
    info!(
        n_loaded = summary.n_loaded,
        n_missing = summary.n_missing,
        n_malformed = summary.n_malformed,
        "assembled station series"
    );
    (loaded, summary)
}
