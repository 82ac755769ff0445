//! WRF model-output discovery and time axes.
//!
//! The bias-corrected archive is laid out as one directory per model set
//! (`<model>_<variant>_<scenario>_bc/postprocess/<domain>/`) holding NetCDF
//! files named by variable. Day coordinates are nominal `YYYYMMDD` numbers,
//! so converting them to real dates has to cope with no-leap source
//! calendars.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use fos_series::DateSpan;
use tracing::debug;

use crate::error::IoError;

/// Millimetres to inches. WRF series arrive in mm; stations report inches.
pub const MM_TO_IN: f64 = 0.03937008;

/// One side of the bias-corrected WRF archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// The 1980 through 2013 historical runs.
    Historical,
    /// The SSP3-7.0 projections, 2014 onward.
    Projection,
}

impl Scenario {
    /// Token that appears in the data file names.
    pub fn file_token(self) -> &'static str {
        match self {
            Scenario::Historical => "hist",
            Scenario::Projection => "ssp370",
        }
    }

    /// Suffix of the model-set directory name.
    pub fn set_suffix(self) -> &'static str {
        match self {
            Scenario::Historical => "historical_bc",
            Scenario::Projection => "ssp370_bc",
        }
    }

    /// The dates the scenario covers.
    ///
    /// Historical runs span 1980-09-01 through 2013-12-31, projections
    /// 2014-01-01 through 2099-12-31.
    pub fn span(self) -> DateSpan {
        let (start, end) = match self {
            Scenario::Historical => (ymd(1980, 9, 1), ymd(2014, 1, 1)),
            Scenario::Projection => (ymd(2014, 1, 1), ymd(2100, 1, 1)),
        };
        DateSpan::new(start, end).expect("scenario span is ordered")
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// Indices of the days that fall inside a scenario's span.
///
/// The returned index list subsets both the day axis and any data array
/// aligned with it.
pub fn screen_days(days: &[NaiveDate], scenario: Scenario) -> Vec<usize> {
    let span = scenario.span();
    days.iter()
        .enumerate()
        .filter(|(_, day)| span.contains(**day))
        .map(|(i, _)| i)
        .collect()
}

/// Parses one WRF day coordinate.
///
/// Day values are nominal `YYYYMMDD` numbers stored as floats
/// (`19800901.0`). A model on a no-leap calendar can emit a day-of-month
/// the real month does not have; those clamp to day 28.
///
/// # Errors
///
/// Returns [`IoError::InvalidTime`] when the value is not an 8-digit date
/// number or names a month outside 1 through 12.
pub fn parse_wrf_day(value: f64) -> Result<NaiveDate, IoError> {
    if !value.is_finite() {
        return Err(IoError::InvalidTime {
            reason: format!("day value {value} is not finite"),
        });
    }
    let raw = value.trunc() as i64;
    if !(10_000_000..=99_999_999).contains(&raw) {
        return Err(IoError::InvalidTime {
            reason: format!("day value {raw} does not have 8 digits"),
        });
    }
    let year = (raw / 10_000) as i32;
    let month = ((raw / 100) % 100) as u32;
    let day = (raw % 100) as u32;
    if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
        return Ok(date);
    }
    NaiveDate::from_ymd_opt(year, month, 28).ok_or_else(|| IoError::InvalidTime {
        reason: format!("day value {raw} has no valid month"),
    })
}

/// Parses a whole day axis.
pub fn parse_wrf_days(values: &[f64]) -> Result<Vec<NaiveDate>, IoError> {
    values.iter().map(|v| parse_wrf_day(*v)).collect()
}

/// Reads and parses the `day` axis of one WRF data file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist,
/// [`IoError::MissingVariable`] if it has no `day` variable, and
/// [`IoError::InvalidTime`] if a day value fails to parse.
pub fn read_day_axis(path: &Path) -> Result<Vec<NaiveDate>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = netcdf::open(path)?;
    let var = file
        .variable("day")
        .ok_or_else(|| IoError::MissingVariable {
            name: "day".to_string(),
            path: path.to_path_buf(),
        })?;
    let values = var.get_values::<f64, _>(..)?;
    parse_wrf_days(&values)
}

/// Lists the bias-corrected model sets (`*_bc` directories) under `wrfdir`,
/// sorted by name.
///
/// # Errors
///
/// Returns [`IoError::Directory`] if the listing fails and
/// [`IoError::NoMatchingFiles`] if no set is present.
pub fn list_bc_model_sets(wrfdir: &Path) -> Result<Vec<String>, IoError> {
    let dir_err = |e: std::io::Error| IoError::Directory {
        path: wrfdir.to_path_buf(),
        reason: e.to_string(),
    };
    let mut sets = Vec::new();
    for entry in fs::read_dir(wrfdir).map_err(dir_err)? {
        let entry = entry.map_err(dir_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().is_ok_and(|t| t.is_dir()) && name.ends_with("_bc") {
            sets.push(name);
        }
    }
    sets.sort();
    if sets.is_empty() {
        return Err(IoError::NoMatchingFiles {
            dir: wrfdir.to_path_buf(),
            pattern: "*_bc".to_string(),
        });
    }
    debug!(n_sets = sets.len(), "listed bias-corrected model sets");
    Ok(sets)
}

/// Directory holding one model set's postprocessed series.
pub fn model_set_dir(wrfdir: &Path, model: &str, variant: &str, scenario: Scenario) -> PathBuf {
    wrfdir
        .join(format!("{model}_{variant}_{}", scenario.set_suffix()))
        .join("postprocess")
}

/// Finds a variable's data files within one model set.
///
/// Files live under `<dir>/<domain>` and match on the `<var>.` name prefix
/// plus scenario, variant, and domain substrings. Results come back in
/// sorted name order so multi-file sets concatenate deterministically.
///
/// # Errors
///
/// Returns [`IoError::Directory`] if the listing fails and
/// [`IoError::NoMatchingFiles`] if nothing matches.
pub fn find_model_files(
    dir: &Path,
    var: &str,
    scenario: Scenario,
    variant: &str,
    domain: &str,
) -> Result<Vec<PathBuf>, IoError> {
    let search = dir.join(domain);
    let dir_err = |e: std::io::Error| IoError::Directory {
        path: search.clone(),
        reason: e.to_string(),
    };
    let mut names = Vec::new();
    for entry in fs::read_dir(&search).map_err(dir_err)? {
        let entry = entry.map_err(dir_err)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    let prefix = format!("{var}.");
    let matched: Vec<PathBuf> = names
        .iter()
        .filter(|name| {
            name.starts_with(&prefix)
                && name.contains(scenario.file_token())
                && name.contains(variant)
                && name.contains(domain)
        })
        .map(|name| search.join(name))
        .collect();
    if matched.is_empty() {
        return Err(IoError::NoMatchingFiles {
            dir: search,
            pattern: format!(
                "{prefix}*{}*{variant}*{domain}*",
                scenario.file_token()
            ),
        });
    }
    debug!(n_files = matched.len(), var, "matched model data files");
    Ok(matched)
}
