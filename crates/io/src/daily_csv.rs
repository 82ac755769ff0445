//! Daily time-series CSV files.
//!
//! The per-station files are plain CSV with a leading date column and one
//! numeric column per variable. Empty, `NA`, and `NaN` cells become missing
//! values; anything else that fails to parse is an error, not a silent NaN.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use fos_series::DailyFrame;
use tracing::debug;

use crate::error::IoError;

/// Reads a daily series file into a [`DailyFrame`].
///
/// The first column holds ISO dates (a trailing clock time is tolerated,
/// since some upstream tools write one for a daily index). All remaining
/// columns are numeric.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist,
/// [`IoError::Csv`] for structural problems, [`IoError::InvalidDate`] and
/// [`IoError::InvalidNumber`] for unparseable cells, and
/// [`IoError::Series`] if the dates are not strictly increasing.
pub fn read_daily_csv(path: &Path) -> Result<DailyFrame, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let csv_err = |e: csv::Error| IoError::Csv {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    if headers.len() < 2 {
        return Err(IoError::Csv {
            path: path.to_path_buf(),
            reason: "expected a date column and at least one value column".to_string(),
        });
    }
    let names: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut dates = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    for row in reader.records() {
        let record = row.map_err(csv_err)?;
        dates.push(parse_date_cell(record.get(0).unwrap_or(""), path)?);
        for (i, cell) in record.iter().skip(1).enumerate() {
            values[i].push(parse_value_cell(cell, &names[i], path)?);
        }
    }

    let mut columns = BTreeMap::new();
    for (name, column) in names.into_iter().zip(values) {
        if columns.insert(name.clone(), column).is_some() {
            return Err(IoError::Csv {
                path: path.to_path_buf(),
                reason: format!("duplicate column '{name}'"),
            });
        }
    }
    let frame = DailyFrame::new(dates, columns)?;
    debug!(
        path = %path.display(),
        n_rows = frame.len(),
        "read daily series"
    );
    Ok(frame)
}

fn parse_date_cell(cell: &str, path: &Path) -> Result<NaiveDate, IoError> {
    let text = cell.trim();
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Some(prefix) = text.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Ok(d);
        }
    }
    Err(IoError::InvalidDate {
        path: path.to_path_buf(),
        value: cell.to_string(),
    })
}

fn parse_value_cell(cell: &str, column: &str, path: &Path) -> Result<f64, IoError> {
    let text = cell.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("na") || text.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    text.parse::<f64>().map_err(|_| IoError::InvalidNumber {
        path: path.to_path_buf(),
        column: column.to_string(),
        value: cell.to_string(),
    })
}
