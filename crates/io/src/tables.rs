//! Output tables.
//!
//! The analysis products are small, wide CSV tables written through serde,
//! one row struct per table.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::error::IoError;

/// One (station, water year) row of the peak table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakRow {
    /// Numeric SNOTEL site identifier.
    pub site_number: u32,
    /// Station display name.
    pub site_name: String,
    /// Water year the peaks belong to.
    pub water_year: i32,
    /// Observed peak SWE, inches.
    pub snotel_peak: f64,
    /// Date of the observed peak.
    pub snotel_peak_date: NaiveDate,
    /// Day of water year of the observed peak.
    pub snotel_peak_dowy: i64,
    /// WRF point-extraction peak, inches.
    pub point_peak: f64,
    /// Date of the point peak.
    pub point_peak_date: NaiveDate,
    /// Day of water year of the point peak.
    pub point_peak_dowy: i64,
    /// WRF basin-average peak, inches.
    pub basin_peak: f64,
    /// Date of the basin peak.
    pub basin_peak_date: NaiveDate,
    /// Day of water year of the basin peak.
    pub basin_peak_dowy: i64,
    /// Point peak minus basin peak, inches.
    pub point_basin_diff: f64,
}

/// One station row of the watershed assignment table.
///
/// Stations outside a layer carry the `unassigned` sentinel instead of a
/// hydrologic-unit code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRow {
    /// Numeric SNOTEL site identifier.
    pub site_number: u32,
    /// Station display name.
    pub site_name: String,
    /// Two-letter state code.
    pub state: String,
    /// Coarse (HUC6) watershed id, or `unassigned`.
    pub huc6: String,
    /// Fine (HUC8) watershed id, or `unassigned`.
    pub huc8: String,
}

/// Sentinel written when no watershed contains a station.
pub const UNASSIGNED: &str = "unassigned";

/// Writes the peak table as CSV.
pub fn write_peak_table(path: &Path, rows: &[PeakRow]) -> Result<(), IoError> {
    write_rows(path, rows)?;
    info!(path = %path.display(), n_rows = rows.len(), "wrote peak table");
    Ok(())
}

/// Writes the watershed assignment table as CSV.
pub fn write_assignment_table(path: &Path, rows: &[AssignmentRow]) -> Result<(), IoError> {
    write_rows(path, rows)?;
    info!(path = %path.display(), n_rows = rows.len(), "wrote assignment table");
    Ok(())
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), IoError> {
    let csv_err = |reason: String| IoError::Csv {
        path: path.to_path_buf(),
        reason,
    };
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_err(e.to_string()))?;
    for row in rows {
        writer.serialize(row).map_err(|e| csv_err(e.to_string()))?;
    }
    writer.flush().map_err(|e| csv_err(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn peak_row_serializes_in_column_order() {
        let row = PeakRow {
            site_number: 301,
            site_name: "Mud Flat (301)".to_string(),
            water_year: 1999,
            snotel_peak: 14.2,
            snotel_peak_date: d(1999, 3, 28),
            snotel_peak_dowy: 178,
            point_peak: 12.9,
            point_peak_date: d(1999, 4, 2),
            point_peak_dowy: 183,
            basin_peak: 16.0,
            basin_peak_date: d(1999, 3, 30),
            basin_peak_dowy: 180,
            point_basin_diff: -3.1,
        };
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&row).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "site_number,site_name,water_year,snotel_peak,snotel_peak_date,snotel_peak_dowy,\
             point_peak,point_peak_date,point_peak_dowy,basin_peak,basin_peak_date,\
             basin_peak_dowy,point_basin_diff"
        );
        let data = lines.next().unwrap();
        assert!(data.starts_with("301,Mud Flat (301),1999,14.2,1999-03-28,178,"));
        assert!(data.ends_with("-3.1"));
    }

    #[test]
    fn assignment_row_carries_sentinels() {
        let row = AssignmentRow {
            site_number: 957,
            site_name: "Atigun Pass (957)".to_string(),
            state: "AK".to_string(),
            huc6: UNASSIGNED.to_string(),
            huc8: UNASSIGNED.to_string(),
        };
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&row).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(text.contains("957,Atigun Pass (957),AK,unassigned,unassigned"));
    }
}
