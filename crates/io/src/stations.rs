//! SNOTEL station metadata.

use std::path::Path;

use chrono::NaiveDate;
use geo::{Point, point};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::IoError;

/// One row of the station metadata table.
///
/// The table carries more columns than we read; anything not named here is
/// ignored by the deserializer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Station {
    site_name: String,
    elev: f64,
    site_number: u32,
    state: String,
    startdt: NaiveDate,
    lon: f64,
    lat: f64,
}

impl Station {
    /// The station display name, as recorded in the table.
    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Station elevation in feet.
    pub fn elev(&self) -> f64 {
        self.elev
    }

    /// The numeric SNOTEL site identifier.
    pub fn site_number(&self) -> u32 {
        self.site_number
    }

    /// Two-letter state code.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// First date with data at the station.
    pub fn startdt(&self) -> NaiveDate {
        self.startdt
    }

    /// Longitude in degrees east.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in degrees north.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Station location as a lon/lat point.
    pub fn point(&self) -> Point<f64> {
        point!(x: self.lon, y: self.lat)
    }

    /// Site name with spaces and parentheses removed, the token used in
    /// per-station WRF series file names (`wrfpoint_<token>.csv`).
    pub fn file_token(&self) -> String {
        self.site_name
            .chars()
            .filter(|c| !matches!(c, ' ' | '(' | ')'))
            .collect()
    }
}

/// Reads the station metadata table from `path`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist,
/// [`IoError::Csv`] if a row fails to parse, and [`IoError::Validation`]
/// if the table has no rows.
pub fn read_station_table(path: &Path) -> Result<Vec<Station>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::Reader::from_path(path).map_err(|e| IoError::Csv {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut stations = Vec::new();
    for row in reader.deserialize() {
        let station: Station = row.map_err(|e| IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        stations.push(station);
    }
    if stations.is_empty() {
        return Err(IoError::Validation {
            reason: format!("station table {} has no rows", path.display()),
        });
    }
    info!(n_stations = stations.len(), "read station metadata table");
    Ok(stations)
}

/// Drops stations whose state code appears in `exclude`.
///
/// The Alaska stations sit outside the WRF domain, so the peak analysis
/// runs with `exclude = ["AK"]`.
pub fn filter_states(stations: Vec<Station>, exclude: &[String]) -> Vec<Station> {
    let n_before = stations.len();
    let kept: Vec<Station> = stations
        .into_iter()
        .filter(|s| !exclude.iter().any(|x| x == s.state()))
        .collect();
    debug!(
        n_before,
        n_after = kept.len(),
        "filtered stations by state"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    const META: &str = "\
site_name,elev,site_number,state,namestr,startdt,lon,lat
Mud Flat (301),5730,301,ID,MudFlat301,1980-07-01,-116.75,42.58
Atigun Pass (957),4800,957,AK,AtigunPass957,1983-08-01,-149.48,68.13
Banner Summit,7040,312,ID,BannerSummit,1978-10-01,-115.23,44.3
";

    fn sample_stations() -> Vec<Station> {
        let mut reader = csv::Reader::from_reader(META.as_bytes());
        reader
            .deserialize()
            .collect::<Result<Vec<Station>, _>>()
            .unwrap()
    }

    #[test]
    fn deserialize_ignores_extra_columns() {
        let stations = sample_stations();
        assert_eq!(stations.len(), 3);
        assert_eq!(stations[0].site_name(), "Mud Flat (301)");
        assert_eq!(stations[0].site_number(), 301);
        assert_eq!(stations[0].state(), "ID");
        assert_eq!(stations[0].elev(), 5730.0);
        assert_eq!(
            stations[0].startdt(),
            NaiveDate::from_ymd_opt(1980, 7, 1).unwrap()
        );
    }

    #[test]
    fn point_maps_lon_to_x() {
        let stations = sample_stations();
        let p = stations[0].point();
        assert_eq!(p.x(), -116.75);
        assert_eq!(p.y(), 42.58);
    }

    #[test]
    fn file_token_strips_spaces_and_parens() {
        let stations = sample_stations();
        assert_eq!(stations[0].file_token(), "MudFlat301");
        assert_eq!(stations[2].file_token(), "BannerSummit");
    }

    #[test]
    fn filter_states_drops_alaska() {
        let stations = filter_states(sample_stations(), &["AK".to_string()]);
        assert_eq!(stations.len(), 2);
        assert!(stations.iter().all(|s| s.state() != "AK"));
    }

    #[test]
    fn filter_states_empty_exclude_keeps_all() {
        let stations = filter_states(sample_stations(), &[]);
        assert_eq!(stations.len(), 3);
    }
}
