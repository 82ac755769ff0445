//! # fos-io
//!
//! Read station metadata, daily series CSV files, watershed boundary
//! GeoJSON, and WRF NetCDF products; write the analysis output tables.
//! Bridges the on-disk data layout into the toolkit's [`DailyFrame`] and
//! watershed types.
//!
//! [`DailyFrame`]: fos_series::DailyFrame

mod assemble;
mod daily_csv;
mod error;
mod geojson;
mod grid;
mod stations;
mod tables;
mod wrf;

pub use assemble::{
    LoadOutcome, LoadSummary, StationSeries, load_station_series, load_station_set, snotel_path,
    wrf_basin_path, wrf_point_path,
};
pub use daily_csv::read_daily_csv;
pub use error::IoError;
pub use geojson::read_watershed_layer;
pub use grid::{GridCoordinates, read_grid_coordinates};
pub use stations::{Station, filter_states, read_station_table};
pub use tables::{
    AssignmentRow, PeakRow, UNASSIGNED, write_assignment_table, write_peak_table,
};
pub use wrf::{
    MM_TO_IN, Scenario, find_model_files, list_bc_model_sets, model_set_dir, parse_wrf_day,
    parse_wrf_days, read_day_axis, screen_days,
};
