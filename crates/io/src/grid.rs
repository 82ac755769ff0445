//! WRF coordinate grids.

use std::path::Path;

use ndarray::Array2;
use tracing::debug;

use crate::error::IoError;

/// Static geolocation of one WRF domain: per-cell latitude, longitude, and
/// terrain height on the curvilinear model grid.
#[derive(Debug, Clone)]
pub struct GridCoordinates {
    domain: String,
    lat: Array2<f64>,
    lon: Array2<f64>,
    terrain: Array2<f64>,
}

impl GridCoordinates {
    /// Builds a grid from its coordinate fields.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the three fields do not share one
    /// shape or the grid is empty.
    pub fn new(
        domain: impl Into<String>,
        lat: Array2<f64>,
        lon: Array2<f64>,
        terrain: Array2<f64>,
    ) -> Result<Self, IoError> {
        if lat.dim() != lon.dim() || lat.dim() != terrain.dim() {
            return Err(IoError::Validation {
                reason: format!(
                    "coordinate fields disagree on shape: lat {:?}, lon {:?}, terrain {:?}",
                    lat.dim(),
                    lon.dim(),
                    terrain.dim()
                ),
            });
        }
        if lat.is_empty() {
            return Err(IoError::Validation {
                reason: "coordinate grid is empty".to_string(),
            });
        }
        Ok(Self {
            domain: domain.into(),
            lat,
            lon,
            terrain,
        })
    }

    /// The WRF domain label (`d01`, `d02`).
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Grid shape as (rows, columns), i.e. (south-north, west-east).
    pub fn shape(&self) -> (usize, usize) {
        self.lat.dim()
    }

    /// Per-cell latitude in degrees north.
    pub fn lat(&self) -> &Array2<f64> {
        &self.lat
    }

    /// Per-cell longitude in degrees east.
    pub fn lon(&self) -> &Array2<f64> {
        &self.lon
    }

    /// Per-cell terrain height in metres.
    pub fn terrain(&self) -> &Array2<f64> {
        &self.terrain
    }

    /// Row and column of the cell closest to a lon/lat location, by squared
    /// degree distance.
    ///
    /// Ties keep the first cell in row-major scan order, so repeated calls
    /// always pick the same cell.
    pub fn nearest_cell(&self, lon: f64, lat: f64) -> (usize, usize) {
        let mut best = (0, 0);
        let mut best_dist = f64::INFINITY;
        for ((i, j), cell_lat) in self.lat.indexed_iter() {
            let cell_lon = self.lon[(i, j)];
            let dist = (cell_lon - lon).powi(2) + (cell_lat - lat).powi(2);
            if dist < best_dist {
                best_dist = dist;
                best = (i, j);
            }
        }
        best
    }

    /// Smallest and largest finite terrain height, or `None` when every
    /// cell is missing.
    pub fn terrain_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in self.terrain.iter().filter(|v| v.is_finite()) {
            lo = lo.min(*v);
            hi = hi.max(*v);
        }
        (lo <= hi).then_some((lo, hi))
    }
}

/// Reads the coordinate file for one domain (`wrfinput_<domain>`).
///
/// The geolocation variables `XLAT`, `XLONG`, and `HGT` are stored either
/// flat or with a leading time dimension; with a time dimension only the
/// first plane is kept.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist,
/// [`IoError::MissingVariable`] if a geolocation variable is absent, and
/// [`IoError::Validation`] if a variable is not 2-D or 3-D.
pub fn read_grid_coordinates(coorddir: &Path, domain: &str) -> Result<GridCoordinates, IoError> {
    let path = coorddir.join(format!("wrfinput_{domain}"));
    if !path.exists() {
        return Err(IoError::FileNotFound { path });
    }
    let file = netcdf::open(&path)?;
    let lat = read_plane(&file, "XLAT", &path)?;
    let lon = read_plane(&file, "XLONG", &path)?;
    let terrain = read_plane(&file, "HGT", &path)?;
    let grid = GridCoordinates::new(domain, lat, lon, terrain)?;
    let (rows, cols) = grid.shape();
    debug!(domain, rows, cols, "read coordinate grid");
    Ok(grid)
}

fn read_plane(file: &netcdf::File, name: &str, path: &Path) -> Result<Array2<f64>, IoError> {
    let var = file.variable(name).ok_or_else(|| IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })?;
    let dims: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let (ny, nx) = match dims.as_slice() {
        [ny, nx] => (*ny, *nx),
        [_, ny, nx] => (*ny, *nx),
        other => {
            return Err(IoError::Validation {
                reason: format!(
                    "variable '{name}' in {} has {} dimensions, expected 2 or 3",
                    path.display(),
                    other.len()
                ),
            });
        }
    };
    let mut values = var.get_values::<f64, _>(..)?;
    // with a leading time dimension the first plane is the first ny*nx
    // values in row-major order
    values.truncate(ny * nx);
    Array2::from_shape_vec((ny, nx), values).map_err(|e| IoError::Validation {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample_grid() -> GridCoordinates {
        // 2x3 grid: lat increases north by row, lon increases east by column
        let lat = array![[40.0, 40.0, 40.0], [41.0, 41.0, 41.0]];
        let lon = array![[-117.0, -116.0, -115.0], [-117.0, -116.0, -115.0]];
        let terrain = array![[1200.0, 1400.0, 1600.0], [1100.0, f64::NAN, 2400.0]];
        GridCoordinates::new("d02", lat, lon, terrain).unwrap()
    }

    #[test]
    fn shape_and_accessors() {
        let grid = sample_grid();
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.domain(), "d02");
        assert_eq!(grid.lat()[(1, 0)], 41.0);
        assert_eq!(grid.lon()[(0, 2)], -115.0);
    }

    #[test]
    fn nearest_cell_picks_the_closest() {
        let grid = sample_grid();
        assert_eq!(grid.nearest_cell(-116.1, 40.9), (1, 1));
        assert_eq!(grid.nearest_cell(-117.4, 40.1), (0, 0));
    }

    #[test]
    fn nearest_cell_tie_keeps_scan_order() {
        let grid = sample_grid();
        // equidistant between rows 0 and 1 at column 0
        assert_eq!(grid.nearest_cell(-117.0, 40.5), (0, 0));
    }

    #[test]
    fn terrain_range_skips_missing_cells() {
        let grid = sample_grid();
        assert_eq!(grid.terrain_range(), Some((1100.0, 2400.0)));
    }

    #[test]
    fn terrain_range_all_missing_is_none() {
        let lat = array![[40.0]];
        let lon = array![[-117.0]];
        let terrain = array![[f64::NAN]];
        let grid = GridCoordinates::new("d01", lat, lon, terrain).unwrap();
        assert_eq!(grid.terrain_range(), None);
    }

    #[test]
    fn mismatched_shapes_error() {
        let lat = array![[40.0, 40.0]];
        let lon = array![[-117.0]];
        let terrain = array![[1200.0]];
        let err = GridCoordinates::new("d02", lat, lon, terrain).unwrap_err();
        assert!(matches!(err, IoError::Validation { .. }));
    }
}
