//! Error types for fos-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the fos-io crate.
///
/// This enum covers filesystem failures, CSV and GeoJSON parse problems,
/// NetCDF errors, WRF file-discovery misses, and malformed cells in the
/// daily station tables.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a directory listing fails.
    #[error("cannot read directory {}: {reason}", path.display())]
    Directory {
        /// Directory that could not be listed.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a file search over a directory matches nothing.
    #[error("no files matching '{pattern}' in {}", dir.display())]
    NoMatchingFiles {
        /// Directory that was searched.
        dir: PathBuf,
        /// Pattern the search was looking for.
        pattern: String,
    },

    /// Wraps an error originating from the CSV reader or writer.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// File being read or written.
        path: PathBuf,
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps an error originating from the GeoJSON parser.
    #[error("json error in {}: {reason}", path.display())]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Description of the underlying JSON failure.
        reason: String,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a date cell cannot be parsed.
    #[error("unparseable date '{value}' in {}", path.display())]
    InvalidDate {
        /// File the cell came from.
        path: PathBuf,
        /// The offending cell text.
        value: String,
    },

    /// Returned when a numeric cell cannot be parsed.
    #[error("unparseable number '{value}' in column '{column}' of {}", path.display())]
    InvalidNumber {
        /// File the cell came from.
        path: PathBuf,
        /// Column the cell belongs to.
        column: String,
        /// The offending cell text.
        value: String,
    },

    /// Returned when a time value cannot be parsed or is out of range.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// Returned when a structural check on loaded data fails.
    #[error("validation failed: {reason}")]
    Validation {
        /// Description of the failed check.
        reason: String,
    },

    /// Wraps an error originating from the fos-series crate.
    #[error("series error: {reason}")]
    Series {
        /// Description of the underlying series failure.
        reason: String,
    },

    /// Wraps an error originating from the fos-basins crate.
    #[error("basin error: {reason}")]
    Basin {
        /// Description of the underlying basin failure.
        reason: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<fos_series::SeriesError> for IoError {
    fn from(e: fos_series::SeriesError) -> Self {
        IoError::Series {
            reason: e.to_string(),
        }
    }
}

impl From<fos_basins::BasinError> for IoError {
    fn from(e: fos_basins::BasinError) -> Self {
        IoError::Basin {
            reason: e.to_string(),
        }
    }
}
