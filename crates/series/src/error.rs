//! Error types for the fos-series crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the fos-series crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when a column's length differs from the date axis length.
    #[error("column '{column}' has {values} values for {dates} dates")]
    LengthMismatch {
        /// Name of the offending column.
        column: String,
        /// Length of the date axis.
        dates: usize,
        /// Length of the column.
        values: usize,
    },

    /// Returned when the date axis is not strictly increasing.
    #[error("date axis is not strictly increasing at position {position} ({date})")]
    UnsortedDates {
        /// Index of the first date that does not increase.
        position: usize,
        /// The offending date.
        date: NaiveDate,
    },

    /// Returned when a named column does not exist in the frame.
    #[error("column '{name}' not found (available: {available:?})")]
    MissingColumn {
        /// The requested column name.
        name: String,
        /// The column names the frame actually has.
        available: Vec<String>,
    },

    /// Returned when inserting or renaming would clobber an existing column.
    #[error("column '{name}' already exists")]
    DuplicateColumn {
        /// The colliding column name.
        name: String,
    },

    /// Returned when a date span or window set fails validation.
    #[error("invalid window: {reason}")]
    InvalidWindow {
        /// Human-readable description of the failed check.
        reason: String,
    },
}
