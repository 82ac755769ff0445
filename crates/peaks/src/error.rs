//! Error types for the fos-peaks crate.

use fos_calendar::CalendarError;
use fos_series::SeriesError;

/// Error type for all fallible operations in the fos-peaks crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PeaksError {
    /// Returned when the requested variable is absent from the frame.
    #[error("series error: {0}")]
    Series(#[from] SeriesError),

    /// Returned when a water-year window cannot be expressed as dates.
    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),
}
