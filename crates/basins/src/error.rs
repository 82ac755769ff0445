//! Error types for the fos-basins crate.

/// Error type for all fallible operations in the fos-basins crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BasinError {
    /// Returned when a layer fails construction-time validation.
    #[error("invalid watershed layer '{label}': {reason}")]
    InvalidLayer {
        /// The layer label (e.g. `huc6`).
        label: String,
        /// Human-readable description of the failed check.
        reason: String,
    },

    /// Returned when no watershed in the layer contains a point.
    #[error("point ({lon}, {lat}) is outside every watershed in layer '{label}'")]
    NoContainingBasin {
        /// Longitude of the unassigned point.
        lon: f64,
        /// Latitude of the unassigned point.
        lat: f64,
        /// The layer that was searched.
        label: String,
    },
}
