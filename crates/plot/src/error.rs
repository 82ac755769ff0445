//! Error types for fos-plot.

/// Error type for figure rendering.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// Returned when a figure has no finite data to draw.
    #[error("empty figure: {reason}")]
    Empty {
        /// What was missing.
        reason: String,
    },

    /// Wraps a drawing-backend failure.
    #[error("draw error: {reason}")]
    Draw {
        /// Description of the underlying failure.
        reason: String,
    },
}
