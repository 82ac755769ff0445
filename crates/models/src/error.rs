use thiserror::Error;

/// Errors produced while fitting a strategy or assembling model output.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A named evaluation window was absent from the forcing or observed set.
    #[error("window '{name}' missing from {side} frames")]
    MissingWindow { name: String, side: &'static str },

    /// Observed and forcing frames disagree on length inside one window.
    #[error(
        "window '{window}' is misaligned: observed has {obs_len} rows, forcing has {forcing_len}"
    )]
    WindowMismatch {
        window: String,
        obs_len: usize,
        forcing_len: usize,
    },

    /// Observed and forcing frames cover different dates inside one window.
    #[error("window '{window}' covers different dates in the observed and forcing frames")]
    WindowMisaligned { window: String },

    /// A variable was requested that the fitted model does not know about.
    #[error("variable '{name}' was not part of the fitted variable set")]
    UnknownVariable { name: String },

    /// Parameters failed validation before fitting.
    #[error("invalid model parameters: {reason}")]
    InvalidParams { reason: String },

    /// A training mean was requested over a window with no finite samples.
    #[error("no finite training samples for '{variable}' in window '{window}'")]
    EmptyMean { window: String, variable: String },

    /// Too few finite training rows to determine the regression coefficients.
    #[error("regression needs at least {needed} finite training rows, found {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The normal equations were singular and no coefficients could be recovered.
    #[error("normal equations are singular ({size} unknowns); training data may be degenerate")]
    SingularSystem { size: usize },

    /// The stacked output could not be reshaped into rows of `nvars` columns.
    #[error("cannot reshape {len} stacked values into rows of {nvars} columns")]
    ShapeMismatch { len: usize, nvars: usize },

    /// Errors raised by the underlying daily frames.
    #[error(transparent)]
    Series(#[from] fos_series::SeriesError),
}
