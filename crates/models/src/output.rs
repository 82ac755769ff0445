//! Stacked evaluation output and the segment map into it.

use chrono::NaiveDate;
use ndarray::Array2;

use crate::error::ModelError;

/// Where one `(window, variable)` chunk sits inside the stacked output.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSegment {
    window: String,
    variable: String,
    offset: usize,
    dates: Vec<NaiveDate>,
}

impl WindowSegment {
    pub(crate) fn new(
        window: String,
        variable: String,
        offset: usize,
        dates: Vec<NaiveDate>,
    ) -> Self {
        Self {
            window,
            variable,
            offset,
            dates,
        }
    }

    /// Name of the evaluation window this chunk came from.
    pub fn window(&self) -> &str {
        &self.window
    }

    /// Observed variable this chunk predicts.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Date axis of the chunk, shared by its observed and simulated values.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of samples in the chunk.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the chunk holds no samples.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Observed and simulated values stacked across every window and variable,
/// reshaped into matching `(rows, nvars)` matrices, plus the segment map
/// that slices them back apart.
///
/// Chunks are stacked in window order and, inside each window, in variable
/// order. The matrices exist for whole-evaluation scores; per-window scores
/// and plots go through [`segments`](Self::segments) and the
/// [`observed`](Self::observed) / [`simulated`](Self::simulated) slices.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutput {
    name: String,
    nvars: usize,
    y: Array2<f64>,
    y_hat: Array2<f64>,
    segments: Vec<WindowSegment>,
}

impl ModelOutput {
    /// Reshapes the stacked vectors into `(rows, nvars)` matrices.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ShapeMismatch`] when the stacked length does
    /// not divide evenly into `nvars` columns.
    pub(crate) fn from_stacked(
        name: String,
        nvars: usize,
        y_flat: Vec<f64>,
        y_hat_flat: Vec<f64>,
        segments: Vec<WindowSegment>,
    ) -> Result<Self, ModelError> {
        debug_assert_eq!(y_flat.len(), y_hat_flat.len());
        let len = y_flat.len();
        if nvars == 0 || len % nvars != 0 {
            return Err(ModelError::ShapeMismatch { len, nvars });
        }
        let rows = len / nvars;
        let y = Array2::from_shape_vec((rows, nvars), y_flat)
            .map_err(|_| ModelError::ShapeMismatch { len, nvars })?;
        let y_hat = Array2::from_shape_vec((rows, nvars), y_hat_flat)
            .map_err(|_| ModelError::ShapeMismatch { len, nvars })?;
        Ok(Self {
            name,
            nvars,
            y,
            y_hat,
            segments,
        })
    }

    /// Name of the strategy that produced this output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of columns in the reshaped matrices.
    pub fn nvars(&self) -> usize {
        self.nvars
    }

    /// Number of rows in the reshaped matrices.
    pub fn n_rows(&self) -> usize {
        self.y.nrows()
    }

    /// Observed values, shape `(rows, nvars)`.
    pub fn observed_matrix(&self) -> &Array2<f64> {
        &self.y
    }

    /// Simulated values, same shape as [`observed_matrix`](Self::observed_matrix).
    pub fn simulated_matrix(&self) -> &Array2<f64> {
        &self.y_hat
    }

    /// Every `(window, variable)` chunk in stacking order.
    pub fn segments(&self) -> &[WindowSegment] {
        &self.segments
    }

    /// Looks up the chunk for one window and variable.
    pub fn segment(&self, window: &str, variable: &str) -> Option<&WindowSegment> {
        self.segments
            .iter()
            .find(|s| s.window == window && s.variable == variable)
    }

    /// Observed values of one chunk.
    pub fn observed(&self, segment: &WindowSegment) -> &[f64] {
        let flat = self.y.as_slice().expect("stacked matrix is row major");
        &flat[segment.offset..segment.offset + segment.len()]
    }

    /// Simulated values of one chunk.
    pub fn simulated(&self, segment: &WindowSegment) -> &[f64] {
        let flat = self.y_hat.as_slice().expect("stacked matrix is row major");
        &flat[segment.offset..segment.offset + segment.len()]
    }
}
