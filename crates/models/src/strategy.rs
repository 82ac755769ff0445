//! Forecast strategies and their training step.

use fos_series::DailyFrame;
use ndarray::Array2;

use crate::error::ModelError;
use crate::fit_apply::TRAIN_WINDOW;
use crate::fitted::{FittedInner, FittedModel, LinearFit};
use crate::ols;
use crate::params::ModelParams;
use crate::poly;

/// A recipe for turning station series into a stand-in for the gridded
/// series. Fitting consumes the training window; the resulting
/// [`FittedModel`] can then be applied to any window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Passes the paired forcing column through unchanged.
    Identity,
    /// Adds the training-period mean bias to the paired forcing column.
    MeanOffset,
    /// Predicts the training-period forcing mean everywhere.
    TrainingMean,
    /// Ordinary least squares on the forcing columns, intercept included.
    LinearRegression,
    /// Least squares on a monomial expansion of the forcing columns. The
    /// expansion carries its own constant term, so no intercept is added.
    Polynomial { degree: usize },
}

impl Strategy {
    /// Stable name used in output tables, plot captions, and logs.
    pub fn name(&self) -> String {
        match self {
            Strategy::Identity => "identity".to_string(),
            Strategy::MeanOffset => "mean_offset".to_string(),
            Strategy::TrainingMean => "training_mean".to_string(),
            Strategy::LinearRegression => "linear_regression".to_string(),
            Strategy::Polynomial { degree } => format!("polynomial_regression_d{degree}"),
        }
    }

    /// The full strategy roster in evaluation order, with the polynomial
    /// member at the given degree.
    pub fn roster(degree: usize) -> Vec<Strategy> {
        vec![
            Strategy::Identity,
            Strategy::MeanOffset,
            Strategy::TrainingMean,
            Strategy::LinearRegression,
            Strategy::Polynomial { degree },
        ]
    }

    /// Fits this strategy on the training window.
    ///
    /// `forcing` and `obs` must cover the same dates. Non-finite samples are
    /// ignored by the mean strategies and dropped row-wise by the regression
    /// strategies.
    ///
    /// # Errors
    ///
    /// Fit failures are surfaced rather than swallowed: degenerate training
    /// data reports [`ModelError::EmptyMean`],
    /// [`ModelError::InsufficientData`] or [`ModelError::SingularSystem`]
    /// depending on the strategy.
    pub fn fit(
        &self,
        forcing: &DailyFrame,
        obs: &DailyFrame,
        params: &ModelParams,
    ) -> Result<FittedModel, ModelError> {
        params.validate()?;
        if forcing.len() != obs.len() {
            return Err(ModelError::WindowMismatch {
                window: TRAIN_WINDOW.to_string(),
                obs_len: obs.len(),
                forcing_len: forcing.len(),
            });
        }
        if forcing.dates() != obs.dates() {
            return Err(ModelError::WindowMisaligned {
                window: TRAIN_WINDOW.to_string(),
            });
        }

        let inner = match self {
            Strategy::Identity => FittedInner::Identity,
            Strategy::MeanOffset => {
                let mut offsets = Vec::with_capacity(params.nvars());
                for (var, fvar) in params.vars().iter().zip(params.fvars()) {
                    let obs_mean = require_mean(obs.column(var)?, var)?;
                    let forcing_mean = require_mean(forcing.column(fvar)?, fvar)?;
                    offsets.push(obs_mean - forcing_mean);
                }
                FittedInner::Offset(offsets)
            }
            Strategy::TrainingMean => {
                // The constant is the forcing mean, not the observed mean:
                // the station climatology is carried forward untouched.
                let mut values = Vec::with_capacity(params.nvars());
                for fvar in params.fvars() {
                    values.push(require_mean(forcing.column(fvar)?, fvar)?);
                }
                FittedInner::Constant(values)
            }
            Strategy::LinearRegression => {
                let features = feature_columns(forcing, params)?;
                let mut fits = Vec::with_capacity(params.vars().len());
                for var in params.vars() {
                    let (x, y) = design_with_intercept(&features, obs.column(var)?);
                    let coeffs = ols::solve_least_squares(&x, &y)?;
                    fits.push(LinearFit::new(coeffs[0], coeffs[1..].to_vec()));
                }
                FittedInner::Linear(fits)
            }
            Strategy::Polynomial { degree } => {
                if *degree == 0 {
                    return Err(ModelError::InvalidParams {
                        reason: "polynomial degree must be at least 1".to_string(),
                    });
                }
                let features = feature_columns(forcing, params)?;
                let exponents = poly::monomial_exponents(features.len(), *degree);
                let mut fits = Vec::with_capacity(params.vars().len());
                for var in params.vars() {
                    let (x, y) = design_expanded(&features, obs.column(var)?, &exponents);
                    fits.push(ols::solve_least_squares(&x, &y)?);
                }
                FittedInner::Polynomial { exponents, fits }
            }
        };
        Ok(FittedModel::new(self.clone(), params, inner))
    }
}

fn require_mean(values: &[f64], variable: &str) -> Result<f64, ModelError> {
    fos_stats::nan_mean(values).ok_or_else(|| ModelError::EmptyMean {
        window: TRAIN_WINDOW.to_string(),
        variable: variable.to_string(),
    })
}

fn feature_columns<'a>(
    forcing: &'a DailyFrame,
    params: &ModelParams,
) -> Result<Vec<&'a [f64]>, ModelError> {
    params
        .fvars()
        .iter()
        .map(|fvar| forcing.column(fvar).map_err(ModelError::from))
        .collect()
}

/// Row indices where the target and every feature are finite.
fn finite_rows(features: &[&[f64]], target: &[f64]) -> Vec<usize> {
    (0..target.len())
        .filter(|&t| target[t].is_finite() && features.iter().all(|col| col[t].is_finite()))
        .collect()
}

fn design_with_intercept(features: &[&[f64]], target: &[f64]) -> (Array2<f64>, Vec<f64>) {
    let keep = finite_rows(features, target);
    let k = features.len() + 1;
    let mut x = Array2::zeros((keep.len(), k));
    let mut y = Vec::with_capacity(keep.len());
    for (r, &t) in keep.iter().enumerate() {
        x[[r, 0]] = 1.0;
        for (j, col) in features.iter().enumerate() {
            x[[r, j + 1]] = col[t];
        }
        y.push(target[t]);
    }
    (x, y)
}

fn design_expanded(
    features: &[&[f64]],
    target: &[f64],
    exponents: &[Vec<u32>],
) -> (Array2<f64>, Vec<f64>) {
    let keep = finite_rows(features, target);
    let mut x = Array2::zeros((keep.len(), exponents.len()));
    let mut y = Vec::with_capacity(keep.len());
    let mut point = vec![0.0; features.len()];
    for (r, &t) in keep.iter().enumerate() {
        for (j, col) in features.iter().enumerate() {
            point[j] = col[t];
        }
        for (j, term) in poly::expand_row(&point, exponents).iter().enumerate() {
            x[[r, j]] = *term;
        }
        y.push(target[t]);
    }
    (x, y)
}
