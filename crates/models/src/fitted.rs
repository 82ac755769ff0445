//! A trained strategy and its application to new windows.

use fos_series::DailyFrame;

use crate::error::ModelError;
use crate::params::ModelParams;
use crate::poly;
use crate::strategy::Strategy;

/// One per-variable linear fit, intercept kept separate from the slopes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LinearFit {
    intercept: f64,
    coeffs: Vec<f64>,
}

impl LinearFit {
    pub(crate) fn new(intercept: f64, coeffs: Vec<f64>) -> Self {
        Self { intercept, coeffs }
    }

    fn predict(&self, point: &[f64]) -> f64 {
        let mut acc = self.intercept;
        for (c, v) in self.coeffs.iter().zip(point) {
            acc += c * v;
        }
        acc
    }
}

/// Strategy-specific fitted state, one entry per observed variable where a
/// per-variable fit exists.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FittedInner {
    Identity,
    Offset(Vec<f64>),
    Constant(Vec<f64>),
    Linear(Vec<LinearFit>),
    Polynomial {
        exponents: Vec<Vec<u32>>,
        fits: Vec<Vec<f64>>,
    },
}

/// A strategy after training: the coefficients plus the variable pairing
/// they were fitted under. Apply it to any window with the same forcing
/// columns the training window had.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    strategy: Strategy,
    vars: Vec<String>,
    fvars: Vec<String>,
    inner: FittedInner,
}

impl FittedModel {
    pub(crate) fn new(strategy: Strategy, params: &ModelParams, inner: FittedInner) -> Self {
        Self {
            strategy,
            vars: params.vars().to_vec(),
            fvars: params.fvars().to_vec(),
            inner,
        }
    }

    /// The strategy this model was fitted from.
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Stable name of the underlying strategy.
    pub fn name(&self) -> String {
        self.strategy.name()
    }

    /// Observed variables this model predicts.
    pub fn vars(&self) -> &[String] {
        &self.vars
    }

    /// Forcing variables this model consumes.
    pub fn fvars(&self) -> &[String] {
        &self.fvars
    }

    /// Predicts `var` over every date of `forcing`.
    ///
    /// The regression strategies predict `NaN` on rows where any forcing
    /// sample is non-finite; the direct strategies pass such samples through
    /// arithmetic unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownVariable`] when `var` was not part of
    /// the fitted pairing, and a column error when `forcing` lacks one of
    /// the fitted forcing variables.
    pub fn apply(&self, forcing: &DailyFrame, var: &str) -> Result<Vec<f64>, ModelError> {
        let idx = self.vars.iter().position(|v| v == var).ok_or_else(|| {
            ModelError::UnknownVariable {
                name: var.to_string(),
            }
        })?;
        match &self.inner {
            FittedInner::Identity => Ok(forcing.column(&self.fvars[idx])?.to_vec()),
            FittedInner::Offset(offsets) => {
                let offset = offsets[idx];
                Ok(forcing
                    .column(&self.fvars[idx])?
                    .iter()
                    .map(|v| v + offset)
                    .collect())
            }
            FittedInner::Constant(values) => Ok(vec![values[idx]; forcing.len()]),
            FittedInner::Linear(fits) => {
                let features = self.feature_columns(forcing)?;
                let fit = &fits[idx];
                Ok(predict_rows(&features, forcing.len(), |point| {
                    fit.predict(point)
                }))
            }
            FittedInner::Polynomial { exponents, fits } => {
                let features = self.feature_columns(forcing)?;
                let coeffs = &fits[idx];
                Ok(predict_rows(&features, forcing.len(), |point| {
                    poly::expand_row(point, exponents)
                        .iter()
                        .zip(coeffs)
                        .map(|(term, c)| term * c)
                        .sum()
                }))
            }
        }
    }

    fn feature_columns<'a>(&self, forcing: &'a DailyFrame) -> Result<Vec<&'a [f64]>, ModelError> {
        self.fvars
            .iter()
            .map(|fvar| forcing.column(fvar).map_err(ModelError::from))
            .collect()
    }
}

/// Evaluates `f` on each row of the feature columns, emitting `NaN` for rows
/// with any non-finite feature.
fn predict_rows(features: &[&[f64]], len: usize, f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    let mut point = vec![0.0; features.len()];
    let mut out = Vec::with_capacity(len);
    for t in 0..len {
        let mut finite = true;
        for (j, col) in features.iter().enumerate() {
            point[j] = col[t];
            finite &= col[t].is_finite();
        }
        out.push(if finite { f(&point) } else { f64::NAN });
    }
    out
}
