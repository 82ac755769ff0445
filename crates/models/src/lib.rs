//! # fos-models
//!
//! Forecast strategies that stand in gridded model output for station
//! observations, fitted on a training window and scored everywhere else.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     A["Strategy::MeanOffset"] -->|".fit(forcing, obs, &params)?"| B["FittedModel"]
//!     B -->|".apply(window, var)?"| C["simulated series"]
//!     D["fit_and_apply(...)"] -->|"all windows"| E["ModelOutput"]
//!     E --> F[".observed_matrix() / .simulated_matrix()"]
//!     E --> G[".segments() — per-window slices"]
//! ```
//!
//! ## Two Usage Paths
//!
//! **Single fit** (one window at a time):
//! ```ignore
//! let fitted = Strategy::LinearRegression.fit(&train_forcing, &train_obs, &params)?;
//! let sim = fitted.apply(&test_forcing, "SWE")?;
//! ```
//!
//! **Stacked evaluation** (every window, ready for scoring):
//! ```ignore
//! let out = fit_and_apply(&strategy, &forcing, &obs, &order, &params)?;
//! for segment in out.segments() {
//!     let nse = fos_stats::nse(out.simulated(segment), out.observed(segment));
//! }
//! ```
//!
//! ## Strategy Roster
//!
//! | Strategy | Fit | Prediction |
//! |----------|-----|------------|
//! | [`Strategy::Identity`] | none | the paired forcing column |
//! | [`Strategy::MeanOffset`] | training mean bias | forcing plus offset |
//! | [`Strategy::TrainingMean`] | training forcing mean | that constant |
//! | [`Strategy::LinearRegression`] | OLS with intercept | linear in the forcing columns |
//! | [`Strategy::Polynomial`] | OLS on monomial terms | polynomial in the forcing columns |

mod error;
mod fit_apply;
mod fitted;
mod output;
mod params;
mod strategy;

pub(crate) mod ols;
pub(crate) mod poly;

pub use error::ModelError;
pub use fit_apply::{TRAIN_WINDOW, fit_and_apply};
pub use fitted::FittedModel;
pub use output::{ModelOutput, WindowSegment};
pub use params::ModelParams;
pub use strategy::Strategy;
