//! # fos-plot
//!
//! Diagnostic figures for the toolkit: per-window observed-vs-simulated
//! panels for a fitted strategy, peak scatter comparisons, peak-difference
//! histograms, and per-water-year summary lines. Everything renders to PNG
//! through `plotters`.

mod bins;
mod error;
mod figures;

pub use bins::bin_counts;
pub use error::PlotError;
pub use figures::{FIGURE_SIZE, histogram, model_windows, scatter_compare, year_line};
