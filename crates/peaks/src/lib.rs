//! # fos-peaks
//!
//! Per-water-year peak extraction from daily SWE series.
//!
//! For every whole water year strictly inside a series' calendar-year span,
//! [`water_year_peaks`] finds the maximum value, its date, and its position
//! within that water year's window. Missing samples are ignored; water
//! years with no usable samples are skipped rather than reported as NaN
//! rows.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fos_peaks::water_year_peaks;
//!
//! let peaks = water_year_peaks(&frame, "SWE")?;
//! for peak in &peaks {
//!     println!("WY {}: {:.1} in on {}", peak.water_year(), peak.value(), peak.date());
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `extract` | Peak records and the extraction routine |
//! | `error` | Error types |

mod error;
mod extract;

pub use error::PeaksError;
pub use extract::{WaterYearPeak, water_year_peaks};
