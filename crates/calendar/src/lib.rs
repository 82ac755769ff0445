//! # fos-calendar
//!
//! Water-year date arithmetic for the fate-of-SNOTEL toolkit.
//!
//! A water year runs October 1 through September 30 and is labeled by the
//! calendar year in which it ends. Everything downstream (peak extraction,
//! windowing, cross-year comparison of peak dates) leans on the two axes
//! defined here: the water-year label and the day-of-water-year offset.
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use fos_calendar::{shift_to_dowy, water_year, water_year_span};
//!
//! let date = NaiveDate::from_ymd_opt(2000, 10, 1).unwrap();
//! assert_eq!(water_year(date), 2001); // October rolls into WY 2001
//!
//! let (start, end) = water_year_span(2001).unwrap();
//! assert_eq!(start, NaiveDate::from_ymd_opt(2000, 10, 1).unwrap());
//! assert_eq!(end, NaiveDate::from_ymd_opt(2001, 10, 1).unwrap());
//!
//! // Jan 1 of the reference year sits 92 days into its water year.
//! assert_eq!(shift_to_dowy(0).unwrap(), 92);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `water_year` | Water-year labeling and date spans |
//! | `dowy` | Day-of-water-year normalization |
//! | `error` | Error types |

mod dowy;
mod error;
mod water_year;

pub use dowy::{REFERENCE_YEAR, shift_to_dowy};
pub use error::CalendarError;
pub use water_year::{WATER_YEAR_START_MONTH, water_year, water_year_span};
