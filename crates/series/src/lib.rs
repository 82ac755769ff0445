//! # fos-series
//!
//! Daily time-series frames and named window splitting.
//!
//! A [`DailyFrame`] is a strictly-increasing date axis with one or more
//! named value columns; gaps are allowed on the axis and missing samples
//! are `NaN` in the columns. A [`WindowSet`] names disjoint [`DateSpan`]s
//! (train, test, ...) and partitions a frame into per-window sub-frames.
//! Partitioning the forcing frame and the observation frame with the same
//! window set is what keeps the two sides of a model fit time-aligned.
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use fos_series::{DailyFrame, DateSpan, WindowSet};
//!
//! let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
//! let dates = vec![d(2000, 1, 1), d(2000, 1, 2), d(2000, 1, 3)];
//! let frame = DailyFrame::from_column(dates, "SWE", vec![1.0, 2.0, 3.0])?;
//!
//! let windows = WindowSet::new(vec![
//!     ("train".to_string(), DateSpan::new(d(2000, 1, 1), d(2000, 1, 3))?),
//!     ("test".to_string(), DateSpan::new(d(2000, 1, 3), d(2000, 1, 4))?),
//! ])?;
//! let split = windows.partition(&frame);
//! assert_eq!(split["train"].len(), 2);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `frame` | Date-indexed value columns with validation and slicing |
//! | `span` | Half-open date spans |
//! | `window` | Named disjoint windows and frame partitioning |
//! | `error` | Error types |

mod error;
mod frame;
mod span;
mod window;

pub use error::SeriesError;
pub use frame::DailyFrame;
pub use span::DateSpan;
pub use window::WindowSet;
