//! Peak records and the per-water-year extraction routine.

use chrono::{Datelike, NaiveDate};
use fos_calendar::water_year_span;
use fos_series::DailyFrame;

use crate::error::PeaksError;

/// The peak of one water year: value, date, and position inside the
/// water-year window.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterYearPeak {
    water_year: i32,
    value: f64,
    date: NaiveDate,
    index: usize,
}

impl WaterYearPeak {
    /// The water-year label (year in which the water year ends).
    pub fn water_year(&self) -> i32 {
        self.water_year
    }

    /// The peak value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The date of the peak (first occurrence on ties).
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Position of the peak within the water-year window, counting every
    /// sample present on the axis (missing-value samples included).
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Extracts one peak record per whole water year of `frame[var]`.
///
/// Water years are only evaluated for label years strictly between the
/// series' first and last calendar year, so leading and trailing partial
/// years never produce records. Within each water-year window
/// `[Oct 1 wy-1, Oct 1 wy)`:
///
/// - a window with no samples on the axis is skipped;
/// - missing (`NaN`) samples are ignored when locating the maximum, and a
///   window with only missing samples is skipped too;
/// - ties resolve to the first occurrence.
///
/// # Errors
///
/// Returns [`PeaksError::Series`] if `var` is not a column of `frame`, and
/// [`PeaksError::Calendar`] if a window falls outside the representable
/// date range.
pub fn water_year_peaks(frame: &DailyFrame, var: &str) -> Result<Vec<WaterYearPeak>, PeaksError> {
    let values = frame.column(var)?;
    let dates = frame.dates();
    let (Some(first), Some(last)) = (frame.first_date(), frame.last_date()) else {
        return Ok(Vec::new());
    };

    let mut peaks = Vec::new();
    for wy in (first.year() + 1)..last.year() {
        let (start, end) = water_year_span(wy)?;
        let lo = dates.partition_point(|d| *d < start);
        let hi = dates.partition_point(|d| *d < end);
        if lo == hi {
            continue;
        }

        let mut best: Option<(usize, f64)> = None;
        for (offset, &v) in values[lo..hi].iter().enumerate() {
            if v.is_nan() {
                continue;
            }
            match best {
                Some((_, bv)) if v > bv => best = Some((offset, v)),
                None => best = Some((offset, v)),
                _ => {}
            }
        }
        let Some((offset, value)) = best else {
            continue;
        };

        peaks.push(WaterYearPeak {
            water_year: wy,
            value,
            date: dates[lo + offset],
            index: offset,
        });
    }
    Ok(peaks)
}
