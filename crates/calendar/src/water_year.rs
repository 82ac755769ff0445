//! Water-year labeling and date spans.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// First month of the water year (October), US hydrological convention.
pub const WATER_YEAR_START_MONTH: u32 = 10;

/// Returns the water year a calendar date belongs to.
///
/// A water year runs Oct 1 through Sep 30 and is labeled by the calendar
/// year in which it ends, so October through December dates carry the next
/// year's label.
///
/// # Examples
///
/// ```ignore
/// let oct = NaiveDate::from_ymd_opt(2000, 10, 1).unwrap();
/// assert_eq!(water_year(oct), 2001);
///
/// let sep = NaiveDate::from_ymd_opt(2001, 9, 30).unwrap();
/// assert_eq!(water_year(sep), 2001);
/// ```
pub fn water_year(date: NaiveDate) -> i32 {
    if date.month() >= WATER_YEAR_START_MONTH {
        date.year() + 1
    } else {
        date.year()
    }
}

/// Returns the half-open span `[Oct 1 of wy-1, Oct 1 of wy)` covering water
/// year `wy`.
///
/// # Errors
///
/// Returns [`CalendarError::YearOutOfRange`] if either endpoint falls
/// outside chrono's representable date range.
pub fn water_year_span(wy: i32) -> Result<(NaiveDate, NaiveDate), CalendarError> {
    let start = NaiveDate::from_ymd_opt(wy - 1, WATER_YEAR_START_MONTH, 1)
        .ok_or(CalendarError::YearOutOfRange { year: wy })?;
    let end = NaiveDate::from_ymd_opt(wy, WATER_YEAR_START_MONTH, 1)
        .ok_or(CalendarError::YearOutOfRange { year: wy })?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn october_first_rolls_forward() {
        assert_eq!(water_year(d(2000, 10, 1)), 2001);
    }

    #[test]
    fn september_thirtieth_stays() {
        assert_eq!(water_year(d(2001, 9, 30)), 2001);
    }

    #[test]
    fn all_months() {
        for month in 1..=9 {
            assert_eq!(water_year(d(2000, month, 15)), 2000, "month {month}");
        }
        for month in 10..=12 {
            assert_eq!(water_year(d(2000, month, 15)), 2001, "month {month}");
        }
    }

    #[test]
    fn negative_years() {
        assert_eq!(water_year(d(-100, 10, 1)), -99);
        assert_eq!(water_year(d(-1, 1, 1)), -1);
        assert_eq!(water_year(d(0, 12, 31)), 1);
    }

    #[test]
    fn span_endpoints() {
        let (start, end) = water_year_span(2001).unwrap();
        assert_eq!(start, d(2000, 10, 1));
        assert_eq!(end, d(2001, 10, 1));
    }

    #[test]
    fn span_length_non_leap() {
        // WY 2001 covers Oct 2000 through Sep 2001; no Feb 29 inside.
        let (start, end) = water_year_span(2001).unwrap();
        assert_eq!((end - start).num_days(), 365);
    }

    #[test]
    fn span_length_leap() {
        // WY 2004 contains Feb 29, 2004.
        let (start, end) = water_year_span(2004).unwrap();
        assert_eq!((end - start).num_days(), 366);
    }

    #[test]
    fn span_out_of_range() {
        assert_eq!(
            water_year_span(300_000).unwrap_err(),
            CalendarError::YearOutOfRange { year: 300_000 }
        );
    }

    #[test]
    fn label_matches_span() {
        // Every date inside a water year's span carries that label.
        let (start, end) = water_year_span(1995).unwrap();
        let mut date = start;
        while date < end {
            assert_eq!(water_year(date), 1995, "{date}");
            date = date.succ_opt().expect("within range");
        }
    }
}
