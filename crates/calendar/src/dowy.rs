//! Day-of-water-year normalization.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::CalendarError;
use crate::water_year::WATER_YEAR_START_MONTH;

/// Fixed reference year anchoring day-of-year offsets.
pub const REFERENCE_YEAR: i32 = 2002;

/// Converts a day-of-year offset into a day-of-water-year offset.
///
/// `doy` counts days from Jan 1 of [`REFERENCE_YEAR`]. The offset is mapped
/// to a calendar date in the reference year, that date is assigned to a
/// water year (dates before Oct 1 belong to the water year that started the
/// previous October), and the signed day count from that water year's Oct 1
/// start comes back. `shift_to_dowy(0)` is 92: Jan 1 sits 92 days past the
/// previous Oct 1. Peak dates from different calendar years land on this
/// common axis so their timing can be compared directly.
///
/// All arithmetic stays inside the fixed reference year, so offsets taken
/// from leap years drift one day after Feb 28. Downstream outputs pin the
/// current values; the drift stays.
///
/// # Errors
///
/// Returns [`CalendarError::OffsetOutOfRange`] if the offset leaves
/// chrono's representable date range.
pub fn shift_to_dowy(doy: i64) -> Result<i64, CalendarError> {
    let jan1 = NaiveDate::from_ymd_opt(REFERENCE_YEAR, 1, 1).expect("reference Jan 1 is valid");
    let target = if doy >= 0 {
        jan1.checked_add_days(Days::new(doy as u64))
    } else {
        jan1.checked_sub_days(Days::new(doy.unsigned_abs()))
    }
    .ok_or(CalendarError::OffsetOutOfRange { offset: doy })?;

    let start_year = if target.month() < WATER_YEAR_START_MONTH {
        REFERENCE_YEAR - 1
    } else {
        REFERENCE_YEAR
    };
    let wy_start =
        NaiveDate::from_ymd_opt(start_year, WATER_YEAR_START_MONTH, 1).expect("Oct 1 is valid");

    Ok((target - wy_start).num_days())
}
