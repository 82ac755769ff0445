//! Integration tests for the shared water-year axis.

use chrono::NaiveDate;
use fos_calendar::{REFERENCE_YEAR, shift_to_dowy, water_year, water_year_span};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

#[test]
fn all_months_october_boundary() {
    // Months 1-9 keep the calendar year's label, months 10-12 roll forward.
    for month in 1..=9_u32 {
        assert_eq!(
            water_year(d(2000, month, 1)),
            2000,
            "month {month} should stay in WY 2000"
        );
    }
    for month in 10..=12_u32 {
        assert_eq!(
            water_year(d(2000, month, 1)),
            2001,
            "month {month} should roll into WY 2001"
        );
    }
}

#[test]
fn span_is_half_open() {
    let (start, end) = water_year_span(1990).unwrap();
    assert_eq!(water_year(start), 1990);
    assert_eq!(water_year(end), 1991);
    // The day before `end` is the last date of the water year.
    assert_eq!(water_year(end.pred_opt().unwrap()), 1990);
}

#[test]
fn consecutive_spans_tile_the_calendar() {
    for wy in 1980..1990 {
        let (_, end) = water_year_span(wy).unwrap();
        let (next_start, _) = water_year_span(wy + 1).unwrap();
        assert_eq!(end, next_start, "WY {wy} must abut WY {}", wy + 1);
    }
}

#[test]
fn dowy_tracks_reference_year_dates() {
    // Walking the reference year day by day, the day-of-water-year offset
    // advances with the date and resets at Oct 1.
    let jan1 = d(REFERENCE_YEAR, 1, 1);
    for doy in 0..365_i64 {
        let date = jan1 + chrono::Days::new(doy as u64);
        let dowy = shift_to_dowy(doy).unwrap();
        if date < d(REFERENCE_YEAR, 10, 1) {
            assert_eq!(dowy, (date - d(REFERENCE_YEAR - 1, 10, 1)).num_days());
        } else {
            assert_eq!(dowy, (date - d(REFERENCE_YEAR, 10, 1)).num_days());
        }
    }
}

#[test]
fn dowy_pinned_values() {
    assert_eq!(shift_to_dowy(0).unwrap(), 92);
    assert_eq!(shift_to_dowy(90).unwrap(), 182); // Apr 1
    assert_eq!(shift_to_dowy(273).unwrap(), 0); // Oct 1
    assert_eq!(shift_to_dowy(364).unwrap(), 91); // Dec 31
}
