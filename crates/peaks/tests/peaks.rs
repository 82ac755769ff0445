//! Integration tests pinning the peak extractor against brute force.

use chrono::NaiveDate;
use fos_calendar::{water_year, water_year_span};
use fos_peaks::water_year_peaks;
use fos_series::DailyFrame;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

/// A seasonal snowpack-shaped series with noise: builds through winter,
/// melts out by summer.
fn synthetic_swe(start: NaiveDate, end: NaiveDate, seed: u64) -> DailyFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = (end - start).num_days();
    let mut dates = Vec::with_capacity(n as usize);
    let mut values = Vec::with_capacity(n as usize);
    for i in 0..n {
        let date = start + chrono::Days::new(i as u64);
        let (wy_start, _) = water_year_span(water_year(date)).unwrap();
        let dowy = (date - wy_start).num_days() as f64;
        // Triangle: accumulate for 180 days, then melt.
        let base = if dowy < 180.0 {
            dowy / 18.0
        } else {
            (365.0 - dowy).max(0.0) / 18.5
        };
        dates.push(date);
        values.push(base + rng.random::<f64>() * 0.5);
    }
    DailyFrame::from_column(dates, "SWE", values).expect("valid frame")
}

#[test]
fn one_record_per_interior_water_year_with_true_max() {
    let frame = synthetic_swe(d(1984, 1, 1), d(1995, 6, 30), 42);
    let peaks = water_year_peaks(&frame, "SWE").unwrap();

    // Interior years only: 1985..=1994.
    let years: Vec<i32> = peaks.iter().map(|p| p.water_year()).collect();
    assert_eq!(years, (1985..=1994).collect::<Vec<i32>>());

    // Each peak equals the brute-force max over the window, and its date
    // carries that value.
    let values = frame.column("SWE").unwrap();
    for peak in &peaks {
        let (start, end) = water_year_span(peak.water_year()).unwrap();
        let window_max = frame
            .dates()
            .iter()
            .zip(values.iter())
            .filter(|(date, _)| **date >= start && **date < end)
            .map(|(_, v)| *v)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(peak.value(), window_max, "WY {}", peak.water_year());

        let at_date = frame
            .dates()
            .iter()
            .position(|date| *date == peak.date())
            .expect("peak date on axis");
        assert_eq!(values[at_date], peak.value());
    }
}

#[test]
fn peaks_land_in_late_winter() {
    // The triangle shape peaks around day 180 of the water year; extraction
    // should put every peak date in the melt-onset months.
    let frame = synthetic_swe(d(1984, 1, 1), d(1990, 12, 31), 7);
    for peak in water_year_peaks(&frame, "SWE").unwrap() {
        let (start, _) = water_year_span(peak.water_year()).unwrap();
        let dowy = (peak.date() - start).num_days();
        assert!((150..=210).contains(&dowy), "dowy {dowy} out of season");
    }
}
