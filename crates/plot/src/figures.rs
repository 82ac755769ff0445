//! The figure renderers.
//!
//! Every renderer writes a PNG at the caller's path and reports
//! [`PlotError::Empty`] before touching the filesystem when there is
//! nothing to draw.

use std::path::Path;

use chrono::NaiveDate;
use fos_models::ModelOutput;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::info;

use crate::bins::{bin_counts, padded_range};
use crate::error::PlotError;

/// Pixel size of every figure written by this crate.
pub const FIGURE_SIZE: (u32, u32) = (900, 600);

/// Dark grey for observed series.
const OBSERVED_COLOR: RGBColor = RGBColor(169, 169, 169);

/// Blue for simulated series, scatter points, and histogram bars.
const SIMULATED_COLOR: RGBColor = BLUE;

fn draw_reason<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Draw {
        reason: err.to_string(),
    }
}

/// Dates paired with their finite values, in date order. Gaps in the
/// series simply shorten the drawn line.
fn finite_points(dates: &[NaiveDate], values: &[f64]) -> Vec<(NaiveDate, f64)> {
    dates
        .iter()
        .zip(values)
        .filter(|(_, v)| v.is_finite())
        .map(|(date, v)| (*date, *v))
        .collect()
}

/// Renders one panel per evaluation window for a single variable:
/// observed values as a solid grey line, simulated values dashed in
/// blue, with the window's NSE in the panel caption.
pub fn model_windows(
    path: &Path,
    title: &str,
    output: &ModelOutput,
    variable: &str,
) -> Result<(), PlotError> {
    let segments: Vec<_> = output
        .segments()
        .iter()
        .filter(|s| s.variable() == variable)
        .collect();
    if segments.is_empty() {
        return Err(PlotError::Empty {
            reason: format!("no '{variable}' chunks in output '{}'", output.name()),
        });
    }

    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_reason)?;
    let titled = root
        .titled(title, ("sans-serif", 22))
        .map_err(draw_reason)?;
    let panels = titled.split_evenly((segments.len(), 1));

    for (panel, segment) in panels.iter().zip(segments.iter().copied()) {
        if segment.is_empty() {
            continue;
        }
        let observed = output.observed(segment);
        let simulated = output.simulated(segment);
        let dates = segment.dates();
        let first = dates[0];
        let last = dates[dates.len() - 1];
        let span: RangedDate<NaiveDate> = (first..last.succ_opt().unwrap_or(last)).into();
        let (y_lo, y_hi) =
            padded_range(observed.iter().chain(simulated).copied()).unwrap_or((0.0, 1.0));
        let score = fos_stats::nse(simulated, observed)
            .map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));

        let mut chart = ChartBuilder::on(panel)
            .margin(10)
            .caption(
                format!("{} window, NSE {score}", segment.window()),
                ("sans-serif", 16),
            )
            .x_label_area_size(24)
            .y_label_area_size(48)
            .build_cartesian_2d(span, y_lo..y_hi)
            .map_err(draw_reason)?;
        chart
            .configure_mesh()
            .x_labels(6)
            .y_desc(variable)
            .draw()
            .map_err(draw_reason)?;

        chart
            .draw_series(LineSeries::new(
                finite_points(dates, observed),
                OBSERVED_COLOR,
            ))
            .map_err(draw_reason)?
            .label("observed")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], OBSERVED_COLOR));
        chart
            .draw_series(DashedLineSeries::new(
                finite_points(dates, simulated),
                6,
                3,
                SIMULATED_COLOR.into(),
            ))
            .map_err(draw_reason)?
            .label("simulated")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SIMULATED_COLOR));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_reason)?;
    }

    root.present().map_err(draw_reason)?;
    info!(path = %path.display(), model = output.name(), "wrote window figure");
    Ok(())
}

/// Square scatter of paired values with a 1:1 reference line. Pairs with
/// a non-finite member are dropped.
pub fn scatter_compare(
    path: &Path,
    title: &str,
    x_label: &str,
    y_label: &str,
    points: &[(f64, f64)],
) -> Result<(), PlotError> {
    let finite: Vec<(f64, f64)> = points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if finite.is_empty() {
        return Err(PlotError::Empty {
            reason: format!("no finite pairs for '{title}'"),
        });
    }
    // One shared range keeps the 1:1 line at 45 degrees.
    let (lo, hi) = padded_range(finite.iter().flat_map(|&(x, y)| [x, y]))
        .expect("pairs are finite");

    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_reason)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(title, ("sans-serif", 22))
        .x_label_area_size(40)
        .y_label_area_size(48)
        .build_cartesian_2d(lo..hi, lo..hi)
        .map_err(draw_reason)?;
    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()
        .map_err(draw_reason)?;

    chart
        .draw_series(LineSeries::new(vec![(lo, lo), (hi, hi)], BLACK))
        .map_err(draw_reason)?
        .label("1:1")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));
    chart
        .draw_series(
            finite
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, SIMULATED_COLOR.filled())),
        )
        .map_err(draw_reason)?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_reason)?;
    root.present().map_err(draw_reason)?;
    info!(path = %path.display(), n_points = finite.len(), "wrote scatter figure");
    Ok(())
}

/// Histogram of a sample over equal-width bins.
pub fn histogram(
    path: &Path,
    title: &str,
    x_label: &str,
    values: &[f64],
    n_bins: usize,
) -> Result<(), PlotError> {
    let (lo, hi, counts) = bin_counts(values, n_bins).ok_or_else(|| PlotError::Empty {
        reason: format!("no finite values for '{title}'"),
    })?;
    let width = (hi - lo) / counts.len() as f64;
    let y_max = counts.iter().copied().max().unwrap_or(1).max(1) as f64 * 1.05;

    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_reason)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(title, ("sans-serif", 22))
        .x_label_area_size(40)
        .y_label_area_size(48)
        .build_cartesian_2d(lo..hi, 0.0..y_max)
        .map_err(draw_reason)?;
    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc("count")
        .draw()
        .map_err(draw_reason)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, &count)| {
            let x0 = lo + width * i as f64;
            Rectangle::new(
                [(x0, 0.0), (x0 + width, count as f64)],
                SIMULATED_COLOR.mix(0.4).filled(),
            )
        }))
        .map_err(draw_reason)?;

    root.present().map_err(draw_reason)?;
    info!(path = %path.display(), n_bins = counts.len(), "wrote histogram figure");
    Ok(())
}

/// Line of one value per water year with a marker at every point. Years
/// carrying a non-finite value are dropped.
pub fn year_line(
    path: &Path,
    title: &str,
    y_label: &str,
    points: &[(i32, f64)],
) -> Result<(), PlotError> {
    let finite: Vec<(i32, f64)> = points
        .iter()
        .copied()
        .filter(|(_, v)| v.is_finite())
        .collect();
    if finite.is_empty() {
        return Err(PlotError::Empty {
            reason: format!("no finite values for '{title}'"),
        });
    }
    let x_lo = finite.iter().map(|&(year, _)| year).min().expect("finite set is nonempty") - 1;
    let x_hi = finite.iter().map(|&(year, _)| year).max().expect("finite set is nonempty") + 1;
    let (y_lo, y_hi) = padded_range(finite.iter().map(|&(_, v)| v)).expect("values are finite");

    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_reason)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(title, ("sans-serif", 22))
        .x_label_area_size(40)
        .y_label_area_size(48)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(draw_reason)?;
    chart
        .configure_mesh()
        .x_labels(10)
        .x_desc("water year")
        .y_desc(y_label)
        .draw()
        .map_err(draw_reason)?;

    chart
        .draw_series(LineSeries::new(finite.clone(), SIMULATED_COLOR))
        .map_err(draw_reason)?;
    chart
        .draw_series(
            finite
                .iter()
                .map(|&(year, v)| Circle::new((year, v), 3, SIMULATED_COLOR.filled())),
        )
        .map_err(draw_reason)?;

    root.present().map_err(draw_reason)?;
    info!(path = %path.display(), n_years = finite.len(), "wrote year-line figure");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, day).expect("valid date")
    }

    #[test]
    fn finite_points_drop_gaps() {
        let dates = vec![d(1), d(2), d(3)];
        let points = finite_points(&dates, &[1.0, f64::NAN, 3.0]);
        assert_eq!(points, vec![(d(1), 1.0), (d(3), 3.0)]);
    }

    // The empty-input guards run before any backend is created, so no
    // file appears at the given path.

    #[test]
    fn scatter_with_no_finite_pairs_is_empty() {
        let err = scatter_compare(
            Path::new("unused.png"),
            "peaks",
            "x",
            "y",
            &[(f64::NAN, 1.0), (2.0, f64::NAN)],
        )
        .unwrap_err();
        assert!(matches!(err, PlotError::Empty { .. }));
        assert!(!Path::new("unused.png").exists());
    }

    #[test]
    fn histogram_with_no_finite_values_is_empty() {
        let err = histogram(Path::new("unused.png"), "peaks", "x", &[f64::NAN], 10).unwrap_err();
        assert!(matches!(err, PlotError::Empty { .. }));
    }

    #[test]
    fn year_line_with_no_finite_values_is_empty() {
        let points = [(2001, f64::NAN), (2002, f64::INFINITY)];
        let err = year_line(Path::new("unused.png"), "peaks", "mae", &points).unwrap_err();
        assert!(matches!(err, PlotError::Empty { .. }));
    }
}
