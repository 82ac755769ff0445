//! End-to-end evaluation: fit on the training window, apply everywhere.

use std::collections::BTreeMap;

use fos_series::DailyFrame;

use crate::error::ModelError;
use crate::output::{ModelOutput, WindowSegment};
use crate::params::ModelParams;
use crate::strategy::Strategy;

/// Name of the window every strategy trains on.
pub const TRAIN_WINDOW: &str = "train";

/// Fits `strategy` on the training window, applies the fitted model to
/// every window in `order`, and stacks the results into a [`ModelOutput`].
///
/// `forcing` and `obs` map window names to frames covering those windows.
/// Both maps must contain [`TRAIN_WINDOW`] and every name in `order`, and
/// each paired pair of frames must cover identical dates.
///
/// # Errors
///
/// Reports missing or misaligned windows, then any fit failure from
/// [`Strategy::fit`], then any column lookup failure during application.
pub fn fit_and_apply(
    strategy: &Strategy,
    forcing: &BTreeMap<String, DailyFrame>,
    obs: &BTreeMap<String, DailyFrame>,
    order: &[String],
    params: &ModelParams,
) -> Result<ModelOutput, ModelError> {
    params.validate()?;
    let train_forcing = window_frame(forcing, TRAIN_WINDOW, "forcing")?;
    let train_obs = window_frame(obs, TRAIN_WINDOW, "observed")?;
    let fitted = strategy.fit(train_forcing, train_obs, params)?;

    let mut y_flat = Vec::new();
    let mut y_hat_flat = Vec::new();
    let mut segments = Vec::with_capacity(order.len() * params.vars().len());
    for window in order {
        let forcing_frame = window_frame(forcing, window, "forcing")?;
        let obs_frame = window_frame(obs, window, "observed")?;
        if forcing_frame.len() != obs_frame.len() {
            return Err(ModelError::WindowMismatch {
                window: window.clone(),
                obs_len: obs_frame.len(),
                forcing_len: forcing_frame.len(),
            });
        }
        if forcing_frame.dates() != obs_frame.dates() {
            return Err(ModelError::WindowMisaligned {
                window: window.clone(),
            });
        }
        for var in params.vars() {
            let observed = obs_frame.column(var)?;
            let simulated = fitted.apply(forcing_frame, var)?;
            segments.push(WindowSegment::new(
                window.clone(),
                var.clone(),
                y_flat.len(),
                obs_frame.dates().to_vec(),
            ));
            y_flat.extend_from_slice(observed);
            y_hat_flat.extend(simulated);
        }
    }

    ModelOutput::from_stacked(strategy.name(), params.nvars(), y_flat, y_hat_flat, segments)
}

fn window_frame<'a>(
    frames: &'a BTreeMap<String, DailyFrame>,
    window: &str,
    side: &'static str,
) -> Result<&'a DailyFrame, ModelError> {
    frames.get(window).ok_or_else(|| ModelError::MissingWindow {
        name: window.to_string(),
        side,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    fn frame(name: &str, start: NaiveDate, values: Vec<f64>) -> DailyFrame {
        let dates = (0..values.len())
            .map(|i| start + chrono::Days::new(i as u64))
            .collect();
        DailyFrame::from_column(dates, name, values).unwrap()
    }

    fn windowed(
        name: &str,
        train: Vec<f64>,
        test: Vec<f64>,
    ) -> BTreeMap<String, DailyFrame> {
        let mut map = BTreeMap::new();
        map.insert(
            TRAIN_WINDOW.to_string(),
            frame(name, d(2000, 1, 1), train),
        );
        map.insert("test".to_string(), frame(name, d(2001, 1, 1), test));
        map
    }

    fn order() -> Vec<String> {
        vec![TRAIN_WINDOW.to_string(), "test".to_string()]
    }

    #[test]
    fn mean_offset_end_to_end() {
        let forcing = windowed("SNOTEL_SWE", vec![10.0, 12.0, 14.0], vec![20.0]);
        let obs = windowed("SWE", vec![11.0, 13.0, 15.0], vec![0.0]);
        let out = fit_and_apply(
            &Strategy::MeanOffset,
            &forcing,
            &obs,
            &order(),
            &ModelParams::new(),
        )
        .unwrap();

        assert_eq!(out.name(), "mean_offset");
        assert_eq!(out.n_rows(), 4);
        assert_eq!(out.nvars(), 1);
        let test = out.segment("test", "SWE").unwrap();
        assert_relative_eq!(out.simulated(test)[0], 21.0, epsilon = 1e-12);
        // Training window predictions carry the same offset.
        let train = out.segment(TRAIN_WINDOW, "SWE").unwrap();
        assert_relative_eq!(out.simulated(train)[0], 11.0, epsilon = 1e-12);
        assert_eq!(out.observed(train), &[11.0, 13.0, 15.0]);
    }

    #[test]
    fn identity_output_matches_forcing() {
        let forcing = windowed("SNOTEL_SWE", vec![1.0, 2.0], vec![3.0, 4.0]);
        let obs = windowed("SWE", vec![5.0, 6.0], vec![7.0, 8.0]);
        let out = fit_and_apply(
            &Strategy::Identity,
            &forcing,
            &obs,
            &order(),
            &ModelParams::new(),
        )
        .unwrap();
        let observed: Vec<f64> = out.observed_matrix().iter().copied().collect();
        let simulated: Vec<f64> = out.simulated_matrix().iter().copied().collect();
        assert_eq!(observed, vec![5.0, 6.0, 7.0, 8.0]);
        assert_eq!(simulated, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn segments_follow_window_order() {
        let forcing = windowed("SNOTEL_SWE", vec![1.0, 2.0], vec![3.0]);
        let obs = windowed("SWE", vec![1.0, 2.0], vec![3.0]);
        let out = fit_and_apply(
            &Strategy::Identity,
            &forcing,
            &obs,
            &order(),
            &ModelParams::new(),
        )
        .unwrap();
        let windows: Vec<&str> = out.segments().iter().map(|s| s.window()).collect();
        assert_eq!(windows, vec![TRAIN_WINDOW, "test"]);
        assert_eq!(out.segments()[1].dates(), &[d(2001, 1, 1)]);
    }

    #[test]
    fn missing_train_window_reported() {
        let mut forcing = windowed("SNOTEL_SWE", vec![1.0], vec![2.0]);
        forcing.remove(TRAIN_WINDOW);
        let obs = windowed("SWE", vec![1.0], vec![2.0]);
        let err = fit_and_apply(
            &Strategy::Identity,
            &forcing,
            &obs,
            &order(),
            &ModelParams::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ModelError::MissingWindow {
                side: "forcing",
                ..
            }
        ));
    }

    #[test]
    fn unequal_window_lengths_reported() {
        let forcing = windowed("SNOTEL_SWE", vec![1.0, 2.0], vec![3.0, 4.0]);
        let obs = windowed("SWE", vec![1.0, 2.0], vec![3.0]);
        let err = fit_and_apply(
            &Strategy::Identity,
            &forcing,
            &obs,
            &order(),
            &ModelParams::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ModelError::WindowMismatch {
                obs_len: 1,
                forcing_len: 2,
                ..
            }
        ));
    }
}
