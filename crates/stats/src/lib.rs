// TODO: kge and log-nse once the evaluate diagnostics grow beyond nse/mae/rmse/pbias

//! Statistical helper functions for the fate-of-SNOTEL toolkit.
//!
//! Skill scores compare a simulated series against an observed one. All
//! score functions filter to indices where both inputs are finite, so gappy
//! station records can be scored directly.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Mean over the finite values of a slice, ignoring NaN and infinities.
///
/// Returns `None` if no finite value remains, matching the "mean of an
/// all-missing window is undefined" convention used by the forecast models.
pub fn nan_mean(data: &[f64]) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0_usize;
    for &x in data {
        if x.is_finite() {
            sum += x;
            n += 1;
        }
    }
    if n == 0 { None } else { Some(sum / n as f64) }
}

/// Sample variance with N-1 denominator (matching R's `var()`).
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator (matching R's `sd()`).
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Collects the finite (sim, obs) pairs shared by both slices.
fn finite_pairs(sim: &[f64], obs: &[f64]) -> Vec<(f64, f64)> {
    sim.iter()
        .zip(obs.iter())
        .filter(|(s, o)| s.is_finite() && o.is_finite())
        .map(|(s, o)| (*s, *o))
        .collect()
}

/// Nash-Sutcliffe efficiency of `sim` against `obs`.
///
/// 1.0 is a perfect match, 0.0 matches the observed mean, negative values
/// are worse than the mean. Returns `None` with no finite pairs and
/// `Some(NEG_INFINITY)` when the observations are constant (zero variance
/// denominator).
pub fn nse(sim: &[f64], obs: &[f64]) -> Option<f64> {
    let pairs = finite_pairs(sim, obs);
    if pairs.is_empty() {
        return None;
    }

    let obs_mean = pairs.iter().map(|(_, o)| o).sum::<f64>() / pairs.len() as f64;
    let mut num = 0.0;
    let mut den = 0.0;
    for &(s, o) in &pairs {
        num += (o - s) * (o - s);
        den += (o - obs_mean) * (o - obs_mean);
    }

    if den == 0.0 {
        return Some(f64::NEG_INFINITY);
    }
    Some(1.0 - num / den)
}

/// Mean absolute error between `sim` and `obs` over their finite pairs.
///
/// Returns `None` with no finite pairs.
pub fn mae(sim: &[f64], obs: &[f64]) -> Option<f64> {
    let pairs = finite_pairs(sim, obs);
    if pairs.is_empty() {
        return None;
    }
    let sum: f64 = pairs.iter().map(|(s, o)| (s - o).abs()).sum();
    Some(sum / pairs.len() as f64)
}

/// Root-mean-square error between `sim` and `obs` over their finite pairs.
///
/// Returns `None` with no finite pairs.
pub fn rmse(sim: &[f64], obs: &[f64]) -> Option<f64> {
    let pairs = finite_pairs(sim, obs);
    if pairs.is_empty() {
        return None;
    }
    let sum: f64 = pairs.iter().map(|(s, o)| (s - o) * (s - o)).sum();
    Some((sum / pairs.len() as f64).sqrt())
}

/// Percent bias of `sim` against `obs` over their finite pairs.
///
/// Positive values mean the simulation overestimates. Returns `None` with
/// no finite pairs or when the observed total is zero.
pub fn pbias(sim: &[f64], obs: &[f64]) -> Option<f64> {
    let pairs = finite_pairs(sim, obs);
    if pairs.is_empty() {
        return None;
    }
    let obs_sum: f64 = pairs.iter().map(|(_, o)| o).sum();
    if obs_sum == 0.0 {
        return None;
    }
    let diff_sum: f64 = pairs.iter().map(|(s, o)| s - o).sum();
    Some(100.0 * diff_sum / obs_sum)
}

/// Pearson correlation coefficient.
///
/// Filters to indices where both `x[i]` and `y[i]` are finite.
/// Returns `None` if fewer than 3 finite pairs or if the denominator is zero
/// (constant input).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(xi, yi)| (*xi, *yi))
        .collect();

    if pairs.len() < 3 {
        return None;
    }

    let n = pairs.len() as f64;
    let mx: f64 = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / n;
    let my: f64 = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    for &(xi, yi) in &pairs {
        let dx = xi - mx;
        let dy = yi - my;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let denom = (sum_xx * sum_yy).sqrt();
    if denom == 0.0 {
        return None;
    }

    Some(sum_xy / denom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_nan_mean_skips_nan() {
        let data = [1.0, f64::NAN, 3.0];
        assert_relative_eq!(nan_mean(&data).unwrap(), 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_nan_mean_all_nan() {
        assert!(nan_mean(&[f64::NAN, f64::NAN]).is_none());
    }

    #[test]
    fn test_nan_mean_empty() {
        assert!(nan_mean(&[]).is_none());
    }

    #[test]
    fn test_nan_mean_matches_mean_when_finite() {
        let data = [2.0, 4.0, 6.0];
        assert_relative_eq!(nan_mean(&data).unwrap(), mean(&data), epsilon = 1e-12);
    }

    #[test]
    fn test_variance_basic() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(variance(&data), 4.571429, epsilon = 1e-4);
    }

    #[test]
    fn test_variance_short() {
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[5.0]), 0.0);
    }

    #[test]
    fn test_sd() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sd(&data), 2.138090, epsilon = 1e-6);
    }

    #[test]
    fn test_nse_perfect() {
        let obs = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(nse(&obs, &obs).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nse_mean_prediction_is_zero() {
        let obs = [1.0, 2.0, 3.0, 4.0];
        let sim = [2.5, 2.5, 2.5, 2.5];
        assert_relative_eq!(nse(&sim, &obs).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nse_known_value() {
        // num = 3 * 1 = 3; den = 2 * 1 = 2; nse = 1 - 3/2 = -0.5
        let obs = [1.0, 2.0, 3.0];
        let sim = [2.0, 3.0, 4.0];
        assert_relative_eq!(nse(&sim, &obs).unwrap(), -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_nse_constant_obs() {
        let obs = [2.0, 2.0, 2.0];
        let sim = [1.0, 2.0, 3.0];
        assert_eq!(nse(&sim, &obs).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_nse_skips_nan_pairs() {
        let obs = [1.0, f64::NAN, 3.0, 4.0];
        let sim = [1.0, 2.0, f64::NAN, 4.0];
        // Remaining pairs are exact matches.
        assert_relative_eq!(nse(&sim, &obs).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nse_no_pairs() {
        assert!(nse(&[f64::NAN], &[1.0]).is_none());
        assert!(nse(&[], &[]).is_none());
    }

    #[test]
    fn test_mae_known_value() {
        let sim = [2.0, 4.0, 6.0];
        let obs = [1.0, 4.0, 8.0];
        assert_relative_eq!(mae(&sim, &obs).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mae_skips_nan() {
        let sim = [2.0, f64::NAN, 6.0];
        let obs = [1.0, 100.0, 8.0];
        assert_relative_eq!(mae(&sim, &obs).unwrap(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_rmse_known_value() {
        let sim = [2.0, 2.0];
        let obs = [0.0, 0.0];
        assert_relative_eq!(rmse(&sim, &obs).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rmse_at_least_mae() {
        let sim = [1.0, 5.0, 2.0, 8.0];
        let obs = [2.0, 3.0, 2.0, 4.0];
        assert!(rmse(&sim, &obs).unwrap() >= mae(&sim, &obs).unwrap());
    }

    #[test]
    fn test_pbias_overestimate() {
        let sim = [2.0, 2.0];
        let obs = [1.0, 1.0];
        assert_relative_eq!(pbias(&sim, &obs).unwrap(), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pbias_zero_obs_total() {
        let sim = [1.0, 1.0];
        let obs = [1.0, -1.0];
        assert!(pbias(&sim, &obs).is_none());
    }

    #[test]
    fn test_pearson_correlation_perfect() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let r = pearson_correlation(&x, &y);
        assert_relative_eq!(r.unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pearson_correlation_insufficient() {
        let x = [1.0, 2.0];
        let y = [3.0, 4.0];
        assert!(pearson_correlation(&x, &y).is_none());
    }

    #[test]
    fn test_pearson_correlation_with_nan() {
        let x = [1.0, f64::NAN, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, f64::NAN, 8.0, 10.0];
        // Finite pairs: (1,2), (4,8), (5,10) — 3 pairs, perfect linear
        let r = pearson_correlation(&x, &y);
        assert_relative_eq!(r.unwrap(), 1.0, epsilon = 1e-6);
    }
}
