//! Pure binning and range helpers behind the figure renderers.

/// Equal-width histogram binning over the finite values of a sample.
///
/// Returns the low edge, the high edge, and one count per bin. The last
/// bin includes its upper edge so the sample maximum lands inside it. A
/// constant sample widens to a unit range centred on the value.
///
/// Returns `None` when `n_bins` is zero or no value is finite.
pub fn bin_counts(values: &[f64], n_bins: usize) -> Option<(f64, f64, Vec<usize>)> {
    if n_bins == 0 {
        return None;
    }
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let (mut lo, mut hi) = bounds(&finite)?;
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / n_bins as f64;
    let mut counts = vec![0_usize; n_bins];
    for v in finite {
        let mut bin = ((v - lo) / width) as usize;
        if bin >= n_bins {
            bin = n_bins - 1;
        }
        counts[bin] += 1;
    }
    Some((lo, hi, counts))
}

/// Smallest and largest finite values, or `None` if there are none.
pub(crate) fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    (lo <= hi).then_some((lo, hi))
}

/// Finite bounds padded by 5% of the spread on each side, so series do not
/// sit on the chart frame. A flat spread pads by half a unit.
pub(crate) fn padded_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let finite: Vec<f64> = values.filter(|v| v.is_finite()).collect();
    let (lo, hi) = bounds(&finite)?;
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    Some((lo - pad, hi + pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_split_evenly() {
        let values = [0.0, 0.5, 1.0, 1.5, 2.5, 3.5];
        let (lo, hi, counts) = bin_counts(&values, 4).unwrap();
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 3.5);
        assert_eq!(counts.iter().sum::<usize>(), values.len());
        assert_eq!(counts.len(), 4);
    }

    #[test]
    fn maximum_lands_in_the_last_bin() {
        let (_, _, counts) = bin_counts(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn nan_values_are_ignored() {
        let (lo, hi, counts) = bin_counts(&[1.0, f64::NAN, 3.0], 2).unwrap();
        assert_eq!((lo, hi), (1.0, 3.0));
        assert_eq!(counts, vec![1, 1]);
    }

    #[test]
    fn constant_sample_widens_to_a_unit_range() {
        let (lo, hi, counts) = bin_counts(&[2.0, 2.0, 2.0], 3).unwrap();
        assert_eq!((lo, hi), (1.5, 2.5));
        assert_eq!(counts.iter().sum::<usize>(), 3);
    }

    #[test]
    fn no_bins_or_no_finite_values_is_none() {
        assert!(bin_counts(&[1.0, 2.0], 0).is_none());
        assert!(bin_counts(&[f64::NAN], 4).is_none());
        assert!(bin_counts(&[], 4).is_none());
    }

    #[test]
    fn padded_range_extends_both_sides() {
        let (lo, hi) = padded_range([0.0, 10.0].into_iter()).unwrap();
        assert_eq!((lo, hi), (-0.5, 10.5));
    }

    #[test]
    fn padded_range_flat_input() {
        let (lo, hi) = padded_range([3.0, 3.0].into_iter()).unwrap();
        assert_eq!((lo, hi), (2.5, 3.5));
    }

    #[test]
    fn padded_range_empty_is_none() {
        assert!(padded_range(std::iter::empty()).is_none());
    }
}
