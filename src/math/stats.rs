//! Array statistics used by the metrics calculator.
//!
//! All functions expect finite inputs; callers validate before calling.
//! Empty slices return `None` rather than NaN.

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Root mean square: `sqrt(mean(v^2))`.
///
/// Computed as `m * sqrt(mean((v/m)^2))` with `m = max|v|` so squaring
/// neither underflows nor overflows for very small or very large values.
pub fn root_mean_square(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return Some(0.0);
    }
    let mean_sq = values
        .iter()
        .map(|v| {
            let r = v / scale;
            r * r
        })
        .sum::<f64>()
        / values.len() as f64;
    Some(scale * mean_sq.sqrt())
}

/// Percentile with linear interpolation between order statistics.
///
/// For `n` sorted values the fractional rank is `p/100 * (n-1)`; the result
/// interpolates between the values at its floor and ceil. `p` is clamped to
/// `[0, 100]`.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(percentile_sorted(&sorted, p))
}

/// Same as [`percentile`] but for input that is already sorted ascending.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (n as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lo as f64;

    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_rms_of_simple_series() {
        let v = [3.0, 4.0];
        assert_eq!(mean(&v), Some(3.5));
        let rms = root_mean_square(&v).unwrap();
        assert!((rms - 12.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn rms_of_all_zeros_is_zero() {
        assert_eq!(root_mean_square(&[0.0, 0.0]), Some(0.0));
    }

    #[test]
    fn rms_survives_tiny_and_huge_magnitudes() {
        // sqrt(mean([1, 4, 9])) = sqrt(14/3)
        let unit = (14.0_f64 / 3.0).sqrt();

        let tiny = root_mean_square(&[1e-200, 2e-200, 3e-200]).unwrap();
        assert!(tiny > 0.0);
        assert!((tiny / 1e-200 - unit).abs() < 1e-12);

        let huge = root_mean_square(&[1e200, 2e200, 3e200]).unwrap();
        assert!(huge.is_finite());
        assert!((huge / 1e200 - unit).abs() < 1e-12);
    }

    #[test]
    fn empty_input_has_no_statistics() {
        assert_eq!(mean(&[]), None);
        assert_eq!(root_mean_square(&[]), None);
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn percentile_interpolates_between_order_statistics() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        // rank = 0.9 * 9 = 8.1 -> 9 + 0.1 * (100 - 9)
        let p90 = percentile(&v, 90.0).unwrap();
        assert!((p90 - 18.1).abs() < 1e-9);

        assert_eq!(percentile(&v, 100.0), Some(100.0));
        assert_eq!(percentile(&v, 0.0), Some(1.0));
        assert_eq!(percentile(&[4.0, 1.0, 3.0, 2.0], 50.0), Some(2.5));
    }

    #[test]
    fn percentile_of_single_value_is_that_value() {
        assert_eq!(percentile(&[7.5], 12.0), Some(7.5));
    }
}
