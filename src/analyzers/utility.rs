use std::cmp::Ordering;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Arithmetic mean skipping NaN values, with the number of values used.
/// Returns NaN when no value is left.
pub fn nan_mean(values: &[f64]) -> (f64, usize) {
    let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if present.is_empty() {
        return (f64::NAN, 0);
    }
    (mean(&present), present.len())
}

/// Ordering for `f64` with NaN sorted last in both directions. `-0.0` and
/// `0.0` compare equal.
pub fn compare_values(a: f64, b: f64, descending: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if descending => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[45.0]), 45.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_nan_mean_skips_nan() {
        assert_eq!(nan_mean(&[f64::NAN, 50.0]), (50.0, 1));
        assert_eq!(nan_mean(&[10.0, 20.0]), (15.0, 2));

        let (m, n) = nan_mean(&[f64::NAN]);
        assert!(m.is_nan());
        assert_eq!(n, 0);
    }

    #[test]
    fn test_signed_zeros_compare_equal() {
        assert_eq!(compare_values(-0.0, 0.0, false), Ordering::Equal);
        assert_eq!(compare_values(0.0, -0.0, true), Ordering::Equal);
    }

    #[test]
    fn test_compare_values_nan_last() {
        assert_eq!(compare_values(f64::NAN, 1.0, false), Ordering::Greater);
        assert_eq!(compare_values(f64::NAN, 1.0, true), Ordering::Greater);
        assert_eq!(compare_values(1.0, 2.0, false), Ordering::Less);
        assert_eq!(compare_values(1.0, 2.0, true), Ordering::Greater);
    }
}
