//! Basic financial ratios.
//!
//! All results are in percent. Ratios with a zero denominator are undefined
//! and return `None` rather than infinity.

/// Denominators smaller than this are treated as zero.
const EPSILON: f64 = 1e-10;

/// Percentage change from `previous` to `current`.
///
/// # Examples
///
/// ```
/// use hobart_metrics::calc::growth_rate;
///
/// let growth = growth_rate(26974.0, 60922.0).unwrap();
/// assert!((growth - 125.85).abs() < 0.01);
/// assert_eq!(growth_rate(0.0, 10.0), None);
/// ```
pub fn growth_rate(previous: f64, current: f64) -> Option<f64> {
    if previous.abs() < EPSILON {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// `numerator` as a percentage of `revenue`.
pub fn margin(numerator: f64, revenue: f64) -> Option<f64> {
    if revenue.abs() < EPSILON {
        return None;
    }
    Some(numerator / revenue * 100.0)
}

/// Each value as a percentage of the sum. All zero when the sum is zero.
pub fn share_of_total(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total.abs() < EPSILON {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / total * 100.0).collect()
}

/// Difference between two percentages, in percentage points.
pub fn percentage_point_change(previous: Option<f64>, current: Option<f64>) -> Option<f64> {
    Some(current? - previous?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_growth_rate() {
        assert_relative_eq!(growth_rate(100.0, 150.0).unwrap(), 50.0);
        assert_relative_eq!(growth_rate(100.0, 50.0).unwrap(), -50.0);
        assert_eq!(growth_rate(0.0, 50.0), None);
    }

    #[test]
    fn test_margin() {
        assert_relative_eq!(margin(44297.0, 60922.0).unwrap(), 72.71, epsilon = 0.01);
        assert_eq!(margin(10.0, 0.0), None);
    }

    #[test]
    fn test_share_of_total() {
        let shares = share_of_total(&[1.0, 1.0, 2.0]);
        assert_eq!(shares, vec![25.0, 25.0, 50.0]);
        assert_relative_eq!(shares.iter().sum::<f64>(), 100.0);

        assert_eq!(share_of_total(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert!(share_of_total(&[]).is_empty());
    }

    #[test]
    fn test_percentage_point_change() {
        assert_relative_eq!(
            percentage_point_change(Some(56.9), Some(72.7)).unwrap(),
            15.8,
            epsilon = 1e-9
        );
        assert_eq!(percentage_point_change(None, Some(72.7)), None);
    }
}
