//! Statistics that report absence instead of failing
//!
//! These operate on `f64` directly and return `None` for empty input. Only
//! `percentile` can fail, and only because its argument is validated before
//! any value is consumed.

use super::mode::mode_of;
use super::select::{median_of, percentile_of};
use super::{OnlineCovariance, Summary, Welford};
use crate::config::{validate_percentile, NanPolicy};
use crate::error::Result;

pub fn sum<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let summary: Summary = values.into_iter().collect();
    (!summary.is_empty()).then(|| summary.sum())
}

pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values.into_iter().collect::<Summary>().mean()
}

/// Population variance (Welford)
pub fn variance<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values.into_iter().collect::<Welford>().population_variance()
}

/// Population standard deviation
pub fn std_dev<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values.into_iter().collect::<Welford>().std_dev()
}

/// Median, ignoring NaN
pub fn median<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    median_with(values, NanPolicy::Ignore)
}

pub fn median_with<I: IntoIterator<Item = f64>>(values: I, policy: NanPolicy) -> Option<f64> {
    median_of(values.into_iter().collect(), policy)
}

/// Percentile, ignoring NaN. Fails only when `p` is outside [0, 100].
pub fn percentile<I: IntoIterator<Item = f64>>(values: I, p: f64) -> Result<Option<f64>> {
    percentile_with(values, p, NanPolicy::Ignore)
}

pub fn percentile_with<I: IntoIterator<Item = f64>>(
    values: I,
    p: f64,
    policy: NanPolicy,
) -> Result<Option<f64>> {
    validate_percentile("percentile", p)?;
    Ok(percentile_of(values.into_iter().collect(), p, policy))
}

/// All most frequent values, ascending
pub fn mode<I: IntoIterator<Item = f64>>(values: I) -> Option<Vec<f64>> {
    let modes = mode_of(values);
    (!modes.is_empty()).then_some(modes)
}

pub fn min<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values.into_iter().collect::<Summary>().min()
}

pub fn max<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values.into_iter().collect::<Summary>().max()
}

pub fn summary<I: IntoIterator<Item = f64>>(values: I) -> Option<Summary> {
    let summary: Summary = values.into_iter().collect();
    (!summary.is_empty()).then_some(summary)
}

/// Population covariance of paired values
pub fn covariance<I: IntoIterator<Item = (f64, f64)>>(pairs: I) -> Option<f64> {
    pairs.into_iter().collect::<OnlineCovariance>().covariance()
}

/// Pearson correlation; `None` when empty or either side is constant
pub fn correlation<I: IntoIterator<Item = (f64, f64)>>(pairs: I) -> Option<f64> {
    pairs.into_iter().collect::<OnlineCovariance>().correlation()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_input_is_absent() {
        let empty = Vec::<f64>::new;
        assert_eq!(sum(empty()), None);
        assert_eq!(mean(empty()), None);
        assert_eq!(variance(empty()), None);
        assert_eq!(std_dev(empty()), None);
        assert_eq!(median(empty()), None);
        assert_eq!(mode(empty()), None);
        assert_eq!(min(empty()), None);
        assert_eq!(max(empty()), None);
        assert_eq!(summary(empty()), None);
        assert_eq!(percentile(empty(), 50.0).unwrap(), None);
        assert_eq!(covariance(Vec::new()), None);
    }

    #[test]
    fn test_values() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(sum(values.clone()), Some(10.0));
        assert_eq!(mean(values.clone()), Some(2.5));
        assert!((variance(values.clone()).unwrap() - 1.25).abs() < 1e-12);
        assert_eq!(median(values.clone()), Some(2.5));
        assert_eq!(percentile(values.clone(), 100.0).unwrap(), Some(4.0));
        assert_eq!(min(values.clone()), Some(1.0));
        assert_eq!(max(values), Some(4.0));
    }

    #[test]
    fn test_percentile_validates_before_consuming() {
        let mut pulled = false;
        let values = std::iter::from_fn(|| {
            pulled = true;
            None::<f64>
        });
        let err = percentile(values, 101.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!pulled);
    }

    #[test]
    fn test_median_with_policy() {
        let values = vec![f64::NAN, 1.0, 2.0];
        assert_eq!(median(values.clone()), Some(1.5));
        assert_eq!(median_with(values, NanPolicy::Propagate), Some(2.0));
    }

    #[test]
    fn test_correlation() {
        assert_eq!(correlation(vec![(1.0, 2.0), (1.0, 3.0)]), None);
        let r = correlation(vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.5)]).unwrap();
        assert!(r > 0.9 && r <= 1.0);
    }

    #[test]
    fn test_extremes_propagate_nan() {
        assert!(min(vec![f64::NAN]).unwrap().is_nan());
        assert!(max(vec![f64::NAN]).unwrap().is_nan());
        assert!(min(vec![1.0, f64::NAN]).unwrap().is_nan());
        assert!(max(vec![f64::NAN, 1.0]).unwrap().is_nan());
    }

    #[test]
    fn test_mean_of_huge_values_stays_finite() {
        assert_eq!(mean(vec![1e308, 1e308]), Some(1e308));
        assert!(sum(vec![1e308, 1e308]).unwrap().is_infinite());
    }
}
