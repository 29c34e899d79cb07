//! Order statistics by quickselect
//!
//! Median and percentile select the needed rank with a Hoare partition instead
//! of sorting, so they run in expected linear time. Values are compared with
//! `f64::total_cmp`; how NaN enters the comparison is decided by [`NanPolicy`].

use crate::config::NanPolicy;
use std::cmp::Ordering;

/// Rearrange `values` so the element at `k` is the `k`th smallest and return it.
///
/// On return every element before `k` compares less than or equal to it and
/// every element after compares greater than or equal. Returns `None` when `k`
/// is out of range.
pub fn select_nth(values: &mut [f64], k: usize) -> Option<f64> {
    if k >= values.len() {
        return None;
    }

    let mut lo = 0;
    let mut hi = values.len() - 1;
    while lo < hi {
        let split = partition(values, lo, hi);
        if k <= split {
            hi = split;
        } else {
            lo = split + 1;
        }
    }
    Some(values[k])
}

/// Hoare partition of `values[lo..=hi]` around a median-of-three pivot.
///
/// Returns `j` with `lo <= j < hi` such that `values[lo..=j]` are all `<=`
/// `values[j+1..=hi]`.
fn partition(values: &mut [f64], lo: usize, hi: usize) -> usize {
    let pivot = median_of_three(values[lo], values[lo + (hi - lo) / 2], values[hi]);
    let mut i = lo;
    let mut j = hi;
    loop {
        while values[i].total_cmp(&pivot) == Ordering::Less {
            i += 1;
        }
        while values[j].total_cmp(&pivot) == Ordering::Greater {
            j -= 1;
        }
        if i >= j {
            return j;
        }
        values.swap(i, j);
        i += 1;
        j -= 1;
    }
}

fn median_of_three(a: f64, b: f64, c: f64) -> f64 {
    let (lo, hi) = if a.total_cmp(&b) == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    };
    if c.total_cmp(&lo) == Ordering::Less {
        lo
    } else if c.total_cmp(&hi) == Ordering::Greater {
        hi
    } else {
        c
    }
}

/// Smallest element of the slice under total order
fn min_of(values: &[f64]) -> Option<f64> {
    values.iter().copied().min_by(f64::total_cmp)
}

/// Apply the NaN policy: drop NaN, or normalise every NaN to positive so it
/// orders above `+inf`.
fn prepare(values: &mut Vec<f64>, policy: NanPolicy) {
    match policy {
        NanPolicy::Ignore => values.retain(|v| !v.is_nan()),
        NanPolicy::Propagate => {
            for v in values.iter_mut().filter(|v| v.is_nan()) {
                *v = f64::NAN;
            }
        }
    }
}

/// Median of `values`; the mean of the two middle elements for even counts.
/// `None` when nothing remains after applying `policy`.
pub fn median_of(mut values: Vec<f64>, policy: NanPolicy) -> Option<f64> {
    prepare(&mut values, policy);
    let n = values.len();
    if n == 0 {
        return None;
    }

    let mid = n / 2;
    if n % 2 == 1 {
        return select_nth(&mut values, mid);
    }

    let lower = select_nth(&mut values, mid - 1)?;
    let upper = min_of(&values[mid..])?;
    Some((lower + upper) / 2.0)
}

/// Linearly interpolated percentile, `p` in [0, 100].
///
/// The rank is `p / 100 * (n - 1)`; a fractional rank interpolates between
/// the two neighbouring order statistics. `p` is expected to be validated.
pub fn percentile_of(mut values: Vec<f64>, p: f64, policy: NanPolicy) -> Option<f64> {
    prepare(&mut values, policy);
    let n = values.len();
    if n == 0 {
        return None;
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower_idx = (rank.floor() as usize).min(n - 1);
    let fraction = rank - lower_idx as f64;

    let lower = select_nth(&mut values, lower_idx)?;
    if fraction == 0.0 || lower_idx + 1 >= n {
        return Some(lower);
    }

    let upper = min_of(&values[lower_idx + 1..])?;
    Some(lower * (1.0 - fraction) + upper * fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_select_nth_every_rank() {
        let sorted: Vec<f64> = (0..31).map(|i| i as f64).collect();
        let mut rng = StdRng::seed_from_u64(7);
        for k in 0..sorted.len() {
            let mut values = sorted.clone();
            values.shuffle(&mut rng);
            assert_eq!(select_nth(&mut values, k), Some(k as f64));
            assert!(values[..k].iter().all(|v| *v <= k as f64));
            assert!(values[k + 1..].iter().all(|v| *v >= k as f64));
        }
    }

    #[test]
    fn test_select_nth_with_duplicates() {
        let mut values = vec![3.0, 1.0, 3.0, 3.0, 2.0, 3.0, 1.0];
        assert_eq!(select_nth(&mut values, 0), Some(1.0));
        assert_eq!(select_nth(&mut values, 3), Some(3.0));
        assert_eq!(select_nth(&mut values, 7), None);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median_of(vec![5.0, 1.0, 3.0], NanPolicy::Ignore), Some(3.0));
        assert_eq!(median_of(vec![4.0, 1.0, 3.0, 2.0], NanPolicy::Ignore), Some(2.5));
        assert_eq!(median_of(vec![7.0], NanPolicy::Ignore), Some(7.0));
        assert_eq!(median_of(Vec::new(), NanPolicy::Ignore), None);
    }

    #[test]
    fn test_median_nan_policies() {
        let values = vec![1.0, f64::NAN, 3.0, 2.0];
        assert_eq!(median_of(values.clone(), NanPolicy::Ignore), Some(2.0));
        // NaN orders last, so the middle pair is (2, 3)
        assert_eq!(median_of(values, NanPolicy::Propagate), Some(2.5));

        let all_nan = vec![f64::NAN, f64::NAN];
        assert_eq!(median_of(all_nan.clone(), NanPolicy::Ignore), None);
        assert!(median_of(all_nan, NanPolicy::Propagate).unwrap().is_nan());
    }

    #[test]
    fn test_negative_nan_orders_last_when_propagated() {
        let neg_nan = -f64::NAN;
        let values = vec![neg_nan, 1.0, 2.0];
        assert_eq!(percentile_of(values, 0.0, NanPolicy::Propagate), Some(1.0));
    }

    #[test]
    fn test_percentile_interpolation() {
        let values: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        assert_eq!(percentile_of(values.clone(), 0.0, NanPolicy::Ignore), Some(1.0));
        assert_eq!(percentile_of(values.clone(), 100.0, NanPolicy::Ignore), Some(100.0));
        assert_eq!(percentile_of(values.clone(), 50.0, NanPolicy::Ignore), Some(50.5));
        let p95 = percentile_of(values, 95.0, NanPolicy::Ignore).unwrap();
        assert!((p95 - 95.05).abs() < 1e-9);
    }

    #[test]
    fn test_quickselect_matches_sort_on_shuffles() {
        let mut rng = StdRng::seed_from_u64(42);
        let base: Vec<f64> = (0..101).map(|i| ((i * 37) % 23) as f64 - 11.0).collect();
        let mut sorted = base.clone();
        sorted.sort_by(f64::total_cmp);
        let expected = sorted[50];

        for _ in 0..50 {
            let mut values = base.clone();
            values.shuffle(&mut rng);
            assert_eq!(median_of(values, NanPolicy::Ignore), Some(expected));
        }
    }
}
