//! Most frequent values

use crate::core::FloatKey;
use std::collections::HashMap;

/// Every value reaching the highest frequency, in ascending total order.
///
/// Values are keyed through [`FloatKey`], so `-0.0` counts as `0.0` and all NaN
/// payloads count as one value. Empty input yields an empty vector.
pub fn mode_of<I: IntoIterator<Item = f64>>(values: I) -> Vec<f64> {
    let mut frequencies: HashMap<FloatKey, usize> = HashMap::new();
    let mut max_frequency = 0;

    for value in values {
        let count = frequencies.entry(FloatKey::new(value)).or_insert(0);
        *count += 1;
        max_frequency = max_frequency.max(*count);
    }

    let mut modes: Vec<f64> = frequencies
        .into_iter()
        .filter(|(_, count)| *count == max_frequency)
        .map(|(key, _)| key.get())
        .collect();
    modes.sort_by(f64::total_cmp);
    modes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mode() {
        assert_eq!(mode_of(vec![1.0, 2.0, 2.0, 3.0]), vec![2.0]);
    }

    #[test]
    fn test_multi_modal_sorted() {
        assert_eq!(mode_of(vec![5.0, 1.0, 5.0, 1.0, 3.0]), vec![1.0, 5.0]);
        assert_eq!(mode_of(vec![3.0, 2.0, 1.0]), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_signed_zero_and_nan_are_one_value() {
        assert_eq!(mode_of(vec![0.0, -0.0, 1.0]), vec![0.0]);
        let modes = mode_of(vec![f64::NAN, -f64::NAN, 1.0]);
        assert_eq!(modes.len(), 1);
        assert!(modes[0].is_nan());
    }

    #[test]
    fn test_empty() {
        assert!(mode_of(Vec::new()).is_empty());
    }
}
