//! One-pass descriptive summary
//!
//! NaN is not skipped: once a NaN is seen, the sum, mean, extremes and
//! moments all report NaN. Use `NanPolicy` with the order statistics when NaN
//! should be dropped instead.

use super::Welford;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Count, sum, extremes and moments gathered in a single pass
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    count: u64,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
    moments: Welford,
}

impl Default for Summary {
    fn default() -> Self {
        Self::new()
    }
}

impl Summary {
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: None,
            max: None,
            moments: Welford::new(),
        }
    }

    /// Update with a new value
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = Some(extreme(self.min, value, Ordering::Less));
        self.max = Some(extreme(self.max, value, Ordering::Greater));
        self.moments.update(value);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Arithmetic mean, `None` when empty.
    ///
    /// Taken from the running moments, so it stays finite where `sum` overflows.
    pub fn mean(&self) -> Option<f64> {
        self.moments.mean()
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Population variance
    pub fn variance(&self) -> Option<f64> {
        self.moments.population_variance()
    }

    /// Population standard deviation
    pub fn std_dev(&self) -> Option<f64> {
        self.moments.std_dev()
    }
}

/// Keep `current` unless `value` orders `wanted` relative to it. NaN sticks.
fn extreme(current: Option<f64>, value: f64, wanted: Ordering) -> f64 {
    match current {
        None => value,
        Some(current) if current.is_nan() => current,
        Some(_) if value.is_nan() => value,
        Some(current) if value.partial_cmp(&current) == Some(wanted) => value,
        Some(current) => current,
    }
}

impl Extend<f64> for Summary {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for value in iter {
            self.update(value);
        }
    }
}

impl FromIterator<f64> for Summary {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        let mut summary = Self::new();
        summary.extend(iter);
        summary
    }
}
