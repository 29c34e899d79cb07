//! Welford's online mean and variance

use serde::{Deserialize, Serialize};

/// Online variance accumulator using Welford's algorithm
///
/// Numerically stable for large-magnitude inputs where the naive
/// sum-of-squares formula cancels catastrophically. `m2` (the sum of squared
/// deviations from the running mean) never goes negative.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Welford {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Welford {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Update with a new value
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Combine with an accumulator built over a disjoint set of values
    pub fn merge(&mut self, other: &Welford) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }

        let count = self.count + other.count;
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let delta = other.mean - self.mean;

        self.mean += delta * n_b / count as f64;
        self.m2 += other.m2 + delta * delta * n_a * n_b / count as f64;
        self.count = count;
    }

    /// Number of values seen
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Running mean, `None` before the first value
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sum of squared deviations from the mean
    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// Population variance (`m2 / n`)
    pub fn population_variance(&self) -> Option<f64> {
        (self.count > 0).then(|| self.m2 / self.count as f64)
    }

    /// Sample variance (`m2 / (n - 1)`), `None` below two values
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Population standard deviation
    pub fn std_dev(&self) -> Option<f64> {
        self.population_variance().map(f64::sqrt)
    }

    /// Reset to initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Extend<f64> for Welford {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for value in iter {
            self.update(value);
        }
    }
}

impl FromIterator<f64> for Welford {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}
