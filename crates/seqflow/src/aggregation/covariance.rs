//! Streaming covariance and correlation over paired values

use serde::{Deserialize, Serialize};

/// Online co-moment accumulator for `(x, y)` pairs.
///
/// The Welford recurrence extended with the cross term
/// `c_xy += (x - mean_x_old) * (y - mean_y_new)`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct OnlineCovariance {
    count: u64,
    mean_x: f64,
    mean_y: f64,
    m2_x: f64,
    m2_y: f64,
    c_xy: f64,
}

impl OnlineCovariance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update with one pair
    pub fn update(&mut self, x: f64, y: f64) {
        self.count += 1;
        let n = self.count as f64;

        let dx = x - self.mean_x;
        let dy = y - self.mean_y;
        self.mean_x += dx / n;
        self.mean_y += dy / n;

        self.m2_x += dx * (x - self.mean_x);
        self.m2_y += dy * (y - self.mean_y);
        self.c_xy += dx * (y - self.mean_y);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Population covariance
    pub fn covariance(&self) -> Option<f64> {
        (self.count > 0).then(|| self.c_xy / self.count as f64)
    }

    /// Sample covariance, `None` below two pairs
    pub fn sample_covariance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.c_xy / (self.count - 1) as f64)
    }

    /// Pearson correlation; `None` when either side has zero variance
    pub fn correlation(&self) -> Option<f64> {
        if self.count == 0 || self.m2_x == 0.0 || self.m2_y == 0.0 {
            return None;
        }
        Some(self.c_xy / (self.m2_x.sqrt() * self.m2_y.sqrt()))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Extend<(f64, f64)> for OnlineCovariance {
    fn extend<T: IntoIterator<Item = (f64, f64)>>(&mut self, iter: T) {
        for (x, y) in iter {
            self.update(x, y);
        }
    }
}

impl FromIterator<(f64, f64)> for OnlineCovariance {
    fn from_iter<T: IntoIterator<Item = (f64, f64)>>(iter: T) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}
