//! Exponentially weighted moving average

use crate::config::validate_alpha;
use crate::error::{Result, SeqError};
use serde::{Deserialize, Serialize};

/// Exponential moving average calculator
///
/// The first value is taken as is; after that
/// `value = alpha * x + (1 - alpha) * previous`. A non-finite input poisons
/// every later value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Ewma {
    alpha: f64,
    current: Option<f64>,
}

impl Ewma {
    /// Create a new EWMA with the given smoothing factor (0 < alpha <= 1)
    pub fn new(alpha: f64) -> Result<Self> {
        validate_alpha("ewma", alpha)?;
        Ok(Self {
            alpha,
            current: None,
        })
    }

    /// Create an EWMA with a span (number of periods): `alpha = 2 / (span + 1)`
    pub fn with_span(span: f64) -> Result<Self> {
        if !span.is_finite() || span < 1.0 {
            return Err(SeqError::validation(
                "ewma",
                "span",
                span,
                "must be finite and at least 1",
            ));
        }
        Self::new(2.0 / (span + 1.0))
    }

    /// Update with a new value and return the smoothed value
    pub fn update(&mut self, value: f64) -> f64 {
        let next = match self.current {
            Some(current) => self.alpha * value + (1.0 - self.alpha) * current,
            None => value,
        };
        self.current = Some(next);
        next
    }

    /// Get the current value
    pub fn value(&self) -> Option<f64> {
        self.current
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Reset to initial state
    pub fn reset(&mut self) {
        self.current = None;
    }
}

/// Stage emitting the running EWMA of its upstream
#[derive(Debug, Clone)]
pub struct EwmaStage<I> {
    upstream: I,
    state: Ewma,
}

impl<I: Iterator<Item = f64>> EwmaStage<I> {
    /// Validates `alpha` before anything is pulled
    pub fn new(upstream: I, alpha: f64) -> Result<Self> {
        Ok(Self {
            upstream,
            state: Ewma::new(alpha)?,
        })
    }

    /// Current smoothed value
    pub fn value(&self) -> Option<f64> {
        self.state.value()
    }
}

impl<I: Iterator<Item = f64>> Iterator for EwmaStage<I> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.upstream.next()?;
        Some(self.state.update(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_alpha_validation() {
        for alpha in [0.0, -0.1, 1.5, f64::NAN, f64::INFINITY] {
            assert_eq!(Ewma::new(alpha).unwrap_err().kind(), ErrorKind::Validation);
        }
        assert!(Ewma::new(1.0).is_ok());
    }

    #[test]
    fn test_recurrence() {
        let out: Vec<f64> = EwmaStage::new(vec![10.0, 20.0, 30.0].into_iter(), 0.5)
            .unwrap()
            .collect();
        assert_eq!(out, vec![10.0, 15.0, 22.5]);
    }

    #[test]
    fn test_alpha_one_is_identity() {
        let input = vec![3.0, -1.0, 8.5, 0.0];
        let out: Vec<f64> = EwmaStage::new(input.clone().into_iter(), 1.0).unwrap().collect();
        assert_eq!(out, input);
    }

    #[test]
    fn test_non_finite_input_propagates() {
        let out: Vec<f64> = EwmaStage::new(vec![1.0, f64::NAN, 2.0, 3.0].into_iter(), 0.3)
            .unwrap()
            .collect();
        assert_eq!(out[0], 1.0);
        assert!(out[1..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_with_span() {
        let ewma = Ewma::with_span(9.0).unwrap();
        assert!((ewma.alpha() - 0.2).abs() < 1e-12);
        assert!(Ewma::with_span(0.5).is_err());
    }

    #[test]
    fn test_reset() {
        let mut ewma = Ewma::new(0.5).unwrap();
        ewma.update(4.0);
        ewma.update(8.0);
        assert_eq!(ewma.value(), Some(6.0));
        ewma.reset();
        assert_eq!(ewma.value(), None);
        assert_eq!(ewma.update(1.0), 1.0);
    }
}
