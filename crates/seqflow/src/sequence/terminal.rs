//! Terminal reducers on [`Sequence`]
//!
//! Terminals drain a chain into a concrete result. They pull only as far as
//! they need to: `element_at(2)` pulls three elements, `first_or_err` one.
//! The statistics terminals are the strict variants and fail on empty input.

use super::Sequence;
use crate::aggregation::{strict, Summary};
use crate::config::NanPolicy;
use crate::core::ToNumeric;
use crate::error::{Result, SeqError};
use std::fmt::Debug;

impl<I: Iterator> Sequence<I> {
    /// Collect every element into a `Vec`
    pub fn to_vec(self) -> Vec<I::Item> {
        self.inner.collect()
    }

    /// The element at `index`, pulling no further than that position
    pub fn element_at(mut self, index: usize) -> Result<I::Item> {
        let mut seen = 0;
        while let Some(item) = self.inner.next() {
            if seen == index {
                return Ok(item);
            }
            seen += 1;
        }
        Err(SeqError::IndexOutOfBounds {
            operation: "element_at",
            index,
            len: seen,
        })
    }

    /// The first element, pulling exactly once
    pub fn first(mut self) -> Option<I::Item> {
        self.inner.next()
    }

    /// The first element, failing on an empty sequence
    pub fn first_or_err(mut self) -> Result<I::Item> {
        self.inner
            .next()
            .ok_or(SeqError::EmptySequence { operation: "first" })
    }

    /// The last element, failing on an empty sequence
    pub fn last_or_err(self) -> Result<I::Item> {
        self.inner
            .last()
            .ok_or(SeqError::EmptySequence { operation: "last" })
    }

    /// Fold with the first element as the seed, failing on an empty sequence
    pub fn reduce_or_err<F>(self, func: F) -> Result<I::Item>
    where
        F: FnMut(I::Item, I::Item) -> I::Item,
    {
        self.inner
            .reduce(func)
            .ok_or(SeqError::EmptySequence { operation: "reduce" })
    }
}

impl<I> Sequence<I>
where
    I: Iterator,
    I::Item: ToNumeric + Debug,
{
    /// Sum of all elements
    pub fn total(self) -> Result<f64> {
        strict::sum(self.inner)
    }

    /// Arithmetic mean
    pub fn mean(self) -> Result<f64> {
        strict::mean(self.inner)
    }

    /// Population variance (Welford)
    pub fn variance(self) -> Result<f64> {
        strict::variance(self.inner)
    }

    /// Population standard deviation
    pub fn std_dev(self) -> Result<f64> {
        strict::std_dev(self.inner)
    }

    /// Median, ignoring NaN
    pub fn median(self) -> Result<f64> {
        strict::median(self.inner)
    }

    /// Median with explicit NaN handling
    pub fn median_with(self, policy: NanPolicy) -> Result<f64> {
        strict::median_with(self.inner, policy)
    }

    /// Linearly interpolated percentile, `p` in [0, 100]
    pub fn percentile(self, p: f64) -> Result<f64> {
        strict::percentile(self.inner, p)
    }

    /// Percentile with explicit NaN handling
    pub fn percentile_with(self, p: f64, policy: NanPolicy) -> Result<f64> {
        strict::percentile_with(self.inner, p, policy)
    }

    /// All most frequent values, ascending
    pub fn mode(self) -> Result<Vec<f64>> {
        strict::mode(self.inner)
    }

    /// Smallest value
    pub fn min_value(self) -> Result<f64> {
        strict::min(self.inner)
    }

    /// Largest value
    pub fn max_value(self) -> Result<f64> {
        strict::max(self.inner)
    }

    /// Count, sum, mean, extremes and variance in one pass
    pub fn summary(self) -> Result<Summary> {
        strict::summary(self.inner)
    }
}
