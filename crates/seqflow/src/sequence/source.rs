//! Synchronous sources
//!
//! Sources are the leaves of every chain. Apart from the range constructors,
//! which validate their step, building a source cannot fail and does no work.

use super::Sequence;
use crate::config::{validate_int_step, validate_step};
use crate::error::{Result, SeqError};

/// Wrap anything iterable
pub fn from_iter<T: IntoIterator>(iterable: T) -> Sequence<T::IntoIter> {
    Sequence::new(iterable.into_iter())
}

/// A sequence with no elements
pub fn empty<T>() -> Sequence<std::iter::Empty<T>> {
    Sequence::new(std::iter::empty())
}

/// A sequence with exactly one element
pub fn once<T>(value: T) -> Sequence<std::iter::Once<T>> {
    Sequence::new(std::iter::once(value))
}

/// An infinite sequence repeating `value`
pub fn repeat<T: Clone>(value: T) -> Sequence<std::iter::Repeat<T>> {
    Sequence::new(std::iter::repeat(value))
}

/// `value` repeated `times` times
pub fn repeat_n<T: Clone>(value: T, times: usize) -> Sequence<std::iter::Take<std::iter::Repeat<T>>> {
    Sequence::new(std::iter::repeat(value).take(times))
}

/// An infinite sequence `seed, f(seed), f(f(seed)), ...`
pub fn generate<T, F>(seed: T, mut func: F) -> Sequence<impl Iterator<Item = T>>
where
    F: FnMut(&T) -> T,
{
    Sequence::new(std::iter::successors(Some(seed), move |prev| Some(func(prev))))
}

/// Integers from `start` towards `end` (exclusive) in increments of `step`
pub fn range(start: i64, end: i64, step: i64) -> Result<Sequence<IntRange>> {
    validate_int_step("range", step)?;
    Ok(Sequence::new(IntRange {
        next: Some(start),
        end,
        step,
    }))
}

/// Floats from `start` towards `end` (exclusive) in increments of `step`.
///
/// Each value is computed as `start + i * step`, so rounding error does not
/// accumulate over long ranges.
pub fn range_f64(start: f64, end: f64, step: f64) -> Result<Sequence<FloatRange>> {
    validate_step("range_f64", step)?;
    if !start.is_finite() {
        return Err(SeqError::validation("range_f64", "start", start, "must be finite"));
    }
    if end.is_nan() {
        return Err(SeqError::validation("range_f64", "end", end, "must not be NaN"));
    }
    Ok(Sequence::new(FloatRange {
        start,
        end,
        step,
        index: 0,
        done: false,
    }))
}

/// Stepped integer range, ascending or descending
#[derive(Debug, Clone)]
pub struct IntRange {
    next: Option<i64>,
    end: i64,
    step: i64,
}

impl Iterator for IntRange {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let current = self.next?;
        let in_range = if self.step > 0 {
            current < self.end
        } else {
            current > self.end
        };
        if !in_range {
            self.next = None;
            return None;
        }
        self.next = current.checked_add(self.step);
        Some(current)
    }
}

/// Stepped float range, ascending or descending
#[derive(Debug, Clone)]
pub struct FloatRange {
    start: f64,
    end: f64,
    step: f64,
    index: u64,
    done: bool,
}

impl Iterator for FloatRange {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }
        let value = self.start + self.index as f64 * self.step;
        let in_range = if self.step > 0.0 {
            value < self.end
        } else {
            value > self.end
        };
        if !in_range {
            self.done = true;
            return None;
        }
        self.index += 1;
        Some(value)
    }
}
