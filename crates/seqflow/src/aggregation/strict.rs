//! Statistics that fail loudly
//!
//! Each function accepts anything whose elements implement [`ToNumeric`].
//! Conversion stops at the first element without a numeric reading
//! (`TypeConversion`), and empty input fails with `EmptySequence`.

use super::mode::mode_of;
use super::select::{median_of, percentile_of};
use super::{OnlineCovariance, Summary, Welford};
use crate::config::{validate_percentile, NanPolicy};
use crate::core::ToNumeric;
use crate::error::{Result, SeqError};
use std::fmt::Debug;

fn to_f64<T: ToNumeric + Debug>(operation: &'static str, item: &T) -> Result<f64> {
    item.to_numeric().ok_or_else(|| SeqError::TypeConversion {
        operation,
        value: format!("{item:?}"),
        target: "f64",
    })
}

/// Fold converted values into an accumulator, stopping at the first failure
fn accumulate<I, A>(operation: &'static str, values: I, mut acc: A) -> Result<A>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
    A: Extend<f64>,
{
    for item in values {
        acc.extend(Some(to_f64(operation, &item)?));
    }
    Ok(acc)
}

fn collect<I>(operation: &'static str, values: I) -> Result<Vec<f64>>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
{
    values
        .into_iter()
        .map(|item| to_f64(operation, &item))
        .collect()
}

fn empty(operation: &'static str) -> SeqError {
    SeqError::EmptySequence { operation }
}

pub fn sum<I>(values: I) -> Result<f64>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
{
    let summary = accumulate("sum", values, Summary::new())?;
    if summary.is_empty() {
        return Err(empty("sum"));
    }
    Ok(summary.sum())
}

pub fn mean<I>(values: I) -> Result<f64>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
{
    accumulate("mean", values, Summary::new())?
        .mean()
        .ok_or_else(|| empty("mean"))
}

/// Population variance (Welford)
pub fn variance<I>(values: I) -> Result<f64>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
{
    accumulate("variance", values, Welford::new())?
        .population_variance()
        .ok_or_else(|| empty("variance"))
}

/// Population standard deviation
pub fn std_dev<I>(values: I) -> Result<f64>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
{
    accumulate("std_dev", values, Welford::new())?
        .std_dev()
        .ok_or_else(|| empty("std_dev"))
}

/// Median, ignoring NaN
pub fn median<I>(values: I) -> Result<f64>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
{
    median_with(values, NanPolicy::Ignore)
}

/// Median with explicit NaN handling. Input that is all NaN under
/// [`NanPolicy::Ignore`] counts as empty.
pub fn median_with<I>(values: I, policy: NanPolicy) -> Result<f64>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
{
    median_of(collect("median", values)?, policy).ok_or_else(|| empty("median"))
}

/// Linearly interpolated percentile, ignoring NaN
pub fn percentile<I>(values: I, p: f64) -> Result<f64>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
{
    percentile_with(values, p, NanPolicy::Ignore)
}

/// Percentile with explicit NaN handling; `p` is validated before any pull
pub fn percentile_with<I>(values: I, p: f64, policy: NanPolicy) -> Result<f64>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
{
    validate_percentile("percentile", p)?;
    percentile_of(collect("percentile", values)?, p, policy).ok_or_else(|| empty("percentile"))
}

/// All most frequent values, ascending
pub fn mode<I>(values: I) -> Result<Vec<f64>>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
{
    let modes = mode_of(collect("mode", values)?);
    if modes.is_empty() {
        return Err(empty("mode"));
    }
    Ok(modes)
}

pub fn min<I>(values: I) -> Result<f64>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
{
    accumulate("min", values, Summary::new())?
        .min()
        .ok_or_else(|| empty("min"))
}

pub fn max<I>(values: I) -> Result<f64>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
{
    accumulate("max", values, Summary::new())?
        .max()
        .ok_or_else(|| empty("max"))
}

pub fn summary<I>(values: I) -> Result<Summary>
where
    I: IntoIterator,
    I::Item: ToNumeric + Debug,
{
    let summary = accumulate("summary", values, Summary::new())?;
    if summary.is_empty() {
        return Err(empty("summary"));
    }
    Ok(summary)
}

fn co_moments<I, X, Y>(operation: &'static str, pairs: I) -> Result<OnlineCovariance>
where
    I: IntoIterator<Item = (X, Y)>,
    X: ToNumeric + Debug,
    Y: ToNumeric + Debug,
{
    let mut acc = OnlineCovariance::new();
    for (x, y) in pairs {
        acc.update(to_f64(operation, &x)?, to_f64(operation, &y)?);
    }
    if acc.count() == 0 {
        return Err(empty(operation));
    }
    Ok(acc)
}

/// Population covariance of paired values
pub fn covariance<I, X, Y>(pairs: I) -> Result<f64>
where
    I: IntoIterator<Item = (X, Y)>,
    X: ToNumeric + Debug,
    Y: ToNumeric + Debug,
{
    co_moments("covariance", pairs)?
        .covariance()
        .ok_or_else(|| empty("covariance"))
}

/// Pearson correlation. Empty input fails; a constant side is `Ok(None)`
/// because correlation is undefined there.
pub fn correlation<I, X, Y>(pairs: I) -> Result<Option<f64>>
where
    I: IntoIterator<Item = (X, Y)>,
    X: ToNumeric + Debug,
    Y: ToNumeric + Debug,
{
    Ok(co_moments("correlation", pairs)?.correlation())
}
