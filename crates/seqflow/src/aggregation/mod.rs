//! Streaming statistics
//!
//! This module provides numerically stable accumulators and the two families
//! of statistical functions built on them:
//!
//! - **Accumulators**: feed values one at a time, merge, serialize
//! - [`strict`]: `Result`-returning, fails on empty input or unconvertible values
//! - [`lenient`]: `f64` input, returns `None` on empty input
//!
//! # Available Accumulators
//!
//! - [`Welford`]: running mean and variance
//! - [`OnlineCovariance`]: running covariance and correlation of pairs
//! - [`Ewma`]: exponentially weighted moving average, also as [`EwmaStage`]
//! - [`Summary`]: count, sum, extremes and variance in one pass
//!
//! Median and percentile are computed by quickselect (see [`select`]).
//!
//! # Examples
//!
//! ```rust
//! use seqflow::aggregation::{lenient, strict, Welford};
//!
//! let mut acc = Welford::new();
//! for x in [1e15, 1e15 + 1.0, 1e15 + 2.0, 1e15 + 3.0, 1e15 + 4.0] {
//!     acc.update(x);
//! }
//! assert!((acc.population_variance().unwrap() - 2.0).abs() < 1e-6);
//!
//! assert_eq!(strict::median(vec![3, 1, 2]).unwrap(), 2.0);
//! assert!(strict::mean(Vec::<f64>::new()).is_err());
//! assert_eq!(lenient::mean(Vec::new()), None);
//! ```

mod covariance;
mod ewma;
mod mode;
mod summary;
mod welford;

pub mod lenient;
pub mod select;
pub mod strict;

pub use covariance::OnlineCovariance;
pub use ewma::{Ewma, EwmaStage};
pub use mode::mode_of;
pub use select::{median_of, percentile_of, select_nth};
pub use summary::Summary;
pub use welford::Welford;
