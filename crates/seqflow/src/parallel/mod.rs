//! Bounded-concurrency parallel stages
//!
//! A parallel stage pulls upstream elements, starts an asynchronous
//! computation for each, and keeps at most `concurrency` of them held at once.
//! Computations may finish in any order; results are buffered by submission
//! index and released strictly in input order.
//!
//! ```text
//! submitted:  0  1  2  3
//! completed:     1     3  0  2
//! emitted:             0  1  2  3
//! ```
//!
//! All computations are polled by the task that consumes the stage, on a
//! single logical scheduler. No thread or task is spawned.
//!
//! # Example
//!
//! ```rust
//! use futures::TryStreamExt;
//! use seqflow::sequence::source;
//! use std::convert::Infallible;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let doubled: Vec<i32> = source::from_iter(1..=5)
//!     .map_parallel(3, |x| async move { Ok::<_, Infallible>(x * 2) })
//!     .unwrap()
//!     .try_collect()
//!     .await
//!     .unwrap();
//! assert_eq!(doubled, vec![2, 4, 6, 8, 10]);
//! # }
//! ```

mod stage;
mod stats;

pub use stage::{Emit, FilterMode, FlatMapMode, MapMode, ParallelStage};
pub use stats::ParallelStats;

use crate::config::{validate_concurrency, ParallelConfig};
use crate::error::{BoxError, Result};
use crate::sequence::Sequence;
use futures::stream::{self, Stream};
use std::future::Future;

/// Parallel stages on any [`Stream`]
pub trait ParallelStreamExt: Stream + Sized {
    /// Apply `func` to each element with up to `concurrency` computations
    /// held at once, yielding results in input order
    fn map_parallel<U, E, F, Fut>(
        self,
        concurrency: usize,
        func: F,
    ) -> Result<ParallelStage<Self, F, Fut, MapMode<U>>>
    where
        F: FnMut(Self::Item) -> Fut,
        Fut: Future<Output = std::result::Result<U, E>>,
        E: Into<BoxError>,
    {
        validate_concurrency("map_parallel", concurrency)?;
        Ok(ParallelStage::new(self, func, concurrency))
    }

    /// [`map_parallel`](Self::map_parallel) with the limit taken from configuration
    fn map_parallel_with<U, E, F, Fut>(
        self,
        config: &ParallelConfig,
        func: F,
    ) -> Result<ParallelStage<Self, F, Fut, MapMode<U>>>
    where
        F: FnMut(Self::Item) -> Fut,
        Fut: Future<Output = std::result::Result<U, E>>,
        E: Into<BoxError>,
    {
        config.validate()?;
        Ok(ParallelStage::new(self, func, config.concurrency))
    }

    /// Keep elements whose asynchronous predicate resolves to `true`.
    ///
    /// The predicate receives a clone; the original is kept until its
    /// verdict arrives.
    fn filter_parallel<E, F, Fut>(
        self,
        concurrency: usize,
        predicate: F,
    ) -> Result<ParallelStage<Self, F, Fut, FilterMode>>
    where
        Self::Item: Clone,
        F: FnMut(Self::Item) -> Fut,
        Fut: Future<Output = std::result::Result<bool, E>>,
        E: Into<BoxError>,
    {
        validate_concurrency("filter_parallel", concurrency)?;
        Ok(ParallelStage::new(self, predicate, concurrency))
    }

    /// Map each element to a collection asynchronously and splice the
    /// collections in input order
    fn flat_map_parallel<R, E, F, Fut>(
        self,
        concurrency: usize,
        func: F,
    ) -> Result<ParallelStage<Self, F, Fut, FlatMapMode<R>>>
    where
        R: IntoIterator,
        F: FnMut(Self::Item) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
        E: Into<BoxError>,
    {
        validate_concurrency("flat_map_parallel", concurrency)?;
        Ok(ParallelStage::new(self, func, concurrency))
    }
}

impl<S: Stream> ParallelStreamExt for S {}

impl<I: Iterator> Sequence<I> {
    /// Adapt into a stream, pulling this sequence on each poll
    pub fn into_stream(self) -> stream::Iter<I> {
        stream::iter(self.into_inner())
    }

    /// See [`ParallelStreamExt::map_parallel`]
    pub fn map_parallel<U, E, F, Fut>(
        self,
        concurrency: usize,
        func: F,
    ) -> Result<ParallelStage<stream::Iter<I>, F, Fut, MapMode<U>>>
    where
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = std::result::Result<U, E>>,
        E: Into<BoxError>,
    {
        self.into_stream().map_parallel(concurrency, func)
    }

    /// See [`ParallelStreamExt::filter_parallel`]
    pub fn filter_parallel<E, F, Fut>(
        self,
        concurrency: usize,
        predicate: F,
    ) -> Result<ParallelStage<stream::Iter<I>, F, Fut, FilterMode>>
    where
        I::Item: Clone,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = std::result::Result<bool, E>>,
        E: Into<BoxError>,
    {
        self.into_stream().filter_parallel(concurrency, predicate)
    }

    /// See [`ParallelStreamExt::flat_map_parallel`]
    pub fn flat_map_parallel<R, E, F, Fut>(
        self,
        concurrency: usize,
        func: F,
    ) -> Result<ParallelStage<stream::Iter<I>, F, Fut, FlatMapMode<R>>>
    where
        R: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
        E: Into<BoxError>,
    {
        self.into_stream().flat_map_parallel(concurrency, func)
    }
}
