//! Lazy, pull-based transform chains
//!
//! A [`Sequence`] owns exactly one upstream iterator. Every chain method
//! consumes the sequence and returns a new one whose stage owns the previous
//! iterator, so a chain is a linked list of owners ending at the source.
//! Building a chain never pulls: work happens only when the consumer calls
//! `next()` (directly, through a terminal reducer, or through a parallel
//! stage).
//!
//! # Example
//!
//! ```rust
//! use seqflow::sequence::source;
//!
//! let out: Vec<Vec<i32>> = source::from_iter(1..=10)
//!     .filter(|x| x % 2 == 1)
//!     .map(|x| x * 10)
//!     .chunk(2)
//!     .unwrap()
//!     .to_vec();
//!
//! assert_eq!(out, vec![vec![10, 30], vec![50, 70], vec![90]]);
//! ```
//!
//! Stages fall in three groups:
//!
//! - **Stateless**: forward zero or more elements per upstream pull
//!   (`map`, `filter`, `take`, `intersperse`, `distinct`, ...)
//! - **Windowing**: buffer a bounded number of elements (`window`, `chunk`)
//! - **Buffering**: drain the whole upstream before the first element
//!   (`reverse`, `sort`, `sort_by`, ...). These never finish on infinite input.

pub mod async_source;
pub mod source;
pub mod stages;
mod terminal;

pub use async_source::{from_async_source, from_receiver, AsyncSource};
pub use stages::{Buffered, Distinct, DistinctBy, Intersperse, Scan, TryFilter, TryMap};

use crate::aggregation::EwmaStage;
use crate::config::validate_window_size;
use crate::error::{BoxError, Result};
use crate::window::{Chunk, Pairwise, Window};
use std::cmp::Ordering;
use std::hash::Hash;

/// A lazily evaluated, single-consumption sequence
#[derive(Debug, Clone)]
#[must_use = "sequences are lazy and do nothing unless consumed"]
pub struct Sequence<I> {
    inner: I,
}

impl<I> Sequence<I> {
    /// Wrap an iterator without touching it
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    /// Unwrap the underlying stage
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: Iterator> Iterator for Sequence<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: Iterator> Sequence<I> {
    /// Transform each element
    pub fn map<U, F>(self, func: F) -> Sequence<std::iter::Map<I, F>>
    where
        F: FnMut(I::Item) -> U,
    {
        Sequence::new(self.inner.map(func))
    }

    /// Keep elements matching `predicate`
    pub fn filter<F>(self, predicate: F) -> Sequence<std::iter::Filter<I, F>>
    where
        F: FnMut(&I::Item) -> bool,
    {
        Sequence::new(self.inner.filter(predicate))
    }

    /// Pair each element with its zero-based position
    pub fn enumerate(self) -> Sequence<std::iter::Enumerate<I>> {
        Sequence::new(self.inner.enumerate())
    }

    /// Yield at most `n` elements; never pulls past the `n`th
    pub fn take(self, n: usize) -> Sequence<std::iter::Take<I>> {
        Sequence::new(self.inner.take(n))
    }

    /// Skip the first `n` elements
    pub fn drop(self, n: usize) -> Sequence<std::iter::Skip<I>> {
        Sequence::new(self.inner.skip(n))
    }

    /// Yield elements while `predicate` holds, then stop
    pub fn take_while<F>(self, predicate: F) -> Sequence<std::iter::TakeWhile<I, F>>
    where
        F: FnMut(&I::Item) -> bool,
    {
        Sequence::new(self.inner.take_while(predicate))
    }

    /// Skip elements while `predicate` holds, then yield the rest
    pub fn drop_while<F>(self, predicate: F) -> Sequence<std::iter::SkipWhile<I, F>>
    where
        F: FnMut(&I::Item) -> bool,
    {
        Sequence::new(self.inner.skip_while(predicate))
    }

    /// Map each element to a sub-sequence and splice it in
    pub fn flat_map<U, F>(self, func: F) -> Sequence<std::iter::FlatMap<I, U, F>>
    where
        U: IntoIterator,
        F: FnMut(I::Item) -> U,
    {
        Sequence::new(self.inner.flat_map(func))
    }

    /// Splice nested sequences in order
    pub fn flatten(self) -> Sequence<std::iter::Flatten<I>>
    where
        I::Item: IntoIterator,
    {
        Sequence::new(self.inner.flatten())
    }

    /// Continue with `other` once this sequence is exhausted
    pub fn concat<J>(self, other: J) -> Sequence<std::iter::Chain<I, J::IntoIter>>
    where
        J: IntoIterator<Item = I::Item>,
    {
        Sequence::new(self.inner.chain(other))
    }

    /// Pair elements with another sequence, stopping at the shorter one
    pub fn zip<J>(self, other: J) -> Sequence<std::iter::Zip<I, J::IntoIter>>
    where
        J: IntoIterator,
    {
        Sequence::new(self.inner.zip(other))
    }

    /// Observe each element as it passes
    pub fn inspect<F>(self, func: F) -> Sequence<std::iter::Inspect<I, F>>
    where
        F: FnMut(&I::Item),
    {
        Sequence::new(self.inner.inspect(func))
    }

    /// Insert `separator` between consecutive elements
    pub fn intersperse(self, separator: I::Item) -> Sequence<Intersperse<I>>
    where
        I::Item: Clone,
    {
        Sequence::new(Intersperse::new(self.inner, separator))
    }

    /// Emit every intermediate accumulator value
    pub fn scan<A, F>(self, initial: A, func: F) -> Sequence<Scan<I, A, F>>
    where
        A: Clone,
        F: FnMut(A, I::Item) -> A,
    {
        Sequence::new(Scan::new(self.inner, initial, func))
    }

    /// Drop elements already seen
    pub fn distinct(self) -> Sequence<Distinct<I>>
    where
        I::Item: Hash + Eq + Clone,
    {
        Sequence::new(Distinct::new(self.inner))
    }

    /// Drop elements whose key was already seen
    pub fn distinct_by<K, F>(self, key: F) -> Sequence<DistinctBy<I, K, F>>
    where
        K: Hash + Eq,
        F: FnMut(&I::Item) -> K,
    {
        Sequence::new(DistinctBy::new(self.inner, key))
    }

    /// Apply a fallible function; the first failure ends the sequence
    pub fn try_map<U, E, F>(self, func: F) -> Sequence<TryMap<I, F>>
    where
        F: FnMut(I::Item) -> std::result::Result<U, E>,
        E: Into<BoxError>,
    {
        Sequence::new(TryMap::new(self.inner, func))
    }

    /// Filter with a fallible predicate; the first failure ends the sequence
    pub fn try_filter<E, F>(self, predicate: F) -> Sequence<TryFilter<I, F>>
    where
        F: FnMut(&I::Item) -> std::result::Result<bool, E>,
        E: Into<BoxError>,
    {
        Sequence::new(TryFilter::new(self.inner, predicate))
    }

    /// Reverse the sequence. Drains upstream on first pull.
    pub fn reverse(self) -> Sequence<Buffered<I, impl FnOnce(&mut Vec<I::Item>)>> {
        Sequence::new(Buffered::new(self.inner, "reverse", |items: &mut Vec<I::Item>| {
            items.reverse()
        }))
    }

    /// Sort by natural order (stable). Drains upstream on first pull.
    pub fn sort(self) -> Sequence<Buffered<I, impl FnOnce(&mut Vec<I::Item>)>>
    where
        I::Item: Ord,
    {
        Sequence::new(Buffered::new(self.inner, "sort", |items: &mut Vec<I::Item>| {
            items.sort()
        }))
    }

    /// Sort with a comparator (stable). Drains upstream on first pull.
    pub fn sort_by<F>(self, compare: F) -> Sequence<Buffered<I, impl FnOnce(&mut Vec<I::Item>)>>
    where
        F: FnMut(&I::Item, &I::Item) -> Ordering,
    {
        Sequence::new(Buffered::new(self.inner, "sort_by", move |items: &mut Vec<I::Item>| {
            items.sort_by(compare)
        }))
    }

    /// Sort by an extracted key (stable). Drains upstream on first pull.
    pub fn sort_by_key<K, F>(self, key: F) -> Sequence<Buffered<I, impl FnOnce(&mut Vec<I::Item>)>>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        Sequence::new(Buffered::new(self.inner, "sort_by_key", move |items: &mut Vec<I::Item>| {
            items.sort_by_key(key)
        }))
    }

    /// Overlapping windows of exactly `size` elements
    pub fn window(self, size: usize) -> Result<Sequence<Window<I>>>
    where
        I::Item: Clone,
    {
        validate_window_size("window", size)?;
        Ok(Sequence::new(Window::new(self.inner, size)))
    }

    /// Non-overlapping chunks of `size` elements; the last may be shorter
    pub fn chunk(self, size: usize) -> Result<Sequence<Chunk<I>>> {
        validate_window_size("chunk", size)?;
        Ok(Sequence::new(Chunk::new(self.inner, size)))
    }

    /// Consecutive pairs `(a, b)`
    pub fn pairwise(self) -> Sequence<Pairwise<I>>
    where
        I::Item: Clone,
    {
        Sequence::new(Pairwise::new(self.inner))
    }
}

impl<I: Iterator<Item = f64>> Sequence<I> {
    /// Sort floats by IEEE total order (NaN last). Drains upstream on first pull.
    pub fn sort_floats(self) -> Sequence<Buffered<I, impl FnOnce(&mut Vec<f64>)>> {
        Sequence::new(Buffered::new(self.inner, "sort_floats", |items: &mut Vec<f64>| {
            items.sort_by(f64::total_cmp)
        }))
    }

    /// Exponentially weighted moving average with smoothing factor `alpha`
    pub fn ewma(self, alpha: f64) -> Result<Sequence<EwmaStage<I>>> {
        Ok(Sequence::new(EwmaStage::new(self.inner, alpha)?))
    }
}

#[cfg(test)]
mod tests {
    use super::source;
    use crate::error::ErrorKind;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_construction_does_not_pull() {
        let pulls = Rc::new(Cell::new(0));
        let counter = pulls.clone();
        let seq = source::from_iter((0..10).inspect(move |_| counter.set(counter.get() + 1)))
            .map(|x| x + 1)
            .filter(|x| x % 2 == 0)
            .sort()
            .reverse();
        assert_eq!(pulls.get(), 0);
        drop(seq);
        assert_eq!(pulls.get(), 0);
    }

    #[test]
    fn test_take_stops_pulling() {
        let pulls = Rc::new(Cell::new(0));
        let counter = pulls.clone();
        let out = source::from_iter((0..).inspect(move |_| counter.set(counter.get() + 1)))
            .map(|x| x * 2)
            .take(3)
            .to_vec();
        assert_eq!(out, vec![0, 2, 4]);
        assert_eq!(pulls.get(), 3);
    }

    #[test]
    fn test_map_filter_enumerate() {
        let out = source::from_iter(vec!["a", "bb", "ccc"])
            .map(str::len)
            .filter(|len| *len > 1)
            .enumerate()
            .to_vec();
        assert_eq!(out, vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn test_drop_take_while_drop_while() {
        let out = source::from_iter(1..=10)
            .drop(2)
            .drop_while(|x| *x < 5)
            .take_while(|x| *x < 9)
            .to_vec();
        assert_eq!(out, vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_flat_map_concat_flatten() {
        let out = source::from_iter(1..=3)
            .flat_map(|x| vec![x; x])
            .concat(vec![0])
            .to_vec();
        assert_eq!(out, vec![1, 2, 2, 3, 3, 3, 0]);

        let nested = source::from_iter(vec![vec![1], vec![], vec![2, 3]]).flatten().to_vec();
        assert_eq!(nested, vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_variants() {
        assert_eq!(source::from_iter(vec![3, 1, 2]).sort().to_vec(), vec![1, 2, 3]);
        assert_eq!(
            source::from_iter(vec![3, 1, 2]).sort_by(|a, b| b.cmp(a)).to_vec(),
            vec![3, 2, 1]
        );
        assert_eq!(
            source::from_iter(vec!["ccc", "a", "bb"]).sort_by_key(|s| s.len()).to_vec(),
            vec!["a", "bb", "ccc"]
        );
        let floats = source::from_iter(vec![2.0, f64::NAN, -1.0]).sort_floats().to_vec();
        assert_eq!(&floats[..2], &[-1.0, 2.0]);
        assert!(floats[2].is_nan());
    }

    #[test]
    fn test_reverse() {
        assert_eq!(source::from_iter(1..=4).reverse().to_vec(), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_window_and_chunk_validate_eagerly() {
        let err = source::from_iter(1..=3).window(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = source::from_iter(1..=3).chunk(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_ewma_validates_eagerly() {
        assert!(source::from_iter(vec![1.0]).ewma(0.0).is_err());
        assert!(source::from_iter(vec![1.0]).ewma(0.5).is_ok());
    }

    #[test]
    fn test_zip_and_pairwise() {
        let zipped = source::from_iter(1..=3).zip(vec!['a', 'b']).to_vec();
        assert_eq!(zipped, vec![(1, 'a'), (2, 'b')]);
        let pairs = source::from_iter(1..=4).pairwise().to_vec();
        assert_eq!(pairs, vec![(1, 2), (2, 3), (3, 4)]);
    }
}
