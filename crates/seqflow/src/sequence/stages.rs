//! Stage implementations that have no direct `std::iter` counterpart
//!
//! Each stage owns its upstream iterator plus the private state its operation
//! needs. None of them pulls upstream more than once per element it yields,
//! except [`Buffered`], whose contract is to drain upstream first.

use crate::error::{BoxError, Result, SeqError};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// Inserts a separator between consecutive upstream elements
#[derive(Debug, Clone)]
pub struct Intersperse<I: Iterator> {
    upstream: I,
    separator: I::Item,
    held: Option<I::Item>,
    started: bool,
}

impl<I: Iterator> Intersperse<I>
where
    I::Item: Clone,
{
    pub fn new(upstream: I, separator: I::Item) -> Self {
        Self {
            upstream,
            separator,
            held: None,
            started: false,
        }
    }
}

impl<I: Iterator> Iterator for Intersperse<I>
where
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.held.take() {
            return Some(item);
        }

        let item = self.upstream.next()?;
        if self.started {
            // Separator goes out first; the element waits one pull.
            self.held = Some(item);
            Some(self.separator.clone())
        } else {
            self.started = true;
            Some(item)
        }
    }
}

/// Emits the running accumulator after each upstream element
pub struct Scan<I, A, F> {
    upstream: I,
    acc: Option<A>,
    func: F,
}

impl<I, A, F> Scan<I, A, F> {
    pub fn new(upstream: I, initial: A, func: F) -> Self {
        Self {
            upstream,
            acc: Some(initial),
            func,
        }
    }
}

impl<I: fmt::Debug, A: fmt::Debug, F> fmt::Debug for Scan<I, A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scan")
            .field("upstream", &self.upstream)
            .field("acc", &self.acc)
            .finish()
    }
}

impl<I, A, F> Iterator for Scan<I, A, F>
where
    I: Iterator,
    A: Clone,
    F: FnMut(A, I::Item) -> A,
{
    type Item = A;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.upstream.next()?;
        let acc = self.acc.take()?;
        let next = (self.func)(acc, item);
        self.acc = Some(next.clone());
        Some(next)
    }
}

/// Drops elements equal to one already yielded.
///
/// The seen-set grows with the number of unique elements and is never pruned.
#[derive(Debug, Clone)]
pub struct Distinct<I: Iterator> {
    upstream: I,
    seen: HashSet<I::Item>,
}

impl<I: Iterator> Distinct<I>
where
    I::Item: Hash + Eq + Clone,
{
    pub fn new(upstream: I) -> Self {
        Self {
            upstream,
            seen: HashSet::new(),
        }
    }

    /// Number of unique elements seen so far
    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }
}

impl<I: Iterator> Iterator for Distinct<I>
where
    I::Item: Hash + Eq + Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.upstream.next()?;
            if self.seen.insert(item.clone()) {
                return Some(item);
            }
        }
    }
}

/// Drops elements whose key equals that of an element already yielded
pub struct DistinctBy<I, K, F> {
    upstream: I,
    seen: HashSet<K>,
    key: F,
}

impl<I, K, F> DistinctBy<I, K, F>
where
    K: Hash + Eq,
{
    pub fn new(upstream: I, key: F) -> Self {
        Self {
            upstream,
            seen: HashSet::new(),
            key,
        }
    }

    /// Number of unique keys seen so far
    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }
}

impl<I: fmt::Debug, K, F> fmt::Debug for DistinctBy<I, K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistinctBy")
            .field("upstream", &self.upstream)
            .field("unique", &self.seen.len())
            .finish()
    }
}

impl<I, K, F> Iterator for DistinctBy<I, K, F>
where
    I: Iterator,
    K: Hash + Eq,
    F: FnMut(&I::Item) -> K,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.upstream.next()?;
            if self.seen.insert((self.key)(&item)) {
                return Some(item);
            }
        }
    }
}

/// Applies a fallible function, yielding `Err` once on the first failure
pub struct TryMap<I, F> {
    upstream: I,
    func: F,
    position: usize,
    failed: bool,
}

impl<I, F> TryMap<I, F> {
    pub fn new(upstream: I, func: F) -> Self {
        Self {
            upstream,
            func,
            position: 0,
            failed: false,
        }
    }
}

impl<I: fmt::Debug, F> fmt::Debug for TryMap<I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryMap")
            .field("upstream", &self.upstream)
            .field("position", &self.position)
            .field("failed", &self.failed)
            .finish()
    }
}

impl<I, F, U, E> Iterator for TryMap<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> std::result::Result<U, E>,
    E: Into<BoxError>,
{
    type Item = Result<U>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let item = self.upstream.next()?;
        let index = self.position;
        self.position += 1;

        match (self.func)(item) {
            Ok(value) => Some(Ok(value)),
            Err(e) => {
                self.failed = true;
                Some(Err(SeqError::operation("try_map", index, e)))
            }
        }
    }
}

/// Filters with a fallible predicate, yielding `Err` once on the first failure
pub struct TryFilter<I, F> {
    upstream: I,
    predicate: F,
    position: usize,
    failed: bool,
}

impl<I, F> TryFilter<I, F> {
    pub fn new(upstream: I, predicate: F) -> Self {
        Self {
            upstream,
            predicate,
            position: 0,
            failed: false,
        }
    }
}

impl<I: fmt::Debug, F> fmt::Debug for TryFilter<I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFilter")
            .field("upstream", &self.upstream)
            .field("position", &self.position)
            .field("failed", &self.failed)
            .finish()
    }
}

impl<I, F, E> Iterator for TryFilter<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> std::result::Result<bool, E>,
    E: Into<BoxError>,
{
    type Item = Result<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let item = self.upstream.next()?;
            let index = self.position;
            self.position += 1;

            match (self.predicate)(&item) {
                Ok(true) => return Some(Ok(item)),
                Ok(false) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(SeqError::operation("try_filter", index, e)));
                }
            }
        }
    }
}

/// Drains upstream into memory on the first pull, rearranges, then replays.
///
/// Used by `reverse` and the sort family. Never completes on an infinite
/// upstream.
pub struct Buffered<I: Iterator, F> {
    upstream: Option<I>,
    arrange: Option<F>,
    buffer: std::vec::IntoIter<I::Item>,
    operation: &'static str,
}

impl<I: Iterator, F> Buffered<I, F>
where
    F: FnOnce(&mut Vec<I::Item>),
{
    pub fn new(upstream: I, operation: &'static str, arrange: F) -> Self {
        Self {
            upstream: Some(upstream),
            arrange: Some(arrange),
            buffer: Vec::new().into_iter(),
            operation,
        }
    }

    fn fill(&mut self) {
        let Some(upstream) = self.upstream.take() else {
            return;
        };

        let mut items: Vec<I::Item> = upstream.collect();
        if let Some(arrange) = self.arrange.take() {
            arrange(&mut items);
        }
        debug!(
            operation = self.operation,
            buffered = items.len(),
            "upstream drained into buffer"
        );
        self.buffer = items.into_iter();
    }
}

impl<I: Iterator, F> fmt::Debug for Buffered<I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffered")
            .field("operation", &self.operation)
            .field("drained", &self.upstream.is_none())
            .field("remaining", &self.buffer.len())
            .finish()
    }
}

impl<I: Iterator, F> Iterator for Buffered<I, F>
where
    F: FnOnce(&mut Vec<I::Item>),
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.fill();
        self.buffer.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.upstream {
            Some(upstream) => upstream.size_hint(),
            None => self.buffer.size_hint(),
        }
    }
}
