//! K-way merge of sorted sequences
//!
//! [`Merge`] keeps one heap entry per source that still has elements. The
//! root is always the smallest current head; yielding it pulls the next
//! element from the same source and sifts it into place, so each element
//! costs `O(log k)` for `k` sources.
//!
//! Inputs are assumed, not checked, to be sorted under the comparator.
//! Unsorted input produces a deterministic interleaving rather than an error.
//! Equal heads are yielded in source order, which makes the merge stable.

use crate::sequence::Sequence;
use std::cmp::Ordering;
use std::fmt;

/// Merge sources sorted by natural order
pub fn merge<S>(
    sources: impl IntoIterator<Item = S>,
) -> Sequence<Merge<S::IntoIter, fn(&S::Item, &S::Item) -> Ordering>>
where
    S: IntoIterator,
    S::Item: Ord,
{
    merge_by(<S::Item as Ord>::cmp as fn(&S::Item, &S::Item) -> Ordering, sources)
}

/// Merge sources sorted by `compare`
pub fn merge_by<S, F>(compare: F, sources: impl IntoIterator<Item = S>) -> Sequence<Merge<S::IntoIter, F>>
where
    S: IntoIterator,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    Sequence::new(Merge::new(
        sources.into_iter().map(IntoIterator::into_iter).collect(),
        compare,
    ))
}

struct HeapEntry<T> {
    value: T,
    source: usize,
}

/// Streaming k-way merge stage
pub struct Merge<I: Iterator, F> {
    sources: Vec<I>,
    heap: Vec<HeapEntry<I::Item>>,
    compare: F,
    seeded: bool,
}

impl<I, F> Merge<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    /// Create a merge over `sources`. Nothing is pulled until the first `next`.
    pub fn new(sources: Vec<I>, compare: F) -> Self {
        Self {
            heap: Vec::with_capacity(sources.len()),
            sources,
            compare,
            seeded: false,
        }
    }

    /// Number of sources that still have elements
    pub fn active_sources(&self) -> usize {
        if self.seeded {
            self.heap.len()
        } else {
            self.sources.len()
        }
    }

    fn seed(&mut self) {
        self.seeded = true;
        for source in 0..self.sources.len() {
            if let Some(value) = self.sources[source].next() {
                self.heap.push(HeapEntry { value, source });
                self.sift_up(self.heap.len() - 1);
            }
        }
    }

    fn less(&mut self, a: usize, b: usize) -> bool {
        let (a, b) = (&self.heap[a], &self.heap[b]);
        match (self.compare)(&a.value, &b.value) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => a.source < b.source,
        }
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.heap.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;

            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == pos {
                return;
            }
            self.heap.swap(pos, smallest);
            pos = smallest;
        }
    }
}

impl<I: Iterator, F> fmt::Debug for Merge<I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merge")
            .field("sources", &self.sources.len())
            .field("heap", &self.heap.len())
            .field("seeded", &self.seeded)
            .finish()
    }
}

impl<I, F> Iterator for Merge<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.seeded {
            self.seed();
        }
        let source = self.heap.first()?.source;

        match self.sources[source].next() {
            Some(value) => {
                let out = std::mem::replace(&mut self.heap[0].value, value);
                self.sift_down(0);
                Some(out)
            }
            None => {
                let entry = self.heap.swap_remove(0);
                if !self.heap.is_empty() {
                    self.sift_down(0);
                }
                Some(entry.value)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.heap.len();
        let live: Vec<usize> = if self.seeded {
            self.heap.iter().map(|entry| entry.source).collect()
        } else {
            (0..self.sources.len()).collect()
        };

        live.into_iter()
            .map(|source| self.sources[source].size_hint())
            .fold((buffered, Some(buffered)), |(lo, hi), (l, h)| {
                (
                    lo.saturating_add(l),
                    hi.zip(h).and_then(|(a, b)| a.checked_add(b)),
                )
            })
    }
}
