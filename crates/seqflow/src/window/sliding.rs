//! Sliding windows backed by a circular buffer

use std::fmt;

/// Overlapping windows of exactly `size` elements.
///
/// The buffer is written in place at a rotating cursor, so each emission costs
/// one copy of the window and no shifting.
pub struct Window<I: Iterator> {
    upstream: I,
    buffer: Vec<I::Item>,
    cursor: usize,
    size: usize,
}

impl<I: Iterator> Window<I>
where
    I::Item: Clone,
{
    /// Create a window stage. `size` must already be validated as non-zero.
    ///
    /// Only as much buffer as upstream promises is reserved up front, so a
    /// size far beyond the input length costs nothing.
    pub fn new(upstream: I, size: usize) -> Self {
        let reserve = size.min(upstream.size_hint().0);
        Self {
            upstream,
            buffer: Vec::with_capacity(reserve),
            cursor: 0,
            size,
        }
    }

    fn is_full(&self) -> bool {
        self.buffer.len() == self.size
    }

    fn push(&mut self, item: I::Item) {
        if self.is_full() {
            self.buffer[self.cursor] = item;
        } else {
            self.buffer.push(item);
        }
        self.cursor = (self.cursor + 1) % self.size;
    }

    fn snapshot(&self) -> Vec<I::Item> {
        // Oldest element sits at the cursor once the buffer is full
        let mut out = Vec::with_capacity(self.size);
        out.extend_from_slice(&self.buffer[self.cursor..]);
        out.extend_from_slice(&self.buffer[..self.cursor]);
        out
    }
}

impl<I: Iterator> fmt::Debug for Window<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("size", &self.size)
            .field("filled", &self.buffer.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl<I: Iterator> Iterator for Window<I>
where
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.upstream.next()?;
            self.push(item);
            if self.is_full() {
                return Some(self.snapshot());
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let missing = self.size - self.buffer.len();
        let (lower, upper) = self.upstream.size_hint();
        let adjust = |n: usize| {
            if self.is_full() {
                n
            } else {
                n.saturating_add(1).saturating_sub(missing)
            }
        };
        (adjust(lower), upper.map(adjust))
    }
}

/// Consecutive pairs `(a, b)`; a sliding window of two as tuples
pub struct Pairwise<I: Iterator> {
    upstream: I,
    prev: Option<I::Item>,
}

impl<I: Iterator> Pairwise<I>
where
    I::Item: Clone,
{
    pub fn new(upstream: I) -> Self {
        Self { upstream, prev: None }
    }
}

impl<I: Iterator + fmt::Debug> fmt::Debug for Pairwise<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pairwise")
            .field("upstream", &self.upstream)
            .field("primed", &self.prev.is_some())
            .finish()
    }
}

impl<I: Iterator> Iterator for Pairwise<I>
where
    I::Item: Clone,
{
    type Item = (I::Item, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let prev = match self.prev.take() {
            Some(prev) => prev,
            None => self.upstream.next()?,
        };
        let current = self.upstream.next()?;
        self.prev = Some(current.clone());
        Some((prev, current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_emits_once_full() {
        let out: Vec<_> = Window::new(vec![1, 2, 3, 4, 5].into_iter(), 3).collect();
        assert_eq!(out, vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);
    }

    #[test]
    fn test_window_shorter_than_size() {
        let out: Vec<Vec<i32>> = Window::new(vec![1, 2].into_iter(), 3).collect();
        assert!(out.is_empty());
    }

    #[test]
    fn test_window_of_one() {
        let out: Vec<_> = Window::new(1..=3, 1).collect();
        assert_eq!(out, vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_window_wraps_cursor_many_times() {
        let out: Vec<_> = Window::new(0..20, 4).collect();
        assert_eq!(out.len(), 17);
        for (start, window) in out.iter().enumerate() {
            let expected: Vec<i32> = (start as i32..start as i32 + 4).collect();
            assert_eq!(window, &expected);
        }
    }

    #[test]
    fn test_window_size_hint() {
        let window = Window::new(0..10, 3);
        assert_eq!(window.size_hint(), (8, Some(8)));
        let short = Window::new(0..2, 3);
        assert_eq!(short.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_window_does_not_pull_ahead() {
        let mut pulled = 0;
        let mut window = Window::new((0..100).inspect(|_| pulled += 1), 3);
        assert_eq!(window.next(), Some(vec![0, 1, 2]));
        assert_eq!(window.next(), Some(vec![1, 2, 3]));
        drop(window);
        assert_eq!(pulled, 4);
    }

    #[test]
    fn test_pairwise() {
        let out: Vec<_> = Pairwise::new(vec!['a', 'b', 'c'].into_iter()).collect();
        assert_eq!(out, vec![('a', 'b'), ('b', 'c')]);
        let single: Vec<(i32, i32)> = Pairwise::new(vec![1].into_iter()).collect();
        assert!(single.is_empty());
    }

    #[test]
    fn test_window_larger_than_any_input() {
        let out: Vec<Vec<i32>> = Window::new(vec![1, 2, 3].into_iter(), usize::MAX).collect();
        assert!(out.is_empty());

        let mut huge = Window::new(0..5, usize::MAX / 2);
        assert_eq!(huge.size_hint(), (0, Some(0)));
        assert_eq!(huge.next(), None);
    }
}
