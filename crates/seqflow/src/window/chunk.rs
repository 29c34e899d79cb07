//! Non-overlapping chunks

use std::fmt;

/// Groups upstream elements into vectors of `size`; the last may be shorter
pub struct Chunk<I> {
    upstream: I,
    size: usize,
    done: bool,
}

impl<I: Iterator> Chunk<I> {
    /// Create a chunk stage. `size` must already be validated as non-zero.
    pub fn new(upstream: I, size: usize) -> Self {
        Self {
            upstream,
            size,
            done: false,
        }
    }
}

impl<I: fmt::Debug> fmt::Debug for Chunk<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("upstream", &self.upstream)
            .field("size", &self.size)
            .field("done", &self.done)
            .finish()
    }
}

impl<I: Iterator> Iterator for Chunk<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // Reserve what upstream promises, not the requested size
        let reserve = self.size.min(self.upstream.size_hint().0.max(1));
        let mut chunk = Vec::with_capacity(reserve);
        while chunk.len() < self.size {
            match self.upstream.next() {
                Some(item) => chunk.push(item),
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if chunk.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let (lower, upper) = self.upstream.size_hint();
        let chunks = |n: usize| n.div_ceil(self.size);
        (chunks(lower), upper.map(chunks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_with_short_tail() {
        let out: Vec<_> = Chunk::new(vec![1, 2, 3, 4, 5].into_iter(), 2).collect();
        assert_eq!(out, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn test_chunk_exact_multiple() {
        let out: Vec<_> = Chunk::new(1..=6, 3).collect();
        assert_eq!(out, vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn test_chunk_empty_input() {
        let mut stage = Chunk::new(std::iter::empty::<u8>(), 4);
        assert_eq!(stage.next(), None);
        assert_eq!(stage.next(), None);
    }

    #[test]
    fn test_chunk_stops_after_exhaustion() {
        // An upstream that resumes after returning None must not be pulled again
        let mut calls = 0;
        let flaky = std::iter::from_fn(move || {
            calls += 1;
            if calls == 2 {
                None
            } else {
                Some(calls)
            }
        });
        let mut stage = Chunk::new(flaky, 3);
        assert_eq!(stage.next(), Some(vec![1]));
        assert_eq!(stage.next(), None);
    }

    #[test]
    fn test_chunk_size_hint() {
        assert_eq!(Chunk::new(0..7, 3).size_hint(), (3, Some(3)));
    }

    #[test]
    fn test_chunk_larger_than_any_input() {
        let out: Vec<_> = Chunk::new(vec![1, 2, 3].into_iter(), usize::MAX).collect();
        assert_eq!(out, vec![vec![1, 2, 3]]);

        let unsized_upstream = (1..=4).filter(|x| x % 2 == 0);
        let out: Vec<_> = Chunk::new(unsized_upstream, usize::MAX / 2).collect();
        assert_eq!(out, vec![vec![2, 4]]);
    }
}
