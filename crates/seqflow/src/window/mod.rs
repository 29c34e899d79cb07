//! Count-based windowing stages
//!
//! Two shapes of window are supported:
//!
//! ## Sliding windows
//! Fixed-size, overlapping. Once `n` elements have been pulled, every further
//! pull emits the last `n` elements in arrival order.
//!
//! ```text
//! Input:    1  2  3  4  5
//! Windows:  [1  2  3]
//!              [2  3  4]
//!                 [3  4  5]
//! ```
//!
//! ## Chunks
//! Fixed-size, non-overlapping. The final chunk may be shorter.
//!
//! ```text
//! Input:    1  2  3  4  5
//! Chunks:   [1  2][3  4][5]
//! ```
//!
//! Sizes are validated by the [`Sequence`](crate::sequence::Sequence) methods
//! that build these stages.

mod chunk;
mod sliding;

pub use chunk::Chunk;
pub use sliding::{Pairwise, Window};
