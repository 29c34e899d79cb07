//! Counters kept by a parallel stage

use serde::{Deserialize, Serialize};

/// Parallel stage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelStats {
    /// Computations started
    pub submitted: u64,

    /// Computations finished successfully
    pub completed: u64,

    /// Elements handed to the consumer
    pub emitted: u64,

    /// Completed computations that produced no output (filtered out or empty)
    pub discarded: u64,

    /// Highest number of computations in flight at once
    pub max_outstanding: usize,

    /// Highest number of completed results waiting for their turn
    pub max_pending: usize,
}

impl ParallelStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submission with the resulting in-flight count
    pub fn record_submission(&mut self, outstanding: usize) {
        self.submitted += 1;
        self.max_outstanding = self.max_outstanding.max(outstanding);
    }

    /// Record a completion with the resulting pending count
    pub fn record_completion(&mut self, pending: usize) {
        self.completed += 1;
        self.max_pending = self.max_pending.max(pending);
    }

    pub fn inc_emitted(&mut self) {
        self.emitted += 1;
    }

    pub fn inc_discarded(&mut self) {
        self.discarded += 1;
    }
}
