//! Lazy sequence processing for Rust
//!
//! This crate provides pull-based transform chains, streaming statistics and a
//! bounded-concurrency parallel executor that restores submission order.

pub mod aggregation;
pub mod config;
pub mod core;
pub mod error;
pub mod merge;
pub mod parallel;
pub mod sequence;
pub mod telemetry;
pub mod window;

// Re-export commonly used types
pub use crate::core::{FloatKey, ToNumeric};

pub use sequence::{source, AsyncSource, Sequence};

pub use window::{Chunk, Pairwise, Window};

pub use merge::{merge, merge_by, Merge};

pub use aggregation::{
    lenient, strict, Ewma, EwmaStage, OnlineCovariance, Summary, Welford,
};

pub use parallel::{ParallelStage, ParallelStats, ParallelStreamExt};

pub use error::{BoxError, ErrorKind, Result as SeqResult, SeqError};

pub use config::{EngineConfig, NanPolicy, ParallelConfig, StatisticsConfig, TelemetryConfig};
