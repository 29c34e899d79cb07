//! Configuration types for the sequence engine
//!
//! Every tunable the engine accepts is validated eagerly, before any element
//! is pulled. The `validate_*` helpers in this module are the single source
//! of those rules and are called by every stage constructor.

use crate::error::{Result, SeqError};
use serde::{Deserialize, Serialize};

/// Main engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Parallel executor configuration
    #[serde(default)]
    pub parallel: ParallelConfig,

    /// Statistics configuration
    #[serde(default)]
    pub statistics: StatisticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl EngineConfig {
    /// Parse a configuration from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json).map_err(|e| {
            SeqError::validation("engine_config", "json", "<document>", e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.parallel.validate()?;
        self.statistics.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

/// Parallel executor configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// Maximum number of computations held by the executor at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

impl ParallelConfig {
    /// Create a configuration with the given concurrency limit
    pub fn new(concurrency: usize) -> Result<Self> {
        let config = Self { concurrency };
        config.validate()?;
        Ok(config)
    }

    /// Validate parallel configuration
    pub fn validate(&self) -> Result<()> {
        validate_concurrency("parallel_config", self.concurrency)
    }
}

/// How median and percentile treat NaN values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NanPolicy {
    /// Remove NaN values before selecting
    #[default]
    Ignore,
    /// Keep NaN values; they order above +inf
    Propagate,
}

/// Statistics configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StatisticsConfig {
    /// NaN handling for order statistics
    #[serde(default)]
    pub nan_policy: NanPolicy,
}

impl StatisticsConfig {
    /// Validate statistics configuration
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetryConfig {
    /// Filter directive, in `EnvFilter` syntax
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,

    /// Include the event target in each line
    #[serde(default)]
    pub with_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
            with_target: false,
        }
    }
}

impl TelemetryConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Result<()> {
        if self.filter.trim().is_empty() {
            return Err(SeqError::validation(
                "telemetry_config",
                "filter",
                "\"\"",
                "filter directive cannot be empty",
            ));
        }
        Ok(())
    }
}

/// Window and chunk sizes must be at least 1
pub fn validate_window_size(operation: &'static str, size: usize) -> Result<()> {
    if size == 0 {
        return Err(SeqError::validation(
            operation,
            "size",
            size,
            "must be a positive integer",
        ));
    }
    Ok(())
}

/// Concurrency limits must be at least 1
pub fn validate_concurrency(operation: &'static str, concurrency: usize) -> Result<()> {
    if concurrency == 0 {
        return Err(SeqError::validation(
            operation,
            "concurrency",
            concurrency,
            "must be a positive integer",
        ));
    }
    Ok(())
}

/// Percentiles are expressed in [0, 100]
pub fn validate_percentile(operation: &'static str, p: f64) -> Result<()> {
    if !p.is_finite() || !(0.0..=100.0).contains(&p) {
        return Err(SeqError::validation(
            operation,
            "percentile",
            p,
            "must be between 0 and 100 inclusive",
        ));
    }
    Ok(())
}

/// Smoothing factors must be finite and in (0, 1]
pub fn validate_alpha(operation: &'static str, alpha: f64) -> Result<()> {
    if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
        return Err(SeqError::validation(
            operation,
            "alpha",
            alpha,
            "must be finite and in (0, 1]",
        ));
    }
    Ok(())
}

/// Range steps must be non-zero and finite
pub fn validate_step(operation: &'static str, step: f64) -> Result<()> {
    if !step.is_finite() || step == 0.0 {
        return Err(SeqError::validation(
            operation,
            "step",
            step,
            "must be non-zero and finite",
        ));
    }
    Ok(())
}

/// Integer range steps must be non-zero
pub fn validate_int_step(operation: &'static str, step: i64) -> Result<()> {
    if step == 0 {
        return Err(SeqError::validation(
            operation,
            "step",
            step,
            "must be non-zero",
        ));
    }
    Ok(())
}

fn default_concurrency() -> usize {
    4
}

fn default_log_filter() -> String {
    "seqflow=info".to_string()
}
