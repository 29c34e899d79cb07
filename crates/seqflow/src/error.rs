//! Error types for sequence processing
//!
//! Every failure the engine can produce is a variant of [`SeqError`]. Each
//! variant names the operation that raised it and carries the context needed
//! to diagnose it (the offending parameter, index or value). [`ErrorKind`] is
//! the flat tag used when callers only care about the category.

use std::fmt;
use thiserror::Error;

/// Boxed error produced by user-supplied computations
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for sequence operations
#[derive(Error, Debug)]
pub enum SeqError {
    /// A configuration argument was rejected before any element was pulled
    #[error("invalid {parameter} for {operation}: {value}, {reason}")]
    Validation {
        operation: &'static str,
        parameter: &'static str,
        value: String,
        reason: String,
    },

    /// A strict reducer was asked to summarize zero elements
    #[error("empty sequence: {operation} requires at least one element")]
    EmptySequence { operation: &'static str },

    /// Positional access beyond the available elements
    #[error("index out of bounds in {operation}: index {index}, length {len}")]
    IndexOutOfBounds {
        operation: &'static str,
        index: usize,
        len: usize,
    },

    /// A value could not be coerced to the numeric type a reducer needs
    #[error("type conversion failed in {operation}: cannot convert {value} to {target}")]
    TypeConversion {
        operation: &'static str,
        value: String,
        target: &'static str,
    },

    /// A user-supplied computation failed
    #[error("{operation} failed at element {index}: {source}")]
    Operation {
        operation: &'static str,
        index: usize,
        #[source]
        source: BoxError,
    },
}

/// Category of a [`SeqError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    EmptySequence,
    IndexOutOfBounds,
    TypeConversion,
    Operation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::EmptySequence => "empty_sequence",
            ErrorKind::IndexOutOfBounds => "index_out_of_bounds",
            ErrorKind::TypeConversion => "type_conversion",
            ErrorKind::Operation => "operation",
        };
        f.write_str(name)
    }
}

impl SeqError {
    /// Build a validation error
    pub fn validation(
        operation: &'static str,
        parameter: &'static str,
        value: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        SeqError::Validation {
            operation,
            parameter,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Wrap a failure raised by a user computation
    pub fn operation(operation: &'static str, index: usize, source: impl Into<BoxError>) -> Self {
        SeqError::Operation {
            operation,
            index,
            source: source.into(),
        }
    }

    /// The category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SeqError::Validation { .. } => ErrorKind::Validation,
            SeqError::EmptySequence { .. } => ErrorKind::EmptySequence,
            SeqError::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            SeqError::TypeConversion { .. } => ErrorKind::TypeConversion,
            SeqError::Operation { .. } => ErrorKind::Operation,
        }
    }

    /// Name of the operation that raised this error
    pub fn operation_name(&self) -> &'static str {
        match self {
            SeqError::Validation { operation, .. }
            | SeqError::EmptySequence { operation }
            | SeqError::IndexOutOfBounds { operation, .. }
            | SeqError::TypeConversion { operation, .. }
            | SeqError::Operation { operation, .. } => operation,
        }
    }
}

/// Result type alias for sequence operations
pub type Result<T> = std::result::Result<T, SeqError>;
