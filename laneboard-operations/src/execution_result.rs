//! Execution result types for operations

use crate::LogEntry;
use serde_json::Value;
use std::time::Instant;

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: operations that mutated state and should be recorded and persisted
/// - Unlogged: reads, and mutations that turned out to be no-ops
/// - Failed: errors (optionally logged)
#[derive(Debug)]
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but changed nothing
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<E: std::fmt::Display> ExecutionResult<Value, E> {
    /// Wrap the outcome of a mutating operation, building the log entry
    /// from the op string, its input and the time it started.
    pub fn from_mutation(
        op: impl Into<String>,
        input: Value,
        started: Instant,
        result: Result<Value, E>,
    ) -> Self {
        let duration_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(value) => Self::Logged {
                log_entry: LogEntry::success(op, input, value.clone(), duration_ms),
                value,
            },
            Err(error) => {
                let log_entry = LogEntry::failure(op, input, &error.to_string(), duration_ms);
                Self::Failed {
                    error,
                    log_entry: Some(log_entry),
                }
            }
        }
    }
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// True when the operation succeeded and changed state
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Logged { .. })
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}
