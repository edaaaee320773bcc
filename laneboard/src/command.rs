//! Plumbing shared by the mutating commands

use crate::error::BoardError;
use laneboard_operations::{ExecutionResult, Value};
use std::time::Instant;

/// What a mutating command did to the store
pub(crate) enum Change {
    /// The store was modified; log and persist
    Changed(Value),
    /// The request was valid but left the store as it was
    Unchanged(Value),
}

/// Turn a command outcome into an `ExecutionResult`.
///
/// `Unchanged` outcomes are unlogged so the processor neither records nor
/// persists them.
pub(crate) fn finish(
    op: String,
    input: Value,
    started: Instant,
    outcome: Result<Change, BoardError>,
) -> ExecutionResult<Value, BoardError> {
    match outcome {
        Ok(Change::Unchanged(value)) => ExecutionResult::Unlogged { value },
        Ok(Change::Changed(value)) => {
            ExecutionResult::from_mutation(op, input, started, Ok(value))
        }
        Err(error) => ExecutionResult::from_mutation(op, input, started, Err(error)),
    }
}
