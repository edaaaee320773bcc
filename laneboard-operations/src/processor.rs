//! Operation processor trait

use crate::Execute;
use serde_json::Value;

/// Runs operations and handles the side effects of their results
/// (activity logging, persistence) in one place.
pub trait OperationProcessor<C, E> {
    fn process<O>(&self, operation: &O, ctx: &mut C) -> Result<Value, E>
    where
        O: Execute<C, E>;
}
