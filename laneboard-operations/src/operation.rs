//! Core operation traits

use crate::{ExecutionResult, ParamMeta};
use serde_json::Value;

/// Metadata about an operation, generated by `#[operation]`
pub trait Operation {
    /// The verb (e.g. "add", "move")
    fn verb(&self) -> &'static str;

    /// The noun (e.g. "card", "column")
    fn noun(&self) -> &'static str;

    /// Human readable description
    fn description(&self) -> &'static str;

    /// Parameter metadata derived from the struct fields
    fn parameters(&self) -> &'static [ParamMeta];

    /// Canonical op string, e.g. "move card"
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Run an operation against a context.
///
/// Execution is synchronous and takes the context mutably, so two
/// operations can never interleave on the same context.
pub trait Execute<C, E>: Operation {
    fn execute(&self, ctx: &mut C) -> ExecutionResult<Value, E>;
}
