//! # laneboard operations
//!
//! This crate provides the `Operation` trait for defining board commands.
//! Operations are structs where the fields ARE the parameters - no duplication.
//!
//! ## Example
//!
//! ```ignore
//! use laneboard_operations::*;
//!
//! #[operation(verb = "add", noun = "card", description = "Append a card to a column")]
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct AddCard {
//!     /// The column receiving the card
//!     pub column: ColumnId,
//!     /// The card title
//!     pub title: String,
//! }
//!
//! impl Execute<BoardContext, BoardError> for AddCard {
//!     fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Value, BoardError> {
//!         // implementation returns ExecutionResult::Logged or Unlogged
//!     }
//! }
//! ```

mod execution_result;
mod log;
mod operation;
mod parameter;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use parameter::{ParamMeta, ParamType};
pub use processor::OperationProcessor;

// Re-export proc macros
pub use laneboard_operations_macros::operation;

// Re-export for use in implementations
pub use serde_json::Value;
