//! ListCards command

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::types::ColumnId;
use laneboard_operations::{operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List the cards of one column
#[operation(
    verb = "list",
    noun = "cards",
    description = "List the cards of a column ordered by position"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct ListCards {
    /// The column to list
    pub column: ColumnId,
}

impl ListCards {
    pub fn new(column: impl Into<ColumnId>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Execute<BoardContext, BoardError> for ListCards {
    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Value, BoardError> {
        if ctx.store().column(&self.column).is_none() {
            return ExecutionResult::Failed {
                error: BoardError::ColumnNotFound {
                    id: self.column.to_string(),
                },
                log_entry: None,
            };
        }

        let cards = ctx.store().cards_of(&self.column);
        ExecutionResult::Unlogged {
            value: json!({
                "column": self.column,
                "count": cards.len(),
                "cards": cards,
            }),
        }
    }
}
