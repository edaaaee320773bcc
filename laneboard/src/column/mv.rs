//! MoveColumn command

use crate::command::{finish, Change};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::ordering::{clamp_position, shift_between};
use crate::store::BoardStore;
use crate::types::ColumnId;
use laneboard_operations::{operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Move a column to a new position among the board's columns
#[operation(
    verb = "move",
    noun = "column",
    description = "Move a column to a new position on the board"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveColumn {
    /// The column ID to move
    pub id: ColumnId,
    /// Zero-based target position, clamped to the board
    pub position: usize,
}

impl MoveColumn {
    pub fn new(id: impl Into<ColumnId>, position: usize) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }

    fn apply(&self, store: &mut BoardStore) -> Result<Change> {
        let source = store
            .column(&self.id)
            .map(|c| c.position)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.id.to_string(),
            })?;
        let target = clamp_position(self.position, store.column_count() - 1);

        if target != source {
            shift_between(store.sibling_columns_mut(&self.id), source, target);
        }

        let column = store
            .column_mut(&self.id)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.id.to_string(),
            })?;
        column.position = target;
        let value = serde_json::to_value(&*column)?;

        if target == source {
            Ok(Change::Unchanged(value))
        } else {
            Ok(Change::Changed(value))
        }
    }
}

impl Execute<BoardContext, BoardError> for MoveColumn {
    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        let outcome = self.apply(ctx.store_mut());
        finish(self.op_string(), input, started, outcome)
    }
}
