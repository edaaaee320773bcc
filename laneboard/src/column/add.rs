//! AddColumn command

use crate::command::{finish, Change};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::store::BoardStore;
use crate::types::{Column, ColumnId};
use crate::validate::normalize_title;
use laneboard_operations::{operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Append a new column to the board
#[operation(
    verb = "add",
    noun = "column",
    description = "Append a new column to the board"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddColumn {
    /// The column title
    pub title: String,
}

impl AddColumn {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    fn apply(&self, store: &mut BoardStore) -> Result<Change> {
        let title = normalize_title("title", &self.title)?;
        let column = Column::new(ColumnId::new(), title, store.column_count());
        let value = serde_json::to_value(&column)?;
        store.insert_column(column);
        Ok(Change::Changed(value))
    }
}

impl Execute<BoardContext, BoardError> for AddColumn {
    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        let outcome = self.apply(ctx.store_mut());
        finish(self.op_string(), input, started, outcome)
    }
}
