//! UpdateColumn command

use crate::command::{finish, Change};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::store::BoardStore;
use crate::types::ColumnId;
use crate::validate::normalize_title;
use laneboard_operations::{operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Rename a column
#[operation(verb = "update", noun = "column", description = "Change a column's title")]
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateColumn {
    /// The column ID to update
    pub id: ColumnId,
    /// New column title
    pub title: Option<String>,
}

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn apply(&self, store: &mut BoardStore) -> Result<Change> {
        let title = self
            .title
            .as_deref()
            .map(|t| normalize_title("title", t))
            .transpose()?;

        let column = store
            .column_mut(&self.id)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.id.to_string(),
            })?;

        match title {
            Some(title) if title != column.title => {
                column.title = title;
                Ok(Change::Changed(serde_json::to_value(&*column)?))
            }
            _ => Ok(Change::Unchanged(serde_json::to_value(&*column)?)),
        }
    }
}

impl Execute<BoardContext, BoardError> for UpdateColumn {
    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        let outcome = self.apply(ctx.store_mut());
        finish(self.op_string(), input, started, outcome)
    }
}
