//! DeleteColumn command

use crate::command::{finish, Change};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::store::BoardStore;
use crate::types::ColumnId;
use laneboard_operations::{operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Delete a column together with its cards
#[operation(
    verb = "delete",
    noun = "column",
    description = "Delete a column and every card in it"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
}

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }

    fn apply(&self, store: &mut BoardStore) -> Result<Change> {
        if store.column(&self.id).is_none() {
            return Ok(Change::Unchanged(json!({
                "deleted": false,
                "id": self.id,
            })));
        }

        let card_ids = store.card_ids_of(&self.id);
        for card_id in &card_ids {
            store.remove_card(card_id);
        }
        store.remove_column(&self.id);

        Ok(Change::Changed(json!({
            "deleted": true,
            "id": self.id,
            "cards_deleted": card_ids.len(),
        })))
    }
}

impl Execute<BoardContext, BoardError> for DeleteColumn {
    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        let outcome = self.apply(ctx.store_mut());
        finish(self.op_string(), input, started, outcome)
    }
}
