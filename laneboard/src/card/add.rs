//! AddCard command

use crate::command::{finish, Change};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::store::BoardStore;
use crate::types::{Card, CardId, ColumnId};
use crate::validate::{normalize_description, normalize_title};
use laneboard_operations::{operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Append a new card to the end of a column
#[operation(
    verb = "add",
    noun = "card",
    description = "Append a new card to a column"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct AddCard {
    /// The column to add the card to
    pub column: ColumnId,
    /// The card title
    pub title: String,
    /// Optional free-form description
    pub description: Option<String>,
}

impl AddCard {
    pub fn new(column: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn apply(&self, store: &mut BoardStore) -> Result<Change> {
        let title = normalize_title("title", &self.title)?;
        if store.column(&self.column).is_none() {
            return Err(BoardError::ColumnNotFound {
                id: self.column.to_string(),
            });
        }

        let card = Card {
            id: CardId::new(),
            title,
            description: normalize_description(self.description.as_deref()),
            column_id: self.column.clone(),
            position: store.card_count(&self.column),
        };
        let value = serde_json::to_value(&card)?;
        store.insert_card(card);
        Ok(Change::Changed(value))
    }
}

impl Execute<BoardContext, BoardError> for AddCard {
    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        let outcome = self.apply(ctx.store_mut());
        finish(self.op_string(), input, started, outcome)
    }
}
