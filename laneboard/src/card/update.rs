//! UpdateCard command

use crate::command::{finish, Change};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::store::BoardStore;
use crate::types::CardId;
use crate::validate::{normalize_description, normalize_title};
use laneboard_operations::{operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Edit a card's title and/or description in place
#[operation(
    verb = "update",
    noun = "card",
    description = "Update a card's title or description"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateCard {
    /// The card ID to update
    pub id: CardId,
    /// New title
    pub title: Option<String>,
    /// New description; blank clears it
    pub description: Option<String>,
}

impl UpdateCard {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn apply(&self, store: &mut BoardStore) -> Result<Change> {
        let title = self
            .title
            .as_deref()
            .map(|t| normalize_title("title", t))
            .transpose()?;

        let card = store
            .card_mut(&self.id)
            .ok_or_else(|| BoardError::CardNotFound {
                id: self.id.to_string(),
            })?;

        let mut changed = false;
        if let Some(title) = title {
            changed |= card.title != title;
            card.title = title;
        }
        if let Some(description) = &self.description {
            let description = normalize_description(Some(description));
            changed |= card.description != description;
            card.description = description;
        }

        let value = serde_json::to_value(&*card)?;
        if changed {
            Ok(Change::Changed(value))
        } else {
            Ok(Change::Unchanged(value))
        }
    }
}

impl Execute<BoardContext, BoardError> for UpdateCard {
    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        let outcome = self.apply(ctx.store_mut());
        finish(self.op_string(), input, started, outcome)
    }
}
