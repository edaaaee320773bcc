//! DeleteCard command

use crate::command::{finish, Change};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::store::BoardStore;
use crate::types::CardId;
use laneboard_operations::{operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;

/// Delete a card and close the gap it leaves in its column
#[operation(verb = "delete", noun = "card", description = "Delete a card")]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteCard {
    /// The card ID to delete
    pub id: CardId,
}

impl DeleteCard {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self { id: id.into() }
    }

    fn apply(&self, store: &mut BoardStore) -> Result<Change> {
        match store.remove_card(&self.id) {
            Some(card) => Ok(Change::Changed(json!({
                "deleted": true,
                "id": card.id,
                "title": card.title,
                "columnId": card.column_id,
            }))),
            None => Ok(Change::Unchanged(json!({
                "deleted": false,
                "id": self.id,
            }))),
        }
    }
}

impl Execute<BoardContext, BoardError> for DeleteCard {
    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Value, BoardError> {
        let started = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();
        let outcome = self.apply(ctx.store_mut());
        finish(self.op_string(), input, started, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::AddCard;
    use crate::test_support::{card_order, seeded_context};

    #[test]
    fn test_delete_decrements_later_siblings() {
        let mut ctx = seeded_context();
        let mut ids = Vec::new();
        for title in ["A", "B", "C", "D"] {
            let v = AddCard::new("todo", title).execute(&mut ctx).into_result().unwrap();
            ids.push(v["id"].as_str().unwrap().to_string());
        }

        let result = DeleteCard::new(ids[1].as_str()).execute(&mut ctx);
        assert!(result.is_mutation());

        assert_eq!(card_order(ctx.store(), "todo"), vec!["A", "C", "D"]);
        let positions: Vec<usize> = ids
            .iter()
            .filter_map(|id| ctx.store().card(&CardId::from_string(id)))
            .map(|c| c.position)
            .collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_delete_missing_card_is_noop() {
        let mut ctx = seeded_context();
        let result = DeleteCard::new("ghost").execute(&mut ctx);
        assert!(!result.should_log());
        assert_eq!(result.into_result().unwrap()["deleted"], false);
    }
}
