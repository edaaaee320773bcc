//! MoveCard command

use crate::command::{finish, Change};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::ordering::{clamp_position, close_gap, open_gap, shift_between};
use crate::store::BoardStore;
use crate::types::{CardId, ColumnId};
use laneboard_operations::{operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Move a card to a position in the same or another column
#[operation(
    verb = "move",
    noun = "card",
    description = "Move a card to a position in a column"
)]
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveCard {
    /// The card ID to move
    pub id: CardId,
    /// Destination column
    pub column: ColumnId,
    /// Zero-based destination position, clamped to the column
    pub position: usize,
}

impl MoveCard {
    pub fn new(id: impl Into<CardId>, column: impl Into<ColumnId>, position: usize) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            position,
        }
    }

    fn apply(&self, store: &mut BoardStore) -> Result<Change> {
        let (source_column, source_position) = store
            .card(&self.id)
            .map(|c| (c.column_id.clone(), c.position))
            .ok_or_else(|| BoardError::CardNotFound {
                id: self.id.to_string(),
            })?;
        if store.column(&self.column).is_none() {
            return Err(BoardError::ColumnNotFound {
                id: self.column.to_string(),
            });
        }

        let same_column = source_column == self.column;
        let siblings = if same_column {
            store.card_count(&self.column) - 1
        } else {
            store.card_count(&self.column)
        };
        let target = clamp_position(self.position, siblings);

        if same_column && target == source_position {
            let value = serde_json::to_value(store.card(&self.id))?;
            return Ok(Change::Unchanged(value));
        }

        if same_column {
            shift_between(
                store.sibling_cards_mut(&source_column, &self.id),
                source_position,
                target,
            );
        } else {
            close_gap(
                store.sibling_cards_mut(&source_column, &self.id),
                source_position,
            );
            open_gap(store.sibling_cards_mut(&self.column, &self.id), target);
        }

        let card = store
            .card_mut(&self.id)
            .ok_or_else(|| BoardError::CardNotFound {
                id: self.id.to_string(),
            })?;
        card.column_id = self.column.clone();
        card.position = target;
        Ok(Change::Changed(serde_json::to_value(&*card)?))
    }
}

impl Execute<BoardContext, BoardError> for MoveCard {
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

    fn add(ctx: &mut BoardContext, column: &str, title: &str) -> String {
        let v = AddCard::new(column, title).execute(ctx).into_result().unwrap();
        v["id"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_move_within_column_down_and_up() {
        let mut ctx = seeded_context();
        let a = add(&mut ctx, "todo", "A");
        add(&mut ctx, "todo", "B");
        add(&mut ctx, "todo", "C");
        let d = add(&mut ctx, "todo", "D");

        MoveCard::new(a.as_str(), "todo", 2).execute(&mut ctx).into_result().unwrap();
        assert_eq!(card_order(ctx.store(), "todo"), vec!["B", "C", "A", "D"]);

        MoveCard::new(d.as_str(), "todo", 0).execute(&mut ctx).into_result().unwrap();
        assert_eq!(card_order(ctx.store(), "todo"), vec!["D", "B", "C", "A"]);
        ctx.store().check_invariants().unwrap();
    }

    #[test]
    fn test_move_across_columns() {
        let mut ctx = seeded_context();
        let a = add(&mut ctx, "todo", "A");
        add(&mut ctx, "todo", "B");
        add(&mut ctx, "done", "X");
        add(&mut ctx, "done", "Y");

        let result = MoveCard::new(a.as_str(), "done", 1)
            .execute(&mut ctx)
            .into_result()
            .unwrap();

        assert_eq!(result["columnId"], "done");
        assert_eq!(result["position"], 1);
        assert_eq!(card_order(ctx.store(), "todo"), vec!["B"]);
        assert_eq!(card_order(ctx.store(), "done"), vec!["X", "A", "Y"]);
        ctx.store().check_invariants().unwrap();
    }

    #[test]
    fn test_move_clamps_target_position() {
        let mut ctx = seeded_context();
        let a = add(&mut ctx, "todo", "A");
        add(&mut ctx, "todo", "B");
        add(&mut ctx, "doing", "X");

        MoveCard::new(a.as_str(), "todo", 50).execute(&mut ctx).into_result().unwrap();
        assert_eq!(card_order(ctx.store(), "todo"), vec!["B", "A"]);

        let result = MoveCard::new(a.as_str(), "doing", 50)
            .execute(&mut ctx)
            .into_result()
            .unwrap();
        assert_eq!(result["position"], 1);
        assert_eq!(card_order(ctx.store(), "doing"), vec!["X", "A"]);
    }

    #[test]
    fn test_move_into_empty_column() {
        let mut ctx = seeded_context();
        let a = add(&mut ctx, "todo", "A");
        MoveCard::new(a.as_str(), "done", 3).execute(&mut ctx).into_result().unwrap();
        assert!(card_order(ctx.store(), "todo").is_empty());
        assert_eq!(card_order(ctx.store(), "done"), vec!["A"]);
    }

    #[test]
    fn test_move_to_same_position_is_unchanged() {
        let mut ctx = seeded_context();
        add(&mut ctx, "todo", "A");
        let b = add(&mut ctx, "todo", "B");
        let before = ctx.store().clone();

        let result = MoveCard::new(b.as_str(), "todo", 1).execute(&mut ctx);
        assert!(!result.should_log());
        assert_eq!(ctx.store(), &before);

        // clamps onto its own slot
        let result = MoveCard::new(b.as_str(), "todo", 9).execute(&mut ctx);
        assert!(!result.is_mutation());
    }

    #[test]
    fn test_move_unknown_card_or_column() {
        let mut ctx = seeded_context();
        let a = add(&mut ctx, "todo", "A");
        let before = ctx.store().clone();

        let err = MoveCard::new("ghost", "todo", 0)
            .execute(&mut ctx)
            .into_result()
            .unwrap_err();
        assert!(matches!(err, BoardError::CardNotFound { .. }));

        let err = MoveCard::new(a.as_str(), "nowhere", 0)
            .execute(&mut ctx)
            .into_result()
            .unwrap_err();
        assert!(matches!(err, BoardError::ColumnNotFound { .. }));
        assert_eq!(ctx.store(), &before);
    }
}
