//! GetBoard command

use crate::context::BoardContext;
use crate::error::BoardError;
use laneboard_operations::{operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Get the whole board with each column's cards nested in order
#[operation(
    verb = "get",
    noun = "board",
    description = "Retrieve the board with its columns and cards"
)]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GetBoard;

impl Execute<BoardContext, BoardError> for GetBoard {
    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Value, BoardError> {
        let store = ctx.store();
        let columns: Vec<Value> = store
            .columns_sorted()
            .into_iter()
            .map(|column| {
                json!({
                    "id": column.id,
                    "title": column.title,
                    "position": column.position,
                    "cards": store.cards_of(&column.id),
                })
            })
            .collect();

        ExecutionResult::Unlogged {
            value: json!({
                "columns": columns,
                "total_cards": store.total_cards(),
            }),
        }
    }
}
