//! ListColumns command

use crate::context::BoardContext;
use crate::error::BoardError;
use laneboard_operations::{operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List all columns
#[operation(
    verb = "list",
    noun = "columns",
    description = "List all columns ordered by position"
)]
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListColumns;

impl Execute<BoardContext, BoardError> for ListColumns {
    fn execute(&self, ctx: &mut BoardContext) -> ExecutionResult<Value, BoardError> {
        let columns: Vec<Value> = ctx
            .store()
            .columns_sorted()
            .into_iter()
            .map(|column| {
                json!({
                    "id": column.id,
                    "title": column.title,
                    "position": column.position,
                    "card_count": ctx.store().card_count(&column.id),
                })
            })
            .collect();

        ExecutionResult::Unlogged {
            value: json!({
                "count": columns.len(),
                "columns": columns,
            }),
        }
    }
}
