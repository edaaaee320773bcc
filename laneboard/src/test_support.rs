//! Fixtures shared by unit and integration tests

use crate::context::BoardContext;
use crate::store::BoardStore;
use crate::types::{BoardDocument, Column, ColumnId};

/// The default three columns with fixed ids `todo`, `doing` and `done`
pub fn seeded_store() -> BoardStore {
    let columns = [("todo", "Todo"), ("doing", "In Progress"), ("done", "Done")]
        .iter()
        .enumerate()
        .map(|(position, (id, title))| Column::new(ColumnId::from_string(*id), *title, position))
        .collect();
    BoardStore::from_document(BoardDocument {
        columns,
        cards: Vec::new(),
    })
    .expect("seed board is valid")
}

/// A memory-only context around `seeded_store`
pub fn seeded_context() -> BoardContext {
    BoardContext::new(seeded_store())
}

/// Card titles of `column` in position order
pub fn card_order(store: &BoardStore, column: &str) -> Vec<String> {
    store
        .cards_of(&ColumnId::from_string(column))
        .iter()
        .map(|c| c.title.clone())
        .collect()
}

/// Column titles in position order
pub fn column_titles(store: &BoardStore) -> Vec<String> {
    store
        .columns_sorted()
        .iter()
        .map(|c| c.title.clone())
        .collect()
}
