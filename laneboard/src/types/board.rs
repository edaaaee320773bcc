//! Board-level types: Column, Card and the stored board document

use super::ids::{CardId, ColumnId};
use serde::{Deserialize, Serialize};

/// A column is a named, ordered lane of cards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Zero-based rank among the board's columns
    pub position: usize,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>, position: usize) -> Self {
        Self {
            id,
            title: title.into(),
            position,
        }
    }
}

/// A work item owned by exactly one column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    /// `None` means "no description"; never stored as an empty string
    #[serde(default)]
    pub description: Option<String>,
    pub column_id: ColumnId,
    /// Zero-based rank within its column
    pub position: usize,
}

/// The persisted shape of a board: flat lists of columns and cards.
///
/// Produced by `BoardStore::snapshot` with both lists sorted for display
/// (columns by position, cards by column position then card position).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardDocument {
    pub columns: Vec<Column>,
    pub cards: Vec<Card>,
}

impl BoardDocument {
    /// A board of empty columns with the given titles, in order
    pub fn seed<S: AsRef<str>>(titles: &[S]) -> Self {
        let columns = titles
            .iter()
            .enumerate()
            .map(|(position, title)| Column::new(ColumnId::new(), title.as_ref(), position))
            .collect();
        Self {
            columns,
            cards: Vec::new(),
        }
    }
}
