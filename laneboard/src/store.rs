//! BoardStore - canonical in-memory holder of columns and cards
//!
//! The store is passive: it offers sorted read views and a handful of
//! crate-private primitives. Only the command modules call the primitives,
//! and each command validates before it mutates, so the positional
//! invariants hold whenever a caller can observe the store.

use crate::error::{BoardError, Result};
use crate::ordering::{self, is_contiguous};
use crate::types::{BoardDocument, Card, CardId, Column, ColumnId};
use std::collections::HashMap;

/// Columns and cards keyed by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardStore {
    columns: HashMap<ColumnId, Column>,
    cards: HashMap<CardId, Card>,
}

impl BoardStore {
    /// An empty board with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a document that already satisfies the invariants.
    ///
    /// Use `PersistenceGateway::load` for untrusted input; this rejects
    /// anything that would break contiguity or referential integrity.
    pub fn from_document(document: BoardDocument) -> Result<Self> {
        let mut store = Self::new();
        for column in document.columns {
            if store.columns.contains_key(&column.id) {
                return Err(BoardError::invalid_document(format!(
                    "duplicate column id: {}",
                    column.id
                )));
            }
            store.columns.insert(column.id.clone(), column);
        }
        for card in document.cards {
            if store.cards.contains_key(&card.id) {
                return Err(BoardError::invalid_document(format!(
                    "duplicate card id: {}",
                    card.id
                )));
            }
            store.cards.insert(card.id.clone(), card);
        }
        store.check_invariants()?;
        Ok(store)
    }

    // =========================================================================
    // Read views
    // =========================================================================

    /// All columns ordered by position
    pub fn columns_sorted(&self) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self.columns.values().collect();
        columns.sort_by_key(|c| c.position);
        columns
    }

    /// The cards of one column ordered by position. Unknown column ⇒ empty.
    pub fn cards_of(&self, column: &ColumnId) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self
            .cards
            .values()
            .filter(|c| &c.column_id == column)
            .collect();
        cards.sort_by_key(|c| c.position);
        cards
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of cards currently in `column`
    pub fn card_count(&self, column: &ColumnId) -> usize {
        self.cards.values().filter(|c| &c.column_id == column).count()
    }

    /// Total number of cards on the board
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    /// Find a column by id, falling back to an exact (case-insensitive) title match
    pub fn resolve_column(&self, key: &str) -> Option<&Column> {
        self.columns
            .get(&ColumnId::from_string(key))
            .or_else(|| {
                self.columns_sorted()
                    .into_iter()
                    .find(|c| c.title.eq_ignore_ascii_case(key))
            })
    }

    /// Find a card by id, falling back to an exact (case-insensitive) title match
    pub fn resolve_card(&self, key: &str) -> Option<&Card> {
        self.cards.get(&CardId::from_string(key)).or_else(|| {
            self.columns_sorted()
                .into_iter()
                .flat_map(|column| self.cards_of(&column.id))
                .find(|c| c.title.eq_ignore_ascii_case(key))
        })
    }

    /// Sorted snapshot suitable for display and storage
    pub fn snapshot(&self) -> BoardDocument {
        let columns: Vec<Column> = self.columns_sorted().into_iter().cloned().collect();
        let cards = columns
            .iter()
            .flat_map(|column| self.cards_of(&column.id))
            .cloned()
            .collect();
        BoardDocument { columns, cards }
    }

    /// Verify contiguity of every sibling set and that every card's column exists
    pub fn check_invariants(&self) -> Result<()> {
        if !is_contiguous(self.columns.values().map(|c| c.position).collect()) {
            return Err(BoardError::invalid_document(
                "column positions are not contiguous",
            ));
        }

        for card in self.cards.values() {
            if !self.columns.contains_key(&card.column_id) {
                return Err(BoardError::invalid_document(format!(
                    "card {} references missing column {}",
                    card.id, card.column_id
                )));
            }
        }

        for column in self.columns.values() {
            let positions = self.cards_of(&column.id).iter().map(|c| c.position).collect();
            if !is_contiguous(positions) {
                return Err(BoardError::invalid_document(format!(
                    "card positions in column {} are not contiguous",
                    column.id
                )));
            }
        }

        Ok(())
    }

    // =========================================================================
    // Mutation primitives (command modules only)
    // =========================================================================

    pub(crate) fn insert_column(&mut self, column: Column) {
        self.columns.insert(column.id.clone(), column);
    }

    pub(crate) fn insert_card(&mut self, card: Card) {
        self.cards.insert(card.id.clone(), card);
    }

    pub(crate) fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.get_mut(id)
    }

    pub(crate) fn card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.cards.get_mut(id)
    }

    /// Remove a column and close the gap among the remaining columns.
    /// The caller must already have removed its cards.
    pub(crate) fn remove_column(&mut self, id: &ColumnId) -> Option<Column> {
        let removed = self.columns.remove(id)?;
        ordering::close_gap(self.columns.values_mut(), removed.position);
        Some(removed)
    }

    /// Remove a card and close the gap among its former siblings
    pub(crate) fn remove_card(&mut self, id: &CardId) -> Option<Card> {
        let removed = self.cards.remove(id)?;
        ordering::close_gap(
            self.cards
                .values_mut()
                .filter(|c| c.column_id == removed.column_id),
            removed.position,
        );
        Some(removed)
    }

    /// Ids of the cards in `column`, in position order
    pub(crate) fn card_ids_of(&self, column: &ColumnId) -> Vec<CardId> {
        self.cards_of(column).into_iter().map(|c| c.id.clone()).collect()
    }

    /// Columns other than `id`, mutably
    pub(crate) fn sibling_columns_mut<'a>(
        &'a mut self,
        id: &'a ColumnId,
    ) -> impl Iterator<Item = &'a mut Column> + 'a {
        self.columns.values_mut().filter(move |c| &c.id != id)
    }

    /// Cards in `column` other than `except`, mutably
    pub(crate) fn sibling_cards_mut<'a>(
        &'a mut self,
        column: &'a ColumnId,
        except: &'a CardId,
    ) -> impl Iterator<Item = &'a mut Card> + 'a {
        self.cards
            .values_mut()
            .filter(move |c| &c.column_id == column && &c.id != except)
    }
}
