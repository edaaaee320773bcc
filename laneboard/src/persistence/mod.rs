//! PersistenceGateway - board snapshots in a key-value store
//!
//! The board is stored as one JSON document under one fixed key:
//!
//! ```text
//! {
//!   "columns": [ { "id", "title", "position" } ],
//!   "cards":   [ { "id", "title", "description", "columnId", "position" } ]
//! }
//! ```
//!
//! Saving never fails from the caller's point of view: the in-memory store
//! stays authoritative and write errors are logged and dropped. Loading
//! never fails either: absent or invalid content yields the default seed.

mod kv;

pub use kv::{FileStore, KeyValueStore, MemoryStore};

use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::ordering::rerank;
use crate::store::BoardStore;
use crate::types::{BoardDocument, Card, Column, ColumnId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Key the board document is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "kanban-board-state";

/// Titles of the columns a fresh board starts with
pub const DEFAULT_COLUMNS: [&str; 3] = ["Todo", "In Progress", "Done"];

/// Serializes the store after each mutation and restores it at startup
pub struct PersistenceGateway {
    backend: Box<dyn KeyValueStore>,
    key: String,
    seed_columns: Vec<String>,
}

impl PersistenceGateway {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            key: DEFAULT_STORAGE_KEY.to_string(),
            seed_columns: DEFAULT_COLUMNS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// A file-backed gateway using the configured directory, key and seed
    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(FileStore::new(&config.storage_dir))
            .with_key(&config.storage_key)
            .with_seed_columns(config.default_columns.clone())
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_seed_columns(mut self, titles: Vec<String>) -> Self {
        self.seed_columns = titles;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    // =========================================================================
    // Save
    // =========================================================================

    /// Write a snapshot of `store`. Errors are logged, never returned.
    pub fn save(&self, store: &BoardStore) {
        match self.try_save(store) {
            Ok(()) => debug!(key = %self.key, "board saved"),
            Err(error) => warn!(key = %self.key, %error, "board not saved; continuing in memory"),
        }
    }

    /// Write a snapshot of `store`, reporting failures
    pub fn try_save(&self, store: &BoardStore) -> Result<()> {
        let content = serde_json::to_string(&store.snapshot())?;
        self.backend.set(&self.key, &content)
    }

    // =========================================================================
    // Load
    // =========================================================================

    /// Restore the board, falling back to the default seed
    pub fn load(&self) -> BoardStore {
        match self.try_load() {
            Ok(Some(store)) => {
                debug!(
                    key = %self.key,
                    columns = store.column_count(),
                    cards = store.total_cards(),
                    "board restored"
                );
                store
            }
            Ok(None) => {
                debug!(key = %self.key, "no stored board; using default columns");
                self.seed()
            }
            Err(error) => {
                warn!(key = %self.key, %error, "stored board unusable; using default columns");
                self.seed()
            }
        }
    }

    /// Restore the board strictly: `Ok(None)` when nothing is stored,
    /// `Err` when stored content cannot be used.
    pub fn try_load(&self) -> Result<Option<BoardStore>> {
        let raw = match self.backend.get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(None),
        };

        let document: BoardDocument = serde_json::from_str(&raw)?;
        normalize(document).map(Some)
    }

    /// The default board: empty columns with the configured titles
    pub fn seed(&self) -> BoardStore {
        let titles: Vec<&str> = self
            .seed_columns
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        let titles = if titles.is_empty() {
            DEFAULT_COLUMNS.to_vec()
        } else {
            titles
        };

        BoardStore::from_document(BoardDocument::seed(&titles)).unwrap_or_default()
    }

    /// Remove the stored board so the next load reseeds
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(&self.key)
    }
}

/// Validate a parsed document and repair position drift.
///
/// Rejected: blank titles, duplicate ids, cards referencing missing columns.
/// Repaired: titles and descriptions are trimmed, and positions with gaps or
/// duplicates are re-ranked in stored order, ties broken by document order.
fn normalize(mut document: BoardDocument) -> Result<BoardStore> {
    let mut column_ids = HashSet::new();
    for column in &mut document.columns {
        column.title = stored_title("column", &column.title)?;
        if !column_ids.insert(column.id.clone()) {
            return Err(BoardError::invalid_document(format!(
                "duplicate column id: {}",
                column.id
            )));
        }
    }

    let mut card_ids = HashSet::new();
    for card in &mut document.cards {
        card.title = stored_title("card", &card.title)?;
        if !card_ids.insert(card.id.clone()) {
            return Err(BoardError::invalid_document(format!(
                "duplicate card id: {}",
                card.id
            )));
        }
        if !column_ids.contains(&card.column_id) {
            return Err(BoardError::invalid_document(format!(
                "card {} references missing column {}",
                card.id, card.column_id
            )));
        }
    }

    let mut columns: Vec<&mut Column> = document.columns.iter_mut().collect();
    rerank(&mut columns);

    let ids: Vec<ColumnId> = document.columns.iter().map(|c| c.id.clone()).collect();
    for column_id in &ids {
        let mut siblings: Vec<&mut Card> = document
            .cards
            .iter_mut()
            .filter(|c| &c.column_id == column_id)
            .collect();
        rerank(&mut siblings);
    }

    for card in &mut document.cards {
        card.description = crate::validate::normalize_description(card.description.as_deref());
    }

    BoardStore::from_document(document)
}

fn stored_title(kind: &str, title: &str) -> Result<String> {
    crate::validate::normalize_title(kind, title)
        .map_err(|_| BoardError::invalid_document(format!("{kind} with blank title")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardId;

    fn gateway_with(raw: &str) -> PersistenceGateway {
        PersistenceGateway::new(MemoryStore::new().with_entry(DEFAULT_STORAGE_KEY, raw))
    }

    fn column_titles(store: &BoardStore) -> Vec<String> {
        store
            .columns_sorted()
            .iter()
            .map(|c| c.title.clone())
            .collect()
    }

    #[test]
    fn test_load_absent_seeds_default_columns() {
        let gateway = PersistenceGateway::new(MemoryStore::new());
        let store = gateway.load();
        assert_eq!(column_titles(&store), vec!["Todo", "In Progress", "Done"]);
        assert_eq!(store.total_cards(), 0);
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_load_unparseable_seeds_default_columns() {
        let store = gateway_with("{not json").load();
        assert_eq!(column_titles(&store), vec!["Todo", "In Progress", "Done"]);
    }

    #[test]
    fn test_load_wrong_shape_seeds_default_columns() {
        // cards as an object keyed by id is not a list of card records
        let store = gateway_with(r#"{"columns": [], "cards": {"a": {}}}"#).load();
        assert_eq!(store.column_count(), 3);

        let store = gateway_with(r#"{"columns": "nope", "cards": []}"#).load();
        assert_eq!(store.column_count(), 3);
    }

    #[test]
    fn test_load_empty_content_is_absent() {
        assert!(gateway_with("   ").try_load().unwrap().is_none());
    }

    #[test]
    fn test_try_load_rejects_dangling_column() {
        let gateway = gateway_with(
            r#"{"columns": [{"id": "todo", "title": "Todo", "position": 0}],
                "cards": [{"id": "a", "title": "A", "columnId": "gone", "position": 0}]}"#,
        );
        assert!(matches!(
            gateway.try_load(),
            Err(BoardError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_try_load_rejects_blank_title() {
        let gateway =
            gateway_with(r#"{"columns": [{"id": "todo", "title": "  ", "position": 0}], "cards": []}"#);
        assert!(gateway.try_load().is_err());
    }

    #[test]
    fn test_load_trims_stored_titles() {
        let gateway = gateway_with(
            r#"{"columns": [{"id": "todo", "title": " Todo ", "position": 0}],
                "cards": [{"id": "a", "title": "\tA  ", "description": "  notes ", "columnId": "todo", "position": 0}]}"#,
        );

        let store = gateway.try_load().unwrap().unwrap();
        assert_eq!(column_titles(&store), vec!["Todo"]);
        let card = store.card(&CardId::from_string("a")).unwrap();
        assert_eq!(card.title, "A");
        assert_eq!(card.description.as_deref(), Some("notes"));
        assert_eq!(store.resolve_column("Todo").map(|c| c.id.as_str()), Some("todo"));
    }

    #[test]
    fn test_load_repairs_position_gaps() {
        let gateway = gateway_with(
            r#"{"columns": [{"id": "done", "title": "Done", "position": 7},
                            {"id": "todo", "title": "Todo", "position": 2}],
                "cards": [{"id": "b", "title": "B", "description": "", "columnId": "todo", "position": 5},
                          {"id": "a", "title": "A", "columnId": "todo", "position": 5},
                          {"id": "c", "title": "C", "columnId": "todo", "position": 1}]}"#,
        );

        let store = gateway.try_load().unwrap().unwrap();
        store.check_invariants().unwrap();
        assert_eq!(column_titles(&store), vec!["Todo", "Done"]);

        let order: Vec<&str> = store
            .cards_of(&ColumnId::from_string("todo"))
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(order, vec!["c", "b", "a"]);
        assert!(store
            .card(&CardId::from_string("b"))
            .unwrap()
            .description
            .is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let backend = MemoryStore::new();
        let gateway = PersistenceGateway::new(backend.clone());
        let store = gateway.load();

        gateway.save(&store);
        assert!(backend.raw(DEFAULT_STORAGE_KEY).is_some());

        let restored = PersistenceGateway::new(backend).load();
        assert_eq!(restored, store);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let backend = MemoryStore::new();
        backend.set_fail_writes(true);
        let gateway = PersistenceGateway::new(backend.clone());

        gateway.save(&gateway.seed());
        assert_eq!(backend.write_attempts(), 1);
        assert!(backend.raw(DEFAULT_STORAGE_KEY).is_none());
        assert!(gateway.try_save(&gateway.seed()).is_err());
    }

    #[test]
    fn test_custom_seed_and_key() {
        let backend = MemoryStore::new();
        let gateway = PersistenceGateway::new(backend.clone())
            .with_key("work")
            .with_seed_columns(vec!["Backlog".into(), " ".into(), "Shipped".into()]);

        let store = gateway.load();
        assert_eq!(column_titles(&store), vec!["Backlog", "Shipped"]);

        gateway.save(&store);
        assert!(backend.raw("work").is_some());
        gateway.clear().unwrap();
        assert!(backend.raw("work").is_none());
    }
}
