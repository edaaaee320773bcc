//! Single-board kanban engine
//!
//! Holds one board of ordered columns, each with ordered cards, keeps both
//! sibling sets densely numbered under every mutation, and snapshots the
//! board to a key-value store after each change.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use laneboard::{
//!     card::{AddCard, MoveCard},
//!     BoardContext, BoardOperationProcessor, FileStore, OperationProcessor, PersistenceGateway,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = PersistenceGateway::new(FileStore::new("/tmp/laneboard"));
//! let mut ctx = BoardContext::open(gateway);
//! let processor = BoardOperationProcessor::new();
//!
//! let todo = ctx.store().columns_sorted()[0].id.clone();
//! let done = ctx.store().columns_sorted()[2].id.clone();
//!
//! let card = processor.process(&AddCard::new(todo, "Write release notes"), &mut ctx)?;
//! let id = card["id"].as_str().unwrap_or_default().to_string();
//! processor.process(&MoveCard::new(id, done, 0), &mut ctx)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Stored document
//!
//! ```text
//! kanban-board-state.json
//! {
//!   "columns": [ { "id", "title", "position" } ],
//!   "cards":   [ { "id", "title", "description", "columnId", "position" } ]
//! }
//! ```
//!
//! Commands run through [`BoardOperationProcessor`]: a command that changed
//! the board yields a log entry and a snapshot write, a read or a no-op
//! yields neither.

mod command;
mod config;
mod context;
mod error;
mod ordering;
pub mod persistence;
mod processor;
pub mod reorder;
mod store;
pub mod types;
mod validate;

// Command modules
pub mod board;
pub mod card;
pub mod column;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{BoardConfig, CONFIG_FILE_NAME, ENV_PREFIX};
pub use context::{BoardContext, DEFAULT_MAX_ACTIVITY_ENTRIES};
pub use error::{BoardError, Result};
pub use persistence::{
    FileStore, KeyValueStore, MemoryStore, PersistenceGateway, DEFAULT_COLUMNS,
    DEFAULT_STORAGE_KEY,
};
pub use processor::BoardOperationProcessor;
pub use reorder::{DragItem, GestureOutcome, HoverTarget, ReorderEngine};
pub use store::BoardStore;
pub use validate::{normalize_description, normalize_title};

// Re-export operation types
pub use laneboard_operations::{
    Execute, ExecutionResult, LogEntry, Operation, OperationProcessor, ParamMeta, ParamType,
};
