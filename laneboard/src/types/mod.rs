//! Core types for the board engine

mod board;
mod ids;

pub use board::{BoardDocument, Card, Column};
pub use ids::{CardId, ColumnId};
