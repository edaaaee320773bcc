//! Error types for the board engine

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// A required field is blank
    #[error("invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Card not found
    #[error("card not found: {id}")]
    CardNotFound { id: String },

    /// Storage backend read or write failure
    #[error("storage error: {message}")]
    Storage { message: String },

    /// Stored document failed validation
    #[error("invalid board document: {message}")]
    InvalidDocument { message: String },

    /// Configuration could not be extracted
    #[error("configuration error: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an invalid document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The operation referenced an entity that no longer exists.
    ///
    /// Callers treat these as no-ops: the entity may have been removed by an
    /// earlier event in the same session.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::ColumnNotFound { .. } | Self::CardNotFound { .. })
    }

    /// Check if this is a validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
