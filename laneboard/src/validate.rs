//! Input normalization at the write boundary

use crate::error::{BoardError, Result};

/// Trim a required title, rejecting blank input
pub fn normalize_title(field: &str, title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional description. Blank input becomes `None` so there is a
/// single representation of "no description".
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}
