//! JSON codec error types

use thiserror::Error;

/// Result type for JSON sheet operations
pub type JsonResult<T> = std::result::Result<T, JsonError>;

/// Errors that can occur while reading or writing sheets
#[derive(Debug, Error)]
pub enum JsonError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON or wrong field types
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Strict reading refused a sheet that would lose entries
    #[error("Sheet has {count} unplaceable entries (first: #{first_index}, {reason})")]
    SkippedEntries {
        count: usize,
        first_index: usize,
        reason: String,
    },

    /// Strict reading refused a sheet with out-of-range dimensions
    #[error("Sheet dimensions {rows}x{cols} are out of range")]
    Dimensions { rows: i64, cols: i64 },
}
