//! Template store error types

use std::path::PathBuf;

use thiserror::Error;

use crate::types::TemplateId;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors returned by a [`TemplateStore`](crate::TemplateStore)
#[derive(Debug, Error)]
pub enum StoreError {
    /// No template with this id
    #[error("Template {0} not found")]
    NotFound(TemplateId),

    /// The payload was rejected
    #[error("Validation failed: {0}")]
    Validation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored record could not be decoded
    #[error("Corrupt template file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The store cannot be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
