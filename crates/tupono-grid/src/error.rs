//! Editing session error types

use thiserror::Error;
use tupono_grid_templates::{SheetKind, StoreError};

/// Result type for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Errors surfaced by [`SheetEditor`](crate::SheetEditor) persistence calls
#[derive(Debug, Error)]
pub enum SessionError {
    /// The template store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// `save` was called before the sheet was bound to a stored record
    #[error("Sheet has not been saved yet; use save_as first")]
    Unbound,

    /// A stored sheet belongs to the other editor
    #[error("Template {id} is a {found} sheet, expected {expected}")]
    KindMismatch {
        id: String,
        expected: SheetKind,
        found: SheetKind,
    },
}
