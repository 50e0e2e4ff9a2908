//! Error types for tupono-grid-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tupono-grid-core
///
/// Editing commands never fail; they report whether they applied. These errors come
/// from explicit construction, address parsing and invariant checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Requested grid size is zero or above the limits
    #[error("Invalid grid dimensions {rows}x{cols} (limits: 1..={max_rows} x 1..={max_cols})")]
    InvalidDimensions {
        rows: u32,
        cols: u32,
        max_rows: u32,
        max_cols: u32,
    },

    /// Position or region outside the grid
    #[error("{0} is outside the {1}x{2} grid")]
    OutOfBounds(String, u32, u32),

    /// Merged regions are inconsistent
    #[error("Region conflict at {at}: {message}")]
    RegionConflict { at: String, message: String },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    pub(crate) fn conflict<S: Into<String>>(at: crate::CellCoord, message: S) -> Self {
        Error::RegionConflict {
            at: at.to_string(),
            message: message.into(),
        }
    }
}
