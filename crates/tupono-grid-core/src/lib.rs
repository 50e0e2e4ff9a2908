//! # tupono-grid-core
//!
//! Core data structures for the Tupono sheet editor.
//!
//! This crate provides the mergeable grid shared by the feedback and report editors:
//! - [`Grid`] - The cell matrix with merge/split and row/column operations
//! - [`Cell`] - One grid position (master or hidden)
//! - [`CellCoord`] and [`Region`] - Addressing and rectangular spans
//! - [`SerializedSheet`] - The flat "master cell list" used for persistence
//!
//! ## Example
//!
//! ```rust
//! use tupono_grid_core::{CellCoord, Grid};
//!
//! let mut grid = Grid::default();
//! let origin = CellCoord::new(0, 0);
//!
//! assert!(grid.merge_right(origin));
//! assert!(grid.merge_down(origin));
//! grid.set_content(origin, "<b>Summary</b>");
//!
//! let sheet = grid.serialize();
//! assert_eq!(sheet.cells.len(), 8 * 6 - 3);
//!
//! let restored = Grid::hydrate(&sheet);
//! assert_eq!(restored, grid);
//! ```

pub mod cell;
pub mod content;
pub mod error;
pub mod format;
pub mod grid;
mod merge;
pub mod sheet;

pub use cell::{Cell, CellCoord, Region};
pub use error::{Error, Result};
pub use format::{FormatPatch, HorizontalAlign, VerticalAlign};
pub use grid::{Grid, GridOptions};
pub use sheet::{HydrateReport, SerializedSheet, SheetCell, SkipReason, SkippedEntry};

/// Default number of rows for a new sheet
pub const DEFAULT_ROWS: u32 = 8;

/// Default number of columns for a new sheet
pub const DEFAULT_COLS: u32 = 6;

/// Maximum number of rows a grid may hold
pub const MAX_ROWS: u32 = 4096;

/// Maximum number of columns a grid may hold
pub const MAX_COLS: u32 = 256;
