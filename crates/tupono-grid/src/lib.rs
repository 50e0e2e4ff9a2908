//! # tupono-grid
//!
//! Mergeable rich-text sheets shared by the Tupono feedback and report editors.
//!
//! ## Features
//!
//! - Grid model with merge right/down, split and row/column editing
//! - Compact "master cell list" serialization, tolerant of malformed stored sheets
//! - JSON codec for the stored sheet format
//! - Template storage (in-memory or directory backed)
//! - [`SheetEditor`], a rendering-agnostic editing session for view bindings
//!
//! ## Example
//!
//! ```rust
//! use tupono_grid::prelude::*;
//!
//! let mut store = MemoryTemplateStore::new();
//! let mut editor = SheetEditor::report();
//!
//! editor.focus(CellCoord::new(0, 0));
//! editor.merge_right();
//! editor.set_content(CellCoord::new(0, 0), "<b>Quarterly summary</b>");
//!
//! let id = editor
//!     .save_as(&mut store, TemplateMeta::named("Quarterly"))
//!     .unwrap();
//!
//! let mut other = SheetEditor::report();
//! other.load(&store, id).unwrap();
//! assert_eq!(other.grid(), editor.grid());
//! ```

pub mod error;
pub mod prelude;
pub mod session;

pub use error::{SessionError, SessionResult};
pub use session::{Notice, NoticeLevel, SheetEditor, TemplateMeta};

// Re-export core types
pub use tupono_grid_core::{
    content, Cell, CellCoord, Error, FormatPatch, Grid, GridOptions, HorizontalAlign,
    HydrateReport, Region, Result, SerializedSheet, SheetCell, SkipReason, SkippedEntry,
    VerticalAlign, DEFAULT_COLS, DEFAULT_ROWS, MAX_COLS, MAX_ROWS,
};

// Re-export I/O types
pub use tupono_grid_json::{
    JsonError, JsonResult, SheetReadOptions, SheetReader, SheetWriteOptions, SheetWriter,
};

// Re-export storage types
pub use tupono_grid_templates::{
    DirTemplateStore, MemoryTemplateStore, NewTemplate, SheetKind, StoreError, StoreResult,
    Template, TemplateFilter, TemplateId, TemplatePatch, TemplateStore, TemplateSummary,
    Visibility,
};
