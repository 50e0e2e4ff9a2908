//! Prelude module - common imports for tupono-grid users
//!
//! ```rust
//! use tupono_grid::prelude::*;
//! ```

pub use crate::{
    // Grid types
    CellCoord,
    FormatPatch,
    Grid,
    HorizontalAlign,
    Region,
    SerializedSheet,
    VerticalAlign,

    // Session types
    SessionError,
    SheetEditor,
    TemplateMeta,

    // I/O types
    SheetReadOptions,
    SheetReader,
    SheetWriteOptions,
    SheetWriter,

    // Storage types
    DirTemplateStore,
    MemoryTemplateStore,
    SheetKind,
    TemplateFilter,
    TemplateId,
    TemplateStore,
    Visibility,
};
