//! Per-position cell data

use super::CellCoord;
use crate::format::{FormatPatch, HorizontalAlign, VerticalAlign};

/// One grid position
///
/// A visible cell is the master of the `row_span x col_span` rectangle whose top-left
/// corner it sits on. Every other position of that rectangle is `hidden` and points back
/// at the master; hidden cells always keep spans of 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Rich-text markup, opaque to the grid
    pub content: String,
    /// Rows covered when this cell is a master
    pub row_span: u32,
    /// Columns covered when this cell is a master
    pub col_span: u32,
    /// Covered by another cell's span
    pub hidden: bool,
    /// The covering master, set only when hidden
    pub master: Option<CellCoord>,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Horizontal alignment
    pub align: HorizontalAlign,
    /// Vertical alignment
    pub v_align: VerticalAlign,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            content: String::new(),
            row_span: 1,
            col_span: 1,
            hidden: false,
            master: None,
            bold: false,
            italic: false,
            align: HorizontalAlign::default(),
            v_align: VerticalAlign::default(),
        }
    }
}

impl Cell {
    /// Create a new default cell
    pub fn new() -> Self {
        Self::default()
    }

    /// A default cell covered by `master`
    pub(crate) fn hidden_by(master: CellCoord) -> Self {
        Self {
            hidden: true,
            master: Some(master),
            ..Self::default()
        }
    }

    /// Whether this cell is the top-left of its region
    pub fn is_master(&self) -> bool {
        !self.hidden
    }

    /// Whether this cell spans more than one position
    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }

    /// A visible, unmerged cell; the only kind a merge may absorb
    pub fn is_singleton(&self) -> bool {
        !self.hidden && !self.is_merged()
    }

    /// Shallow-merge a formatting patch onto this cell
    pub fn apply(&mut self, patch: &FormatPatch) {
        if let Some(bold) = patch.bold {
            self.bold = bold;
        }
        if let Some(italic) = patch.italic {
            self.italic = italic;
        }
        if let Some(align) = patch.align {
            self.align = align;
        }
        if let Some(v_align) = patch.v_align {
            self.v_align = v_align;
        }
    }

    /// Builder: set content
    pub fn with_content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = content.into();
        self
    }

    /// Builder: apply a formatting patch
    pub fn with_format(mut self, patch: &FormatPatch) -> Self {
        self.apply(patch);
        self
    }
}
