//! Edit commands for `tgrid edit`
//!
//! Each command is one argument of the form `NAME[@CELL][=VALUE]`, for example
//! `add-row`, `merge-right@A1`, `align@B2=center` or `set@C3=<b>Total</b>`.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use tupono_grid::{CellCoord, Error, FormatPatch, HorizontalAlign, SheetEditor, VerticalAlign};

/// A single editing command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    AddRow,
    AddColumn,
    RemoveRow,
    RemoveColumn,
    MergeRight(CellCoord),
    MergeDown(CellCoord),
    Split(CellCoord),
    Bold(CellCoord),
    Italic(CellCoord),
    Align(CellCoord, HorizontalAlign),
    VAlign(CellCoord, VerticalAlign),
    Set(CellCoord, String),
}

impl EditOp {
    /// The position the command targets, if any
    pub fn target(&self) -> Option<CellCoord> {
        match self {
            EditOp::AddRow | EditOp::AddColumn | EditOp::RemoveRow | EditOp::RemoveColumn => None,
            EditOp::MergeRight(at)
            | EditOp::MergeDown(at)
            | EditOp::Split(at)
            | EditOp::Bold(at)
            | EditOp::Italic(at)
            | EditOp::Align(at, _)
            | EditOp::VAlign(at, _)
            | EditOp::Set(at, _) => Some(*at),
        }
    }

    /// Run the command against a session
    ///
    /// Returns whether the sheet changed. Targeting a position outside the sheet is an
    /// error; a command the sheet refuses (say, merging into a merged neighbour) is not.
    pub fn apply(&self, editor: &mut SheetEditor) -> Result<bool> {
        if let Some(at) = self.target() {
            if !editor.focus(at) {
                let grid = editor.grid();
                return Err(Error::OutOfBounds(at.to_string(), grid.rows(), grid.cols()).into());
            }
        }

        let changed = match self {
            EditOp::AddRow => editor.add_row(),
            EditOp::AddColumn => editor.add_column(),
            EditOp::RemoveRow => editor.remove_row(),
            EditOp::RemoveColumn => editor.remove_column(),
            EditOp::MergeRight(_) => editor.merge_right(),
            EditOp::MergeDown(_) => editor.merge_down(),
            EditOp::Split(_) => editor.split(),
            EditOp::Bold(_) => editor.toggle_bold(),
            EditOp::Italic(_) => editor.toggle_italic(),
            EditOp::Align(_, align) => editor.set_formatting(&FormatPatch::new().align(*align)),
            EditOp::VAlign(_, v_align) => {
                editor.set_formatting(&FormatPatch::new().v_align(*v_align))
            }
            EditOp::Set(at, content) => editor.set_content(*at, content.as_str()),
        };
        Ok(changed)
    }
}

impl FromStr for EditOp {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (head, value) = match s.split_once('=') {
            Some((head, value)) => (head, Some(value)),
            None => (s, None),
        };
        let (name, at) = match head.split_once('@') {
            Some((name, cell)) => {
                let at: CellCoord = cell
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid cell in '{}'", s))?;
                (name.trim(), Some(at))
            }
            None => (head.trim(), None),
        };

        let needs_cell = || at.ok_or_else(|| anyhow!("'{}' needs a cell, as in {}@A1", name, name));
        let needs_value = || value.ok_or_else(|| anyhow!("'{}' needs a value after '='", name));

        let op = match name.to_ascii_lowercase().as_str() {
            "add-row" => EditOp::AddRow,
            "add-col" | "add-column" => EditOp::AddColumn,
            "remove-row" => EditOp::RemoveRow,
            "remove-col" | "remove-column" => EditOp::RemoveColumn,
            "merge-right" => EditOp::MergeRight(needs_cell()?),
            "merge-down" => EditOp::MergeDown(needs_cell()?),
            "split" => EditOp::Split(needs_cell()?),
            "bold" => EditOp::Bold(needs_cell()?),
            "italic" => EditOp::Italic(needs_cell()?),
            "align" => EditOp::Align(needs_cell()?, needs_value()?.trim().parse()?),
            "valign" => EditOp::VAlign(needs_cell()?, needs_value()?.trim().parse()?),
            "set" => EditOp::Set(needs_cell()?, needs_value()?.to_string()),
            other => bail!("unknown edit command '{}'", other),
        };

        if at.is_some() && op.target().is_none() {
            bail!("'{}' does not take a cell", name);
        }
        Ok(op)
    }
}
