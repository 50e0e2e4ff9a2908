//! Serialized sheet model
//!
//! The persisted form of a grid is a flat list with one entry per master cell. Hidden
//! positions are implied by the spans and are never written out. Coordinates and spans
//! are kept as signed integers here so that malformed stored sheets still parse and can
//! be skipped entry by entry during [`Grid::hydrate`].
//!
//! Entry decoding is lenient per field: a value of the wrong type or an unknown alignment reads
//! as a fallback instead of failing the whole sheet. Unreadable positions become `-1` and
//! unreadable spans `0`, so hydration skips those entries; unreadable content, flags and
//! alignments fall back to their defaults and the entry is kept. An entry that is not an
//! object at all reads as position `-1`. The sheet's own `rows`/`cols` must be integers.

use std::fmt;

use crate::cell::{Cell, CellCoord, Region};
use crate::format::{HorizontalAlign, VerticalAlign};
use crate::grid::Grid;
use crate::{DEFAULT_COLS, DEFAULT_ROWS, MAX_COLS, MAX_ROWS};

/// A grid in transport form: `{rows, cols, cells}`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SerializedSheet {
    pub rows: i64,
    pub cols: i64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::entries"))]
    pub cells: Vec<SheetCell>,
}

impl Default for SerializedSheet {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS as i64,
            cols: DEFAULT_COLS as i64,
            cells: Vec::new(),
        }
    }
}

/// One master cell in transport form
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct SheetCell {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::position"))]
    pub r: i64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::position"))]
    pub c: i64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::span"))]
    pub row_span: i64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::span"))]
    pub col_span: i64,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::or_default"))]
    pub content: String,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::or_default"))]
    pub bold: bool,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::or_default"))]
    pub italic: bool,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::or_default"))]
    pub align: HorizontalAlign,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::or_default"))]
    pub v_align: VerticalAlign,
}

impl Default for SheetCell {
    fn default() -> Self {
        Self {
            r: 0,
            c: 0,
            row_span: 1,
            col_span: 1,
            content: String::new(),
            bold: false,
            italic: false,
            align: HorizontalAlign::default(),
            v_align: VerticalAlign::default(),
        }
    }
}

impl SheetCell {
    /// Stand-in for an entry that could not be decoded; hydration skips it
    #[cfg(feature = "serde")]
    fn unreadable() -> Self {
        Self {
            r: -1,
            c: -1,
            ..Self::default()
        }
    }

    /// Build the entry for a master cell
    pub fn from_cell(coord: CellCoord, cell: &Cell) -> Self {
        Self {
            r: coord.row as i64,
            c: coord.col as i64,
            row_span: cell.row_span as i64,
            col_span: cell.col_span as i64,
            content: cell.content.clone(),
            bold: cell.bold,
            italic: cell.italic,
            align: cell.align,
            v_align: cell.v_align,
        }
    }

    /// The master cell this entry describes (not hidden, spans as stored)
    fn to_cell(&self, row_span: u32, col_span: u32) -> Cell {
        Cell {
            content: self.content.clone(),
            row_span,
            col_span,
            hidden: false,
            master: None,
            bold: self.bold,
            italic: self.italic,
            align: self.align,
            v_align: self.v_align,
        }
    }
}

/// Why a serialized entry was not placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Negative or unrepresentable row/column
    InvalidPosition,
    /// A span below 1
    InvalidSpan,
    /// The rectangle reaches past the grid
    OutOfBounds,
    /// The rectangle covers a position already claimed by an earlier entry
    Overlap,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::InvalidPosition => "invalid position",
            SkipReason::InvalidSpan => "span below 1",
            SkipReason::OutOfBounds => "region exceeds grid bounds",
            SkipReason::Overlap => "region overlaps an earlier entry",
        };
        f.write_str(text)
    }
}

/// A serialized entry dropped during hydration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Position of the entry in `cells`
    pub index: usize,
    pub r: i64,
    pub c: i64,
    pub reason: SkipReason,
}

/// What hydration had to tolerate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrateReport {
    pub skipped: Vec<SkippedEntry>,
    /// Stated `rows`/`cols` had to be clamped into range
    pub clamped_dimensions: bool,
}

impl HydrateReport {
    /// Whether the sheet loaded without dropping or adjusting anything
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && !self.clamped_dimensions
    }
}

impl Grid {
    /// Convert to the transport form, one entry per master in row-major order
    pub fn serialize(&self) -> SerializedSheet {
        SerializedSheet {
            rows: self.rows() as i64,
            cols: self.cols() as i64,
            cells: self
                .masters()
                .map(|(coord, cell)| SheetCell::from_cell(coord, cell))
                .collect(),
        }
    }

    /// Rebuild a grid from its transport form
    ///
    /// Entries that cannot be placed are skipped; the rest of the sheet still loads.
    pub fn hydrate(sheet: &SerializedSheet) -> Grid {
        Self::hydrate_report(sheet).0
    }

    /// Like [`Grid::hydrate`], also returning what was skipped
    pub fn hydrate_report(sheet: &SerializedSheet) -> (Grid, HydrateReport) {
        let mut report = HydrateReport::default();

        let rows = clamp_dimension(sheet.rows, MAX_ROWS, "rows", &mut report);
        let cols = clamp_dimension(sheet.cols, MAX_COLS, "cols", &mut report);
        let mut grid = Grid::blank(rows, cols);

        // Positions already covered by a placed entry
        let mut claimed = vec![false; rows as usize * cols as usize];

        for (index, entry) in sheet.cells.iter().enumerate() {
            match grid.place(entry, &mut claimed) {
                Ok(region) => {
                    if !region.is_single() {
                        tracing::trace!("Hydrated merged region {}", region);
                    }
                }
                Err(reason) => {
                    tracing::warn!(
                        "Skipping sheet entry #{} at ({}, {}): {}",
                        index,
                        entry.r,
                        entry.c,
                        reason
                    );
                    report.skipped.push(SkippedEntry {
                        index,
                        r: entry.r,
                        c: entry.c,
                        reason,
                    });
                }
            }
        }

        (grid, report)
    }

    fn place(&mut self, entry: &SheetCell, claimed: &mut [bool]) -> Result<Region, SkipReason> {
        let (Ok(row), Ok(col)) = (u32::try_from(entry.r), u32::try_from(entry.c)) else {
            return Err(SkipReason::InvalidPosition);
        };
        if entry.row_span < 1 || entry.col_span < 1 {
            return Err(SkipReason::InvalidSpan);
        }

        // Checked in i64; huge spans saturate instead of overflowing
        if entry.r.saturating_add(entry.row_span) > self.rows() as i64
            || entry.c.saturating_add(entry.col_span) > self.cols() as i64
        {
            return Err(SkipReason::OutOfBounds);
        }
        let row_span = entry.row_span as u32;
        let col_span = entry.col_span as u32;

        let master = CellCoord::new(row, col);
        let region = Region::from_span(master, row_span, col_span);
        let cols = self.cols() as usize;
        let index = |coord: CellCoord| coord.row as usize * cols + coord.col as usize;

        if region.cells().any(|coord| claimed[index(coord)]) {
            return Err(SkipReason::Overlap);
        }

        for coord in region.cells() {
            claimed[index(coord)] = true;
            if let Some(cell) = self.cell_mut(coord) {
                *cell = if coord == master {
                    entry.to_cell(row_span, col_span)
                } else {
                    Cell::hidden_by(master)
                };
            }
        }

        Ok(region)
    }
}

/// Field decoders that fall back instead of failing
#[cfg(feature = "serde")]
mod lenient {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    use super::SheetCell;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Maybe<T> {
        Value(T),
        Other(IgnoredAny),
    }

    impl<T> Maybe<T> {
        fn or(self, fallback: T) -> T {
            match self {
                Maybe::Value(value) => value,
                Maybe::Other(_) => fallback,
            }
        }
    }

    fn or<'de, D, T>(deserializer: D, fallback: T) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Maybe::deserialize(deserializer)?.or(fallback))
    }

    pub(super) fn position<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        or(deserializer, -1)
    }

    pub(super) fn span<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        or(deserializer, 0)
    }

    pub(super) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        or(deserializer, T::default())
    }

    pub(super) fn entries<'de, D>(deserializer: D) -> Result<Vec<SheetCell>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries: Vec<Maybe<SheetCell>> = or(deserializer, Vec::new())?;
        Ok(entries
            .into_iter()
            .map(|entry| entry.or(SheetCell::unreadable()))
            .collect())
    }
}

fn clamp_dimension(value: i64, max: u32, name: &str, report: &mut HydrateReport) -> u32 {
    let clamped = value.clamp(1, max as i64) as u32;
    if clamped as i64 != value {
        tracing::warn!("Sheet {} of {} clamped to {}", name, value, clamped);
        report.clamped_dimensions = true;
    }
    clamped
}

impl From<&Grid> for SerializedSheet {
    fn from(grid: &Grid) -> Self {
        grid.serialize()
    }
}

impl From<&SerializedSheet> for Grid {
    fn from(sheet: &SerializedSheet) -> Self {
        Grid::hydrate(sheet)
    }
}
