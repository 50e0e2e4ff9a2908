//! Grid type

use crate::cell::{Cell, CellCoord, Region};
use crate::error::{Error, Result};
use crate::format::FormatPatch;
use crate::{DEFAULT_COLS, DEFAULT_ROWS, MAX_COLS, MAX_ROWS};

/// Options for creating a new grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    /// Number of rows (default: 8)
    pub default_rows: u32,
    /// Number of columns (default: 6)
    pub default_cols: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            default_rows: DEFAULT_ROWS,
            default_cols: DEFAULT_COLS,
        }
    }
}

/// A rectangular matrix of cells with mergeable regions
///
/// Every position belongs to exactly one region: either it is a master (visible) cell
/// whose spans cover the region, or it is hidden and points at that master. All
/// mutating methods keep this true and return whether they changed anything; a
/// coordinate outside the grid is a no-op rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    /// Row-major storage, `cells[row][col]`
    cells: Vec<Vec<Cell>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::blank(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Grid {
    /// Create a grid of default cells
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        if rows == 0 || cols == 0 || rows > MAX_ROWS || cols > MAX_COLS {
            return Err(Error::InvalidDimensions {
                rows,
                cols,
                max_rows: MAX_ROWS,
                max_cols: MAX_COLS,
            });
        }
        Ok(Self::blank(rows, cols))
    }

    /// Create a grid sized by `options`
    pub fn with_options(options: &GridOptions) -> Result<Self> {
        Self::new(options.default_rows, options.default_cols)
    }

    /// Unchecked constructor; callers guarantee `1..=MAX` dimensions
    pub(crate) fn blank(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            cells: (0..rows).map(|_| Self::default_row(cols)).collect(),
        }
    }

    fn default_row(cols: u32) -> Vec<Cell> {
        (0..cols).map(|_| Cell::default()).collect()
    }

    /// Number of rows
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Check whether a coordinate is inside the grid
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    // === Cell Access ===

    /// Get the cell at a coordinate
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.cells
            .get(coord.row as usize)
            .and_then(|row| row.get(coord.col as usize))
    }

    /// Get the cell at row and column indices
    pub fn cell_at(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cell(CellCoord::new(row, col))
    }

    pub(crate) fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        self.cells
            .get_mut(coord.row as usize)
            .and_then(|row| row.get_mut(coord.col as usize))
    }

    /// Resolve a coordinate to the master of the region it belongs to
    pub fn master_of(&self, coord: CellCoord) -> Option<CellCoord> {
        let cell = self.cell(coord)?;
        if cell.hidden {
            cell.master
        } else {
            Some(coord)
        }
    }

    /// Get the region a coordinate belongs to
    pub fn region_of(&self, coord: CellCoord) -> Option<Region> {
        let master = self.master_of(coord)?;
        let cell = self.cell(master)?;
        Some(Region::from_span(master, cell.row_span, cell.col_span))
    }

    /// Iterate over all positions in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellCoord, &Cell)> {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, cell)| (CellCoord::new(r as u32, c as u32), cell))
        })
    }

    /// Iterate over master cells in row-major order
    pub fn masters(&self) -> impl Iterator<Item = (CellCoord, &Cell)> {
        self.iter_cells().filter(|(_, cell)| !cell.hidden)
    }

    /// Iterate over the occupied regions, one per master, in row-major order
    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.masters()
            .map(|(coord, cell)| Region::from_span(coord, cell.row_span, cell.col_span))
    }

    /// Iterate over regions covering more than one position
    pub fn merged_regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.regions().filter(|region| !region.is_single())
    }

    // === Cell Modification ===

    /// Replace the content at a coordinate
    pub fn set_content<S: Into<String>>(&mut self, coord: CellCoord, content: S) -> bool {
        match self.cell_mut(coord) {
            Some(cell) => {
                cell.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Shallow-merge formatting onto the cell at `coord`
    ///
    /// The patch lands on exactly the given position; it is not redirected to the
    /// region's master.
    pub fn set_formatting(&mut self, coord: CellCoord, patch: &FormatPatch) -> bool {
        match self.cell_mut(coord) {
            Some(cell) => {
                cell.apply(patch);
                true
            }
            None => false,
        }
    }

    // === Row/Column Operations ===

    /// Append a row of default cells at the bottom
    pub fn add_row(&mut self) -> bool {
        if self.rows >= MAX_ROWS {
            return false;
        }
        self.cells.push(Self::default_row(self.cols));
        self.rows += 1;
        true
    }

    /// Append a default cell to every row
    pub fn add_column(&mut self) -> bool {
        if self.cols >= MAX_COLS {
            return false;
        }
        for row in &mut self.cells {
            row.push(Cell::default());
        }
        self.cols += 1;
        true
    }

    /// Drop the last row
    ///
    /// A no-op on a single-row grid. Regions reaching into the removed row are shrunk
    /// so they end on the new last row.
    pub fn remove_row(&mut self) -> bool {
        if self.rows <= 1 {
            return false;
        }
        let last = self.rows - 1;

        for (coord, cell) in self.masters_mut() {
            if coord.row < last && coord.row + cell.row_span > last {
                tracing::debug!(
                    "Shrinking region at {} from {} to {} rows",
                    coord,
                    cell.row_span,
                    last - coord.row
                );
                cell.row_span = last - coord.row;
            }
        }

        self.cells.pop();
        self.rows -= 1;
        true
    }

    /// Drop the last column
    ///
    /// A no-op on a single-column grid. Regions reaching into the removed column are
    /// shrunk so they end on the new last column.
    pub fn remove_column(&mut self) -> bool {
        if self.cols <= 1 {
            return false;
        }
        let last = self.cols - 1;

        for (coord, cell) in self.masters_mut() {
            if coord.col < last && coord.col + cell.col_span > last {
                tracing::debug!(
                    "Shrinking region at {} from {} to {} columns",
                    coord,
                    cell.col_span,
                    last - coord.col
                );
                cell.col_span = last - coord.col;
            }
        }

        for row in &mut self.cells {
            row.pop();
        }
        self.cols -= 1;
        true
    }

    fn masters_mut(&mut self) -> impl Iterator<Item = (CellCoord, &mut Cell)> {
        self.cells.iter_mut().enumerate().flat_map(|(r, row)| {
            row.iter_mut()
                .enumerate()
                .filter(|(_, cell)| !cell.hidden)
                .map(move |(c, cell)| (CellCoord::new(r as u32, c as u32), cell))
        })
    }

    // === Invariants ===

    /// Check that every position belongs to exactly one in-bounds region
    pub fn validate(&self) -> Result<()> {
        if self.cells.len() != self.rows as usize
            || self.cells.iter().any(|row| row.len() != self.cols as usize)
        {
            return Err(Error::other(format!(
                "storage does not match {}x{} dimensions",
                self.rows, self.cols
            )));
        }

        for (coord, cell) in self.iter_cells() {
            if cell.hidden {
                self.validate_hidden(coord, cell)?;
            } else {
                self.validate_master(coord, cell)?;
            }
        }
        Ok(())
    }

    fn validate_master(&self, coord: CellCoord, cell: &Cell) -> Result<()> {
        if cell.master.is_some() {
            return Err(Error::conflict(coord, "visible cell has a master"));
        }
        if cell.row_span == 0 || cell.col_span == 0 {
            return Err(Error::conflict(coord, "span of zero"));
        }

        let region = Region::from_span(coord, cell.row_span, cell.col_span);
        if !region.fits_within(self.rows, self.cols) {
            return Err(Error::OutOfBounds(region.to_string(), self.rows, self.cols));
        }

        for member in region.cells().skip(1) {
            let covered = self.cell(member).map_or(false, |c| c.hidden && c.master == Some(coord));
            if !covered {
                return Err(Error::conflict(
                    member,
                    format!("not hidden under master {}", coord),
                ));
            }
        }
        Ok(())
    }

    fn validate_hidden(&self, coord: CellCoord, cell: &Cell) -> Result<()> {
        if cell.row_span != 1 || cell.col_span != 1 {
            return Err(Error::conflict(coord, "hidden cell carries a span"));
        }

        let master = cell
            .master
            .ok_or_else(|| Error::conflict(coord, "hidden cell without master"))?;
        let master_cell = self
            .cell(master)
            .ok_or_else(|| Error::conflict(coord, format!("master {} is out of bounds", master)))?;
        if master_cell.hidden {
            return Err(Error::conflict(
                coord,
                format!("master {} is itself hidden", master),
            ));
        }

        let region = Region::from_span(master, master_cell.row_span, master_cell.col_span);
        if !region.contains(coord) {
            return Err(Error::conflict(
                coord,
                format!("outside the region {} of its master", region),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::HorizontalAlign;

    #[test]
    fn test_default_grid() {
        let grid = Grid::default();
        assert_eq!(grid.rows(), 8);
        assert_eq!(grid.cols(), 6);
        assert_eq!(grid.iter_cells().count(), 48);
        assert!(grid.iter_cells().all(|(_, cell)| *cell == Cell::default()));
        grid.validate().unwrap();
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert!(Grid::new(0, 3).is_err());
        assert!(Grid::new(3, 0).is_err());
        assert!(Grid::new(MAX_ROWS + 1, 1).is_err());
        assert!(Grid::new(1, MAX_COLS + 1).is_err());

        let grid = Grid::new(2, 3).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
    }

    #[test]
    fn test_with_options() {
        let options = GridOptions {
            default_rows: 3,
            ..Default::default()
        };
        let grid = Grid::with_options(&options).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (3, 6));
    }

    #[test]
    fn test_add_row_and_column() {
        let mut grid = Grid::new(2, 2).unwrap();

        assert!(grid.add_row());
        assert_eq!(grid.rows(), 3);
        assert!(grid.cell_at(2, 1).is_some());

        assert!(grid.add_column());
        assert_eq!(grid.cols(), 3);
        assert!(grid.cell_at(0, 2).is_some());
        assert!(grid.cell_at(2, 2).is_some());

        grid.validate().unwrap();
    }

    #[test]
    fn test_remove_row_single_row_is_noop() {
        let mut grid = Grid::new(1, 4).unwrap();
        assert!(!grid.remove_row());
        assert_eq!(grid.rows(), 1);
    }

    #[test]
    fn test_remove_column_single_column_is_noop() {
        let mut grid = Grid::new(4, 1).unwrap();
        assert!(!grid.remove_column());
        assert_eq!(grid.cols(), 1);
    }

    #[test]
    fn test_remove_row_shrinks_crossing_region() {
        let mut grid = Grid::new(3, 2).unwrap();
        let top = CellCoord::new(1, 0);
        assert!(grid.merge_down(top));
        assert!(grid.merge_right(top));
        assert_eq!(grid.region_of(top).unwrap().to_string(), "A2:B3");

        assert!(grid.remove_row());

        assert_eq!(grid.rows(), 2);
        let master = grid.cell(top).unwrap();
        assert_eq!((master.row_span, master.col_span), (1, 2));
        grid.validate().unwrap();
    }

    #[test]
    fn test_remove_column_shrinks_crossing_region() {
        let mut grid = Grid::new(2, 3).unwrap();
        let origin = CellCoord::new(0, 0);
        assert!(grid.merge_right(origin));
        assert!(grid.merge_right(origin));

        assert!(grid.remove_column());

        assert_eq!(grid.cell(origin).unwrap().col_span, 2);
        grid.validate().unwrap();
    }

    #[test]
    fn test_remove_row_drops_region_mastered_in_last_row() {
        let mut grid = Grid::new(2, 3).unwrap();
        assert!(grid.merge_right(CellCoord::new(1, 0)));

        assert!(grid.remove_row());

        assert_eq!(grid.regions().count(), 3);
        grid.validate().unwrap();
    }

    #[test]
    fn test_set_content_and_formatting() {
        let mut grid = Grid::default();
        let coord = CellCoord::new(2, 3);

        assert!(grid.set_content(coord, "<p>hi</p>"));
        assert!(grid.set_formatting(coord, &FormatPatch::new().align(HorizontalAlign::Center)));

        let cell = grid.cell(coord).unwrap();
        assert_eq!(cell.content, "<p>hi</p>");
        assert_eq!(cell.align, HorizontalAlign::Center);
    }

    #[test]
    fn test_out_of_range_edits_are_noops() {
        let mut grid = Grid::default();
        let before = grid.clone();

        assert!(!grid.set_content(CellCoord::new(8, 0), "x"));
        assert!(!grid.set_formatting(CellCoord::new(0, 6), &FormatPatch::new().bold(true)));

        assert_eq!(grid, before);
    }

    #[test]
    fn test_formatting_targets_focused_position() {
        let mut grid = Grid::default();
        let origin = CellCoord::new(0, 0);
        let hidden = CellCoord::new(0, 1);
        assert!(grid.merge_right(origin));

        assert!(grid.set_formatting(hidden, &FormatPatch::new().bold(true)));

        assert!(!grid.cell(origin).unwrap().bold);
        assert!(grid.cell(hidden).unwrap().bold);
        grid.validate().unwrap();
    }

    #[test]
    fn test_master_and_region_lookup() {
        let mut grid = Grid::default();
        let origin = CellCoord::new(0, 0);
        assert!(grid.merge_down(origin));

        assert_eq!(grid.master_of(CellCoord::new(1, 0)), Some(origin));
        assert_eq!(grid.master_of(CellCoord::new(1, 1)), Some(CellCoord::new(1, 1)));
        assert_eq!(grid.master_of(CellCoord::new(9, 9)), None);
        assert_eq!(
            grid.region_of(CellCoord::new(1, 0)),
            Some(Region::from_span(origin, 2, 1))
        );
        assert_eq!(grid.merged_regions().count(), 1);
    }

    #[test]
    fn test_validate_detects_broken_regions() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.cells[0][0].col_span = 2;
        assert!(matches!(
            grid.validate(),
            Err(Error::RegionConflict { .. })
        ));

        let mut grid = Grid::new(2, 2).unwrap();
        grid.cells[1][1] = Cell::hidden_by(CellCoord::new(0, 0));
        assert!(grid.validate().is_err());

        let mut grid = Grid::new(2, 2).unwrap();
        grid.cells[0][1].col_span = 2;
        assert_eq!(
            grid.validate(),
            Err(Error::OutOfBounds("B1:C1".into(), 2, 2))
        );
    }
}
