//! Merge and split operations
//!
//! A region only ever grows by one strip at a time: the column just right of it, or
//! the row just below it. Every position of that strip must be an untouched singleton,
//! so the result is always a rectangle and no region-union logic is needed.

use crate::cell::{Cell, CellCoord, Region};
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Right,
    Down,
}

impl Grid {
    /// Whether the region holding `focus` can absorb the column to its right
    pub fn can_merge_right(&self, focus: CellCoord) -> bool {
        self.absorbable_strip(focus, Direction::Right).is_some()
    }

    /// Whether the region holding `focus` can absorb the row below it
    pub fn can_merge_down(&self, focus: CellCoord) -> bool {
        self.absorbable_strip(focus, Direction::Down).is_some()
    }

    /// Grow the region holding `focus` by one column
    ///
    /// Absorbed cells lose their content. Returns `false` when the merge is not allowed.
    pub fn merge_right(&mut self, focus: CellCoord) -> bool {
        self.merge(focus, Direction::Right)
    }

    /// Grow the region holding `focus` by one row
    ///
    /// Absorbed cells lose their content. Returns `false` when the merge is not allowed.
    pub fn merge_down(&mut self, focus: CellCoord) -> bool {
        self.merge(focus, Direction::Down)
    }

    /// Break the region holding `focus` back into singletons
    ///
    /// The master keeps its content and formatting; every other position becomes a
    /// default empty cell. Returns `false` if the region was already a single cell.
    pub fn split(&mut self, focus: CellCoord) -> bool {
        let Some(region) = self.region_of(focus) else {
            return false;
        };
        if region.is_single() {
            return false;
        }

        for member in region.cells().skip(1) {
            if let Some(cell) = self.cell_mut(member) {
                *cell = Cell::default();
            }
        }
        if let Some(master) = self.cell_mut(region.start) {
            master.row_span = 1;
            master.col_span = 1;
        }

        tracing::debug!("Split region {}", region);
        true
    }

    fn merge(&mut self, focus: CellCoord, direction: Direction) -> bool {
        let Some((master, strip)) = self.absorbable_strip(focus, direction) else {
            return false;
        };

        for member in strip.cells() {
            if let Some(cell) = self.cell_mut(member) {
                *cell = Cell::hidden_by(master);
            }
        }
        if let Some(cell) = self.cell_mut(master) {
            match direction {
                Direction::Right => cell.col_span += 1,
                Direction::Down => cell.row_span += 1,
            }
        }

        tracing::debug!("Merged {} into region at {}", strip, master);
        true
    }

    /// The master of `focus` and the strip it would absorb, if every position of
    /// that strip is a visible unmerged cell
    fn absorbable_strip(&self, focus: CellCoord, direction: Direction) -> Option<(CellCoord, Region)> {
        let master = self.master_of(focus)?;
        let cell = self.cell(master)?;

        let strip = match direction {
            Direction::Right => {
                let next_col = master.col + cell.col_span;
                if next_col >= self.cols() {
                    return None;
                }
                Region::new(
                    CellCoord::new(master.row, next_col),
                    CellCoord::new(master.row + cell.row_span - 1, next_col),
                )
            }
            Direction::Down => {
                let next_row = master.row + cell.row_span;
                if next_row >= self.rows() {
                    return None;
                }
                Region::new(
                    CellCoord::new(next_row, master.col),
                    CellCoord::new(next_row, master.col + cell.col_span - 1),
                )
            }
        };

        let all_singletons = strip
            .cells()
            .all(|member| self.cell(member).map_or(false, Cell::is_singleton));

        all_singletons.then_some((master, strip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatPatch;
    use pretty_assertions::assert_eq;

    fn coord(row: u32, col: u32) -> CellCoord {
        CellCoord::new(row, col)
    }

    #[test]
    fn test_merge_right_absorbs_neighbour() {
        let mut grid = Grid::default();
        grid.set_content(coord(0, 1), "discarded");

        assert!(grid.can_merge_right(coord(0, 0)));
        assert!(grid.merge_right(coord(0, 0)));

        let master = grid.cell(coord(0, 0)).unwrap();
        assert_eq!((master.row_span, master.col_span), (1, 2));

        let hidden = grid.cell(coord(0, 1)).unwrap();
        assert!(hidden.hidden);
        assert_eq!(hidden.master, Some(coord(0, 0)));
        assert_eq!(hidden.content, "");
        grid.validate().unwrap();
    }

    #[test]
    fn test_merge_from_hidden_focus_redirects_to_master() {
        let mut grid = Grid::default();
        assert!(grid.merge_right(coord(0, 0)));

        assert!(grid.merge_down(coord(0, 1)));

        let master = grid.cell(coord(0, 0)).unwrap();
        assert_eq!((master.row_span, master.col_span), (2, 2));
        assert_eq!(grid.master_of(coord(1, 1)), Some(coord(0, 0)));
        grid.validate().unwrap();
    }

    #[test]
    fn test_merge_boundaries() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(!grid.can_merge_right(coord(0, 1)));
        assert!(!grid.can_merge_down(coord(1, 0)));

        assert!(grid.merge_right(coord(0, 0)));
        assert!(!grid.can_merge_right(coord(0, 0)));
        assert!(grid.can_merge_down(coord(0, 0)));
    }

    #[test]
    fn test_merge_rejects_hidden_neighbour() {
        let mut grid = Grid::default();
        assert!(grid.merge_right(coord(1, 1)));

        // (1, 2) is hidden under (1, 1)
        assert!(!grid.can_merge_down(coord(0, 2)));
        assert!(!grid.merge_down(coord(0, 2)));
        assert!(grid.can_merge_down(coord(0, 3)));
    }

    #[test]
    fn test_merge_rejects_merged_neighbour() {
        let mut grid = Grid::default();
        assert!(grid.merge_right(coord(0, 1)));

        assert!(!grid.can_merge_right(coord(0, 0)));
        assert!(grid.can_merge_down(coord(0, 0)));

        assert!(grid.merge_down(coord(1, 1)));
        assert!(!grid.can_merge_down(coord(0, 1)));
        assert!(!grid.can_merge_right(coord(1, 0)));
    }

    #[test]
    fn test_merge_out_of_range_focus() {
        let mut grid = Grid::default();
        let before = grid.clone();

        assert!(!grid.can_merge_right(coord(20, 0)));
        assert!(!grid.merge_down(coord(0, 20)));
        assert!(!grid.split(coord(20, 20)));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_split_keeps_master_content() {
        let mut grid = Grid::default();
        grid.set_content(coord(0, 0), "kept");
        grid.set_formatting(coord(0, 0), &FormatPatch::new().bold(true));
        assert!(grid.merge_right(coord(0, 0)));
        assert!(grid.merge_down(coord(0, 0)));

        assert!(grid.split(coord(1, 1)));

        let master = grid.cell(coord(0, 0)).unwrap();
        assert_eq!(master.content, "kept");
        assert!(master.bold);
        assert_eq!((master.row_span, master.col_span), (1, 1));
        for member in [coord(0, 1), coord(1, 0), coord(1, 1)] {
            assert_eq!(grid.cell(member).unwrap(), &Cell::default());
        }
        grid.validate().unwrap();
    }

    #[test]
    fn test_split_singleton_is_noop() {
        let mut grid = Grid::default();
        assert!(!grid.split(coord(3, 3)));
    }

    #[test]
    fn test_merge_then_split_restores_structure() {
        let original = Grid::default();
        let mut grid = original.clone();

        assert!(grid.merge_right(coord(2, 2)));
        assert!(grid.split(coord(2, 2)));

        assert_eq!(grid, original);
    }
}
