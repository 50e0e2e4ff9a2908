//! End-to-end editing scenarios on the grid model

use pretty_assertions::assert_eq;
use tupono_grid_core::{Cell, CellCoord, Grid, SerializedSheet, SheetCell};

fn coord(row: u32, col: u32) -> CellCoord {
    CellCoord::new(row, col)
}

/// Merge A1 right twice then down once on the default sheet
#[test]
fn test_build_two_by_three_header() {
    let mut grid = Grid::default();
    let origin = coord(0, 0);

    assert!(grid.merge_right(origin));
    assert!(grid.merge_right(origin));
    assert!(grid.merge_down(origin));

    let master = grid.cell(origin).unwrap();
    assert_eq!((master.row_span, master.col_span), (2, 3));

    for hidden in [coord(0, 1), coord(0, 2), coord(1, 0), coord(1, 1), coord(1, 2)] {
        let cell = grid.cell(hidden).unwrap();
        assert!(cell.hidden, "{} should be hidden", hidden);
        assert_eq!(cell.master, Some(origin));
    }

    let sheet = grid.serialize();
    assert_eq!(sheet.cells.len(), 48 - 5);
    assert_eq!(
        sheet.cells[0],
        SheetCell {
            row_span: 2,
            col_span: 3,
            ..Default::default()
        }
    );
    assert!(sheet
        .cells
        .iter()
        .all(|entry| !(entry.r < 2 && entry.c < 3) || (entry.r, entry.c) == (0, 0)));
    grid.validate().unwrap();
}

/// Loading a stored 3x3 sheet with a 2x2 region at A1
#[test]
fn test_hydrate_stored_sheet() {
    let sheet = SerializedSheet {
        rows: 3,
        cols: 3,
        cells: vec![SheetCell {
            row_span: 2,
            col_span: 2,
            content: "X".into(),
            ..Default::default()
        }],
    };

    let grid = Grid::hydrate(&sheet);

    assert_eq!(grid.cell(coord(0, 0)).unwrap().content, "X");
    for hidden in [coord(0, 1), coord(1, 0), coord(1, 1)] {
        assert_eq!(grid.cell(hidden).unwrap().master, Some(coord(0, 0)));
    }
    for free in [coord(0, 2), coord(1, 2), coord(2, 0), coord(2, 1), coord(2, 2)] {
        assert_eq!(grid.cell(free).unwrap(), &Cell::default());
    }
}

#[test]
fn test_remove_row_on_single_row_grid() {
    let mut grid = Grid::new(1, 6).unwrap();
    assert!(!grid.remove_row());
    assert_eq!(grid.rows(), 1);
}

#[test]
fn test_merge_right_then_split_restores_singletons() {
    let mut grid = Grid::default();
    grid.set_content(coord(4, 1), "absorbed");

    assert!(grid.merge_right(coord(4, 0)));
    assert!(grid.split(coord(4, 0)));

    for position in [coord(4, 0), coord(4, 1)] {
        let cell = grid.cell(position).unwrap();
        assert_eq!((cell.row_span, cell.col_span), (1, 1));
        assert!(!cell.hidden);
    }
    // Content of absorbed cells is gone for good
    assert_eq!(grid.cell(coord(4, 1)).unwrap().content, "");
}

#[test]
fn test_merge_stops_at_grid_edges() {
    let mut grid = Grid::default();
    let origin = coord(0, 0);

    while grid.merge_right(origin) {}
    while grid.merge_down(origin) {}

    let master = grid.cell(origin).unwrap();
    assert_eq!((master.row_span, master.col_span), (8, 6));
    assert!(!grid.can_merge_right(origin));
    assert!(!grid.can_merge_down(origin));
    assert_eq!(grid.serialize().cells.len(), 1);
}

#[test]
fn test_grow_after_add_column() {
    let mut grid = Grid::new(2, 2).unwrap();
    let origin = coord(0, 0);
    assert!(grid.merge_right(origin));
    assert!(!grid.can_merge_right(origin));

    assert!(grid.add_column());

    assert!(grid.can_merge_right(origin));
    assert!(grid.merge_right(origin));
    assert_eq!(grid.cell(origin).unwrap().col_span, 3);
    grid.validate().unwrap();
}
