//! End-to-end tests for sheet files (build -> write -> read -> verify)

use pretty_assertions::assert_eq;
use tupono_grid_core::{CellCoord, FormatPatch, Grid, HorizontalAlign, VerticalAlign};
use tupono_grid_json::{SheetReadOptions, SheetReader, SheetWriteOptions, SheetWriter};

fn feedback_sheet() -> Grid {
    let mut grid = Grid::default();
    let header = CellCoord::new(0, 0);
    grid.merge_right(header);
    grid.merge_right(header);
    grid.merge_down(header);
    grid.set_content(header, "<b>Engagement feedback</b>");
    grid.set_formatting(
        header,
        &FormatPatch::new()
            .bold(true)
            .align(HorizontalAlign::Center)
            .v_align(VerticalAlign::Middle),
    );

    let note = CellCoord::new(3, 4);
    grid.merge_down(note);
    grid.set_content(note, "Follow up&nbsp;<i>next week</i>");
    grid.add_row();
    grid.add_column();
    grid
}

#[test]
fn test_file_roundtrip() {
    let grid = feedback_sheet();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feedback.json");

    SheetWriter::write_file(&grid, &path, &SheetWriteOptions::pretty()).unwrap();
    let restored = SheetReader::read_file(&path, &SheetReadOptions::strict()).unwrap();

    assert_eq!(restored, grid);
}

#[test]
fn test_string_roundtrip_is_stable() {
    let grid = feedback_sheet();
    let options = SheetWriteOptions::default();

    let first = SheetWriter::to_string(&grid, &options).unwrap();
    let restored = SheetReader::read_str(&first, &SheetReadOptions::default()).unwrap();
    let second = SheetWriter::to_string(&restored, &options).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_value_roundtrip() {
    let grid = feedback_sheet();
    let value = SheetWriter::to_value(&grid).unwrap();
    let restored = SheetReader::from_value(value, &SheetReadOptions::strict()).unwrap();
    assert_eq!(restored, grid);
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = SheetReader::read_file(dir.path().join("missing.json"), &SheetReadOptions::default());
    assert!(matches!(result, Err(tupono_grid_json::JsonError::Io(_))));
}
