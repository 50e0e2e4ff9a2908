//! Sheet reader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{JsonError, JsonResult};
use crate::options::SheetReadOptions;
use tupono_grid_core::{Grid, SerializedSheet};

/// JSON sheet reader
pub struct SheetReader;

impl SheetReader {
    /// Read a sheet file into a grid
    pub fn read_file<P: AsRef<Path>>(path: P, options: &SheetReadOptions) -> JsonResult<Grid> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file), options)
    }

    /// Read a sheet from a reader into a grid
    pub fn read<R: Read>(reader: R, options: &SheetReadOptions) -> JsonResult<Grid> {
        let sheet = Self::read_sheet(reader)?;
        Self::hydrate(&sheet, options)
    }

    /// Read a sheet from a JSON string into a grid
    pub fn read_str(json: &str, options: &SheetReadOptions) -> JsonResult<Grid> {
        let sheet: SerializedSheet = serde_json::from_str(json)?;
        Self::hydrate(&sheet, options)
    }

    /// Read the transport form without building a grid
    pub fn read_sheet<R: Read>(reader: R) -> JsonResult<SerializedSheet> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Build a grid from an already-decoded JSON value
    pub fn from_value(value: serde_json::Value, options: &SheetReadOptions) -> JsonResult<Grid> {
        let sheet: SerializedSheet = serde_json::from_value(value)?;
        Self::hydrate(&sheet, options)
    }

    fn hydrate(sheet: &SerializedSheet, options: &SheetReadOptions) -> JsonResult<Grid> {
        let (grid, report) = Grid::hydrate_report(sheet);

        if options.strict {
            if report.clamped_dimensions {
                return Err(JsonError::Dimensions {
                    rows: sheet.rows,
                    cols: sheet.cols,
                });
            }
            if let Some(first) = report.skipped.first() {
                return Err(JsonError::SkippedEntries {
                    count: report.skipped.len(),
                    first_index: first.index,
                    reason: first.reason.to_string(),
                });
            }
        } else if !report.is_clean() {
            tracing::debug!(
                "Loaded {}x{} sheet with {} skipped entries",
                grid.rows(),
                grid.cols(),
                report.skipped.len()
            );
        }

        Ok(grid)
    }
}
