//! Sheet writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::JsonResult;
use crate::options::SheetWriteOptions;
use tupono_grid_core::{Grid, SerializedSheet};

/// JSON sheet writer
pub struct SheetWriter;

impl SheetWriter {
    /// Write a grid to a sheet file
    pub fn write_file<P: AsRef<Path>>(
        grid: &Grid,
        path: P,
        options: &SheetWriteOptions,
    ) -> JsonResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write(grid, &mut writer, options)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a grid to a writer
    pub fn write<W: Write>(grid: &Grid, writer: W, options: &SheetWriteOptions) -> JsonResult<()> {
        Self::write_sheet(&grid.serialize(), writer, options)
    }

    /// Write the transport form to a writer
    pub fn write_sheet<W: Write>(
        sheet: &SerializedSheet,
        writer: W,
        options: &SheetWriteOptions,
    ) -> JsonResult<()> {
        if options.pretty {
            serde_json::to_writer_pretty(writer, sheet)?;
        } else {
            serde_json::to_writer(writer, sheet)?;
        }
        Ok(())
    }

    /// Serialize a grid to a JSON string
    pub fn to_string(grid: &Grid, options: &SheetWriteOptions) -> JsonResult<String> {
        let sheet = grid.serialize();
        let json = if options.pretty {
            serde_json::to_string_pretty(&sheet)?
        } else {
            serde_json::to_string(&sheet)?
        };
        Ok(json)
    }

    /// Serialize a grid to a JSON value, e.g. to embed under a `sheet` field
    pub fn to_value(grid: &Grid) -> JsonResult<serde_json::Value> {
        Ok(serde_json::to_value(grid.serialize())?)
    }
}
