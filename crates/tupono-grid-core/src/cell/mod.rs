//! Cell-related types
//!
//! This module contains:
//! - [`Cell`] - One grid position, either a master or a hidden member of a region
//! - [`CellCoord`] - A position in the grid (e.g., "B3")
//! - [`Region`] - A rectangle of positions covered by one master

mod address;
mod data;

pub use address::{CellCoord, Region, RegionCells};
pub use data::Cell;
