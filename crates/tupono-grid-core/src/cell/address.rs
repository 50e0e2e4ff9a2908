//! Cell coordinate and region types

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A grid position, 0-based
///
/// Displays in A1 notation (`CellCoord::new(2, 1)` is `"B3"`), which is also what
/// [`CellCoord::parse`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    /// Row index
    #[cfg_attr(feature = "serde", serde(rename = "r"))]
    pub row: u32,
    /// Column index
    #[cfg_attr(feature = "serde", serde(rename = "c"))]
    pub col: u32,
}

impl CellCoord {
    /// Create a new coordinate
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a coordinate from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use tupono_grid_core::CellCoord;
    ///
    /// let coord = CellCoord::parse("A1").unwrap();
    /// assert_eq!(coord, CellCoord::new(0, 0));
    ///
    /// let coord = CellCoord::parse("c12").unwrap();
    /// assert_eq!(coord, CellCoord::new(11, 2));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        if split == 0 {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let col = Self::letters_to_column(&s[..split])?;

        let row_str = &s[split..];
        if row_str.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        // Rows are 1-based on display
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self { row: row - 1, col })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col as u64 + 1;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u64 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u64 - 'A' as u64 + 1);
            if col > u32::MAX as u64 {
                return Err(Error::InvalidAddress(format!(
                    "column '{}' is too large",
                    letters
                )));
            }
        }

        Ok((col - 1) as u32)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row as u64 + 1)
    }

    /// Create a region from this coordinate to another
    pub fn to(&self, other: CellCoord) -> Region {
        Region::new(*self, other)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellCoord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<(u32, u32)> for CellCoord {
    fn from((row, col): (u32, u32)) -> Self {
        Self::new(row, col)
    }
}

/// A rectangle of grid positions (e.g., "A1:C2"), both corners inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    /// Top-left corner (the master position of a merged region)
    pub start: CellCoord,
    /// Bottom-right corner
    pub end: CellCoord,
}

impl Region {
    /// Create a new region
    pub fn new(start: CellCoord, end: CellCoord) -> Self {
        // Normalize so start is top-left and end is bottom-right
        Self {
            start: CellCoord::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellCoord::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create a region from a top-left corner and its spans
    ///
    /// Spans of zero are treated as one.
    pub fn from_span(start: CellCoord, row_span: u32, col_span: u32) -> Self {
        Self {
            start,
            end: CellCoord::new(
                start.row + row_span.max(1) - 1,
                start.col + col_span.max(1) - 1,
            ),
        }
    }

    /// Create a single-cell region
    pub fn single(coord: CellCoord) -> Self {
        Self {
            start: coord,
            end: coord,
        }
    }

    /// Check if a coordinate is within this region
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row >= self.start.row
            && coord.row <= self.end.row
            && coord.col >= self.start.col
            && coord.col <= self.end.col
    }

    /// Get the number of rows in the region
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the region
    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// Get the total number of positions in the region
    pub fn cell_count(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    /// Whether this region is a single position
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Check if this region overlaps with another
    pub fn overlaps(&self, other: &Region) -> bool {
        self.start.row <= other.end.row
            && self.end.row >= other.start.row
            && self.start.col <= other.end.col
            && self.end.col >= other.start.col
    }

    /// Whether the region lies entirely inside a `rows x cols` grid
    pub fn fits_within(&self, rows: u32, cols: u32) -> bool {
        self.end.row < rows && self.end.col < cols
    }

    /// Iterate over all positions in the region (row by row)
    pub fn cells(&self) -> RegionCells {
        RegionCells {
            region: *self,
            current_row: self.start.row,
            current_col: self.start.col,
            done: false,
        }
    }

    /// Format as A1:C2 string
    pub fn to_a1_string(&self) -> String {
        if self.is_single() {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start.to_a1_string(), self.end.to_a1_string())
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

/// Iterator over positions in a region
pub struct RegionCells {
    region: Region,
    current_row: u32,
    current_col: u32,
    done: bool,
}

impl Iterator for RegionCells {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let coord = CellCoord::new(self.current_row, self.current_col);

        // Move to next position
        if self.current_col < self.region.end.col {
            self.current_col += 1;
        } else if self.current_row < self.region.end.row {
            self.current_col = self.region.start.col;
            self.current_row += 1;
        } else {
            self.done = true;
        }

        Some(coord)
    }
}
