//! Table ranges: rectangular regions of a grid holding one table

use std::cmp::Ordering;
use std::fmt;

use crate::cell::CellAddress;
use crate::error::{Error, Result};
use crate::segment::Band;

/// A rectangle of a grid identified as one logical table
///
/// All bounds are half-open: rows `row_start..row_end`, columns
/// `col_start..col_end`, in coordinates relative to the grid's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableRange {
    /// First row of the table
    pub row_start: usize,
    /// One past the last row of the table
    pub row_end: usize,
    /// First column of the table
    pub col_start: usize,
    /// One past the last column of the table
    pub col_end: usize,
}

impl TableRange {
    /// Create a new table range, rejecting empty or inverted bounds
    pub fn new(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Result<Self> {
        if row_start >= row_end || col_start >= col_end {
            return Err(Error::InvalidRange(format!(
                "rows {}..{}, cols {}..{}",
                row_start, row_end, col_start, col_end
            )));
        }
        Ok(Self {
            row_start,
            row_end,
            col_start,
            col_end,
        })
    }

    /// Build a range from a row band and a column band
    pub fn from_bands(rows: Band, cols: Band) -> Self {
        Self {
            row_start: rows.start,
            row_end: rows.end,
            col_start: cols.start,
            col_end: cols.end,
        }
    }

    /// A range covering a whole `rows` x `cols` grid, if it is non-empty
    pub fn full(rows: usize, cols: usize) -> Option<Self> {
        Self::new(0, rows, 0, cols).ok()
    }

    /// The row span as a band
    pub fn rows(&self) -> Band {
        Band::new(self.row_start, self.row_end)
    }

    /// The column span as a band
    pub fn cols(&self) -> Band {
        Band::new(self.col_start, self.col_end)
    }

    /// The position where the table begins: (row, col)
    pub fn start_pos(&self) -> (usize, usize) {
        (self.row_start, self.col_start)
    }

    /// The position where the table stops; that row and column are excluded
    pub fn stop_pos(&self) -> (usize, usize) {
        (self.row_end, self.col_end)
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> usize {
        self.row_end - self.row_start
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> usize {
        self.col_end - self.col_start
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.col_count()
    }

    /// Check if a cell is within this range
    pub fn contains_cell(&self, row: usize, col: usize) -> bool {
        row >= self.row_start && row < self.row_end && col >= self.col_start && col < self.col_end
    }

    /// Check if another range lies entirely within this one
    pub fn contains(&self, other: &TableRange) -> bool {
        other.row_start >= self.row_start
            && other.row_end <= self.row_end
            && other.col_start >= self.col_start
            && other.col_end <= self.col_end
    }

    /// Check if this range overlaps with another
    pub fn overlaps(&self, other: &TableRange) -> bool {
        self.row_start < other.row_end
            && other.row_start < self.row_end
            && self.col_start < other.col_end
            && other.col_start < self.col_end
    }

    /// The smallest range covering both
    pub fn union(&self, other: &TableRange) -> TableRange {
        TableRange {
            row_start: self.row_start.min(other.row_start),
            row_end: self.row_end.max(other.row_end),
            col_start: self.col_start.min(other.col_start),
            col_end: self.col_end.max(other.col_end),
        }
    }

    /// Check whether the range is at least `min_rows` by `min_cols`
    pub fn has_min_size(&self, min_rows: usize, min_cols: usize) -> bool {
        self.row_count() >= min_rows && self.col_count() >= min_cols
    }

    /// Format as an A1 reference in sheet coordinates, given the grid's origin
    ///
    /// ```
    /// use gridtables_core::{CellAddress, TableRange};
    ///
    /// let range = TableRange::new(0, 3, 0, 2).unwrap();
    /// assert_eq!(range.to_a1_string(CellAddress::default()), "A1:B3");
    /// assert_eq!(range.to_a1_string(CellAddress::new(1, 1)), "B2:C4");
    /// ```
    pub fn to_a1_string(&self, origin: CellAddress) -> String {
        let start = CellAddress::new(self.row_start, self.col_start).offset(origin);
        let end = CellAddress::new(self.row_end - 1, self.col_end - 1).offset(origin);
        if start == end {
            start.to_a1_string()
        } else {
            format!("{}:{}", start.to_a1_string(), end.to_a1_string())
        }
    }
}

impl fmt::Display for TableRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.row_start, self.row_end, self.col_start, self.col_end
        )
    }
}

impl Ord for TableRange {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row_start, self.col_start, self.row_end, self.col_end).cmp(&(
            other.row_start,
            other.col_start,
            other.row_end,
            other.col_end,
        ))
    }
}

impl PartialOrd for TableRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
