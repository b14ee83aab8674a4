//! Axis scanner: which rows and columns hold data
//!
//! A detection pass classifies every cell exactly once into an
//! [`Occupancy`] map. The map keeps a summed-area table so that the
//! occupancy of any row or column *within a rectangle* (the "local"
//! occupancy the composer keeps asking for) costs O(1) per line.

use crate::grid::Grid;
use crate::options::{Axis, Emptiness};
use crate::range::TableRange;
use crate::segment::Band;

/// Per-row occupancy of a grid: `true` iff any cell in the row is non-empty
pub fn occupied_rows(grid: &Grid, emptiness: &Emptiness) -> Vec<bool> {
    grid.rows()
        .map(|row| row.iter().any(|value| !emptiness.is_empty(value)))
        .collect()
}

/// Per-column occupancy of a grid: `true` iff any cell in the column is non-empty
pub fn occupied_cols(grid: &Grid, emptiness: &Emptiness) -> Vec<bool> {
    let mut occupied = vec![false; grid.col_count()];
    for row in grid.rows() {
        for (col, value) in row.iter().enumerate() {
            if !occupied[col] && !emptiness.is_empty(value) {
                occupied[col] = true;
            }
        }
    }
    occupied
}

/// Non-empty cells of a grid, with O(1) rectangle counts
#[derive(Debug, Clone)]
pub struct Occupancy {
    rows: usize,
    cols: usize,
    mask: Vec<bool>,
    // (rows + 1) x (cols + 1) prefix sums; integral[r][c] counts cells above-left of (r, c)
    integral: Vec<usize>,
}

impl Occupancy {
    /// Classify every cell of the grid
    pub fn scan(grid: &Grid, emptiness: &Emptiness) -> Self {
        let mask = grid
            .rows()
            .flat_map(|row| row.iter().map(|value| !emptiness.is_empty(value)))
            .collect();
        Self::from_mask(grid.row_count(), grid.col_count(), mask)
    }

    fn from_mask(rows: usize, cols: usize, mask: Vec<bool>) -> Self {
        debug_assert_eq!(mask.len(), rows * cols);

        let stride = cols + 1;
        let mut integral = vec![0usize; (rows + 1) * stride];
        for row in 0..rows {
            let mut row_sum = 0;
            for col in 0..cols {
                row_sum += usize::from(mask[row * cols + col]);
                integral[(row + 1) * stride + col + 1] = integral[row * stride + col + 1] + row_sum;
            }
        }

        Self {
            rows,
            cols,
            mask,
            integral,
        }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn col_count(&self) -> usize {
        self.cols
    }

    /// Whether one cell holds data
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.mask[row * self.cols + col]
    }

    /// Total number of non-empty cells
    pub fn total(&self) -> usize {
        self.integral[self.integral.len() - 1]
    }

    /// Number of non-empty cells inside a rectangle
    pub fn count(&self, range: &TableRange) -> usize {
        self.count_span(range.rows(), range.cols())
    }

    fn count_span(&self, rows: Band, cols: Band) -> usize {
        let stride = self.cols + 1;
        let at = |row: usize, col: usize| self.integral[row * stride + col];
        at(rows.end, cols.end) + at(rows.start, cols.start)
            - at(rows.start, cols.end)
            - at(rows.end, cols.start)
    }

    /// Global occupancy of every row or every column
    pub fn occupied(&self, axis: Axis) -> Vec<bool> {
        match TableRange::full(self.rows, self.cols) {
            Some(full) => self.local(axis, &full),
            None => match axis {
                Axis::Rows => vec![false; self.rows],
                Axis::Cols => vec![false; self.cols],
            },
        }
    }

    /// Occupancy of each line along `axis`, restricted to the rectangle
    ///
    /// For `Axis::Rows` the result has one entry per row of `range`, true iff
    /// that row holds data somewhere inside the range's column span.
    pub fn local(&self, axis: Axis, range: &TableRange) -> Vec<bool> {
        match axis {
            Axis::Rows => range
                .rows()
                .indices()
                .map(|row| self.count_span(Band::new(row, row + 1), range.cols()) > 0)
                .collect(),
            Axis::Cols => range
                .cols()
                .indices()
                .map(|col| self.count_span(range.rows(), Band::new(col, col + 1)) > 0)
                .collect(),
        }
    }

    /// Shrink a rectangle to the bounding box of the data inside it
    pub fn trim(&self, range: &TableRange) -> Option<TableRange> {
        if self.count(range) == 0 {
            return None;
        }

        let rows = self.local(Axis::Rows, range);
        let cols = self.local(Axis::Cols, range);
        let first = |v: &[bool]| v.iter().position(|&b| b);
        let last = |v: &[bool]| v.iter().rposition(|&b| b);

        Some(TableRange {
            row_start: range.row_start + first(&rows)?,
            row_end: range.row_start + last(&rows)? + 1,
            col_start: range.col_start + first(&cols)?,
            col_end: range.col_start + last(&cols)? + 1,
        })
    }
}
