//! Grid model: a rectangular, read-only array of cell values

use crate::cell::{CellAddress, CellValue};
use crate::error::{Error, Result};
use crate::options::Emptiness;
use crate::range::TableRange;
use crate::view::TableView;

/// A rectangular grid of cells
///
/// Every `(row, col)` in `[0, rows) x [0, cols)` holds a value, possibly
/// [`CellValue::Empty`]. The grid also records its `origin`: where its
/// top-left cell sat in the sheet it was read from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellValue>,
    origin: CellAddress,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellValue::Empty; rows * cols],
            origin: CellAddress::default(),
        }
    }

    /// Build a grid from rows of values
    ///
    /// Every row must be as wide as the first; a ragged row is rejected with
    /// [`Error::ShapeMismatch`] before anything else happens.
    ///
    /// ```
    /// use gridtables_core::{Error, Grid};
    ///
    /// let grid = Grid::from_rows(vec![vec!["a", "b"], vec!["", "d"]]).unwrap();
    /// assert_eq!((grid.row_count(), grid.col_count()), (2, 2));
    ///
    /// let err = Grid::from_rows(vec![vec!["a", "b"], vec!["c"]]).unwrap_err();
    /// assert!(matches!(err, Error::ShapeMismatch { row: 1, expected: 2, actual: 1 }));
    /// ```
    pub fn from_rows<I, R, V>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut cells = Vec::new();
        let mut width: Option<usize> = None;
        let mut row_count = 0;

        for (row_idx, row) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row.into_iter().map(Into::into));
            let actual = cells.len() - before;

            match width {
                None => width = Some(actual),
                Some(expected) if expected != actual => {
                    return Err(Error::ShapeMismatch {
                        row: row_idx,
                        expected,
                        actual,
                    });
                }
                Some(_) => {}
            }
            row_count += 1;
        }

        Ok(Self {
            rows: row_count,
            cols: width.unwrap_or(0),
            cells,
            origin: CellAddress::default(),
        })
    }

    /// Build a grid from rows of values, padding short rows with `Empty`
    ///
    /// Delimited text commonly drops trailing empty fields, so readers of
    /// such sources use this instead of [`Grid::from_rows`].
    pub fn from_rows_padded<I, R, V>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let rows: Vec<Vec<CellValue>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut cells = Vec::with_capacity(rows.len() * cols);
        let row_count = rows.len();
        for mut row in rows {
            row.resize(cols, CellValue::Empty);
            cells.extend(row);
        }

        Self {
            rows: row_count,
            cols,
            cells,
            origin: CellAddress::default(),
        }
    }

    /// Record where the grid's top-left cell sits in its source sheet
    pub fn with_origin(mut self, origin: CellAddress) -> Self {
        self.origin = origin;
        self
    }

    /// The sheet position of the grid's top-left cell
    pub fn origin(&self) -> CellAddress {
        self.origin
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn col_count(&self) -> usize {
        self.cols
    }

    /// Get a cell value
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Check whether a cell is empty under the default [`Emptiness::Blank`] rule
    pub fn is_empty(&self, row: usize, col: usize) -> Result<bool> {
        self.is_empty_with(row, col, &Emptiness::Blank)
    }

    /// Check whether a cell is empty under the given rule
    pub fn is_empty_with(&self, row: usize, col: usize, emptiness: &Emptiness) -> Result<bool> {
        let index = self.index(row, col)?;
        Ok(emptiness.is_empty(&self.cells[index]))
    }

    /// Get one row as a slice
    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        if row < self.rows {
            Some(&self.cells[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> + '_ {
        (0..self.rows).map(move |row| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    /// The range covering the whole grid, or `None` for a grid without cells
    pub fn full_range(&self) -> Option<TableRange> {
        TableRange::full(self.rows, self.cols)
    }

    /// Borrow a window of the grid
    pub fn view(&self, range: &TableRange) -> Result<TableView<'_>> {
        self.check_range(range)?;
        Ok(TableView::new(self, *range))
    }

    /// Copy a range out into its own grid
    ///
    /// The new grid's origin is the range's top-left cell in sheet coordinates.
    pub fn slice(&self, range: &TableRange) -> Result<Grid> {
        Ok(self.view(range)?.to_grid())
    }

    pub(crate) fn check_range(&self, range: &TableRange) -> Result<()> {
        if range.row_end > self.rows || range.col_end > self.cols {
            return Err(Error::InvalidRange(format!(
                "{} exceeds {}x{} grid",
                range, self.rows, self.cols
            )));
        }
        Ok(())
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::CellOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(2, 3);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.col_count(), 3);
        assert!(grid.is_empty(1, 2).unwrap());
        assert_eq!(grid.full_range(), TableRange::full(2, 3));
    }

    #[test]
    fn test_from_rows_shape_mismatch() {
        let err = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]).unwrap_err();
        assert_eq!(
            err,
            Error::ShapeMismatch {
                row: 2,
                expected: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn test_from_rows_empty_input() {
        let grid = Grid::from_rows(Vec::<Vec<f64>>::new()).unwrap();
        assert_eq!((grid.row_count(), grid.col_count()), (0, 0));
        assert_eq!(grid.full_range(), None);
    }

    #[test]
    fn test_from_rows_padded() {
        let grid = Grid::from_rows_padded(vec![vec!["a"], vec!["b", "c", "d"]]);
        assert_eq!(grid.col_count(), 3);
        assert_eq!(grid.get(0, 2), Some(&CellValue::Empty));
        assert_eq!(grid.get(1, 2), Some(&CellValue::from("d")));
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::new(2, 2);
        assert!(matches!(
            grid.is_empty(2, 0),
            Err(Error::CellOutOfBounds { row: 2, col: 0, .. })
        ));
        assert!(grid.is_empty(0, 5).is_err());
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.row(2), None);
    }

    #[test]
    fn test_emptiness_rules() {
        let grid = Grid::from_rows(vec![vec![CellValue::string("  "), CellValue::from(0.0)]]).unwrap();
        assert!(grid.is_empty(0, 0).unwrap());
        assert!(!grid.is_empty_with(0, 0, &Emptiness::Strict).unwrap());
        assert!(!grid.is_empty(0, 1).unwrap());
    }

    #[test]
    fn test_slice_shifts_origin() {
        let grid = Grid::from_rows(vec![
            vec!["a", "b", "c"],
            vec!["d", "e", "f"],
            vec!["g", "h", "i"],
        ])
        .unwrap()
        .with_origin(CellAddress::new(10, 1));

        let range = TableRange::new(1, 3, 1, 3).unwrap();
        let sub = grid.slice(&range).unwrap();
        assert_eq!(sub.origin(), CellAddress::new(11, 2));
        assert_eq!(
            sub,
            Grid::from_rows(vec![vec!["e", "f"], vec!["h", "i"]])
                .unwrap()
                .with_origin(CellAddress::new(11, 2))
        );

        let too_big = TableRange::new(0, 4, 0, 1).unwrap();
        assert!(grid.slice(&too_big).is_err());
    }

    #[test]
    fn test_rows_iterator() {
        let grid = Grid::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[CellValue::from(3), CellValue::from(4)][..]);
    }
}
