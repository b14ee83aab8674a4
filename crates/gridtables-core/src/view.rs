//! Borrowed views of one table inside a grid

use crate::cell::{CellAddress, CellValue};
use crate::grid::Grid;
use crate::range::TableRange;

/// A reference to one table range in a grid
///
/// Nothing is copied until [`TableView::to_grid`] is called.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    grid: &'a Grid,
    range: TableRange,
}

impl<'a> TableView<'a> {
    /// Create a new view; callers go through [`Grid::view`], which checks bounds
    pub(crate) fn new(grid: &'a Grid, range: TableRange) -> Self {
        Self { grid, range }
    }

    /// Get the table range
    pub fn range(&self) -> &TableRange {
        &self.range
    }

    /// Sheet position of the table's top-left cell
    pub fn origin(&self) -> CellAddress {
        CellAddress::new(self.range.row_start, self.range.col_start).offset(self.grid.origin())
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.range.row_count()
    }

    /// Get the number of columns
    pub fn col_count(&self) -> usize {
        self.range.col_count()
    }

    /// Get a cell value by position relative to the table
    pub fn value(&self, row: usize, col: usize) -> Option<&'a CellValue> {
        if row >= self.row_count() || col >= self.col_count() {
            return None;
        }
        self.grid
            .get(self.range.row_start + row, self.range.col_start + col)
    }

    /// Iterate over rows of the table
    pub fn rows(&self) -> impl Iterator<Item = &'a [CellValue]> + 'a {
        let range = self.range;
        let grid = self.grid;
        range.rows().indices().filter_map(move |row| {
            grid.row(row)
                .map(|cells| &cells[range.col_start..range.col_end])
        })
    }

    /// Get the A1-style reference of this table in sheet coordinates
    pub fn address(&self) -> String {
        self.range.to_a1_string(self.grid.origin())
    }

    /// Copy the table into its own grid
    pub fn to_grid(&self) -> Grid {
        Grid::from_rows_padded(self.rows().map(|row| row.iter().cloned())).with_origin(self.origin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Grid {
        Grid::from_rows(vec![
            vec![CellValue::from("a"), CellValue::from("b"), CellValue::Empty],
            vec![CellValue::from(0), CellValue::from(10.0), CellValue::Empty],
            vec![CellValue::Empty, CellValue::Empty, CellValue::from(-4)],
        ])
        .unwrap()
    }

    #[test]
    fn test_view_values() {
        let grid = sample();
        let view = grid.view(&TableRange::new(0, 2, 0, 2).unwrap()).unwrap();
        assert_eq!(view.row_count(), 2);
        assert_eq!(view.col_count(), 2);
        assert_eq!(view.value(1, 1), Some(&CellValue::Number(10.0)));
        assert_eq!(view.value(2, 0), None);
        assert_eq!(view.address(), "A1:B2");
    }

    #[test]
    fn test_view_rows() {
        let grid = sample();
        let view = grid.view(&TableRange::new(1, 3, 1, 3).unwrap()).unwrap();
        let rows: Vec<Vec<String>> = view
            .rows()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();
        assert_eq!(rows, vec![vec!["10", ""], vec!["", "-4"]]);
    }

    #[test]
    fn test_to_grid() {
        let grid = sample().with_origin(CellAddress::new(3, 0));
        let view = grid.view(&TableRange::new(2, 3, 2, 3).unwrap()).unwrap();
        let owned = view.to_grid();
        assert_eq!(owned.row_count(), 1);
        assert_eq!(owned.get(0, 0), Some(&CellValue::Number(-4.0)));
        assert_eq!(owned.origin(), CellAddress::new(5, 2));
    }
}
