//! Table range extractor: scan, segment, compose

use crate::axis::Occupancy;
use crate::cell::CellValue;
use crate::compose::Composer;
use crate::error::Result;
use crate::grid::Grid;
use crate::options::{Axis, DetectOptions};
use crate::range::TableRange;
use crate::view::TableView;

/// One detected table
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTable {
    /// Where the table sits in the grid
    pub range: TableRange,
    /// Copy of the table's cells, when materialization was requested
    pub data: Option<Grid>,
}

/// Runs detection passes with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct TableRangeExtractor {
    options: DetectOptions,
}

impl TableRangeExtractor {
    /// Create an extractor
    pub fn new(options: DetectOptions) -> Self {
        Self { options }
    }

    /// The options used for every pass
    pub fn options(&self) -> &DetectOptions {
        &self.options
    }

    /// Find every table range in the grid
    ///
    /// Ranges are disjoint and ordered by `(row_start, col_start)`. An empty
    /// grid yields no ranges; a grid with no blank row or column anywhere
    /// yields one range covering all of it.
    pub fn detect(&self, grid: &Grid) -> Vec<TableRange> {
        // Scan
        let occupancy = Occupancy::scan(grid, &self.options.emptiness);
        tracing::debug!(
            rows = grid.row_count(),
            cols = grid.col_count(),
            occupied = occupancy.total(),
            "scanned grid"
        );
        if occupancy.total() == 0 {
            return Vec::new();
        }

        // Segment
        let composer = Composer::new(&occupancy, &self.options);
        let row_bands = composer.global_bands(Axis::Rows);
        let col_bands = composer.global_bands(Axis::Cols);
        tracing::debug!(
            row_bands = row_bands.len(),
            col_bands = col_bands.len(),
            "segmented grid"
        );

        // Compose
        let mut ranges = composer.compose(&row_bands, &col_bands);
        let before = ranges.len();
        ranges.retain(|range| range.has_min_size(self.options.min_rows, self.options.min_cols));
        if ranges.len() < before {
            tracing::debug!(
                dropped = before - ranges.len(),
                min_rows = self.options.min_rows,
                min_cols = self.options.min_cols,
                "dropped ranges below minimum size"
            );
        }
        tracing::debug!(tables = ranges.len(), "detection complete");
        ranges
    }

    /// Detect tables and, if the options ask for it, copy each one out
    pub fn extract(&self, grid: &Grid) -> Vec<ExtractedTable> {
        self.detect(grid)
            .into_iter()
            .map(|range| ExtractedTable {
                range,
                data: self
                    .options
                    .materialize
                    .then(|| TableView::new(grid, range).to_grid()),
            })
            .collect()
    }
}

/// Find every table range in the grid
///
/// ```
/// use gridtables_core::{find_table_ranges, DetectOptions, Grid, TableRange};
///
/// let grid = Grid::from_rows(vec![
///     vec!["a", "b", "", ""],
///     vec!["1", "2", "", "x"],
///     vec!["", "", "", "y"],
/// ])
/// .unwrap();
///
/// let ranges = find_table_ranges(&grid, &DetectOptions::default());
/// assert_eq!(
///     ranges,
///     vec![
///         TableRange::new(0, 2, 0, 2).unwrap(),
///         TableRange::new(1, 3, 3, 4).unwrap(),
///     ]
/// );
/// ```
pub fn find_table_ranges(grid: &Grid, options: &DetectOptions) -> Vec<TableRange> {
    TableRangeExtractor::new(options.clone()).detect(grid)
}

/// Find every table and optionally copy each one out (see [`DetectOptions::materialize`])
pub fn extract_tables(grid: &Grid, options: &DetectOptions) -> Vec<ExtractedTable> {
    TableRangeExtractor::new(options.clone()).extract(grid)
}

/// Find table ranges in plain rows of values
///
/// Rows must all have the same length; otherwise this fails with
/// [`Error::ShapeMismatch`](crate::Error::ShapeMismatch) and nothing is scanned.
pub fn find_table_ranges_in_rows<I, R, V>(rows: I, options: &DetectOptions) -> Result<Vec<TableRange>>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = V>,
    V: Into<CellValue>,
{
    let grid = Grid::from_rows(rows)?;
    Ok(find_table_ranges(&grid, options))
}
