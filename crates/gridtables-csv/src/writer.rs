//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvWriteOptions;
use gridtables_core::{CellValue, Grid, TableView};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write one table to a CSV file
    pub fn write_view_file<P: AsRef<Path>>(
        view: &TableView<'_>,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write_view(view, file, options)
    }

    /// Write one table to a writer
    ///
    /// Only the cells inside the view's range are written, one record per row.
    pub fn write_view<W: Write>(
        view: &TableView<'_>,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        Self::write_rows(view.rows(), writer, options)?;
        tracing::debug!(
            range = %view.address(),
            rows = view.row_count(),
            cols = view.col_count(),
            "wrote table"
        );
        Ok(())
    }

    /// Write a whole grid to a CSV file
    pub fn write_grid_file<P: AsRef<Path>>(
        grid: &Grid,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write_grid(grid, file, options)
    }

    /// Write a whole grid to a writer
    pub fn write_grid<W: Write>(grid: &Grid, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        Self::write_rows(grid.rows(), writer, options)
    }

    fn write_rows<'a, I, W>(rows: I, writer: W, options: &CsvWriteOptions) -> CsvResult<()>
    where
        I: Iterator<Item = &'a [CellValue]>,
        W: Write,
    {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(options.line_terminator.to_csv())
            .flexible(true)
            .from_writer(writer);

        for row in rows {
            csv_writer.write_record(row.iter().map(|value| value.to_string()))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
