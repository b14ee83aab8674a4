//! # gridtables
//!
//! Finds the separate tables people pack into a single spreadsheet grid and
//! writes each one out on its own.
//!
//! ## Features
//!
//! - Table range detection over any rectangular grid of cells
//! - CSV/TSV reading into a [`Grid`] and writing of single tables
//! - One-call splitting of a sheet into a CSV file per table
//! - Batch splitting of a directory tree, and merging of split tables
//!   that share a header
//! - `parallel` feature to refine candidate tables on the rayon pool
//!
//! ## Example
//!
//! ```rust
//! use gridtables::prelude::*;
//!
//! let text = "id,name,,id,qty\n1,bolt,,1,40\n\nmonth,in,out\njan,3,1\n";
//! let grid = CsvReader::read(text.as_bytes(), &CsvReadOptions::default()).unwrap();
//!
//! let refs: Vec<String> = find_table_ranges(&grid, &DetectOptions::default())
//!     .iter()
//!     .map(|range| range.to_a1_string(grid.origin()))
//!     .collect();
//! assert_eq!(refs, vec!["A1:B2", "D1:E2", "A4:C5"]);
//! ```

pub mod convert;
pub mod error;
pub mod merge;
pub mod prelude;
pub mod split;

pub use convert::{convert_dir, ConvertOptions, ConvertReport};
pub use error::{Error, Result};
pub use merge::{merge_csv, HeaderMismatch, MergeOptions, MergeReport};
pub use split::{already_converted, split_file, split_grid, table_file_name, SplitOptions, SplitOutcome};

// Re-export core types
pub use gridtables_core::{
    extract_tables, find_table_ranges, find_table_ranges_in_rows, Band, CellAddress, CellValue,
    DetectOptions, Emptiness, ExtractedTable, Grid, TableRange, TableRangeExtractor, TableView,
};

// Lower-level building blocks
pub use gridtables_core::{axis, compose, segment};

// Re-export I/O types
pub use gridtables_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, LineTerminator,
};

use std::path::Path;

/// Extension trait for Grid to add file I/O
pub trait GridExt: Sized {
    /// Open a grid from a file
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Save the grid to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl GridExt for Grid {
    fn open<P: AsRef<Path>>(path: P) -> Result<Grid> {
        let path = path.as_ref();
        let options = read_options_for(path)?;
        Ok(CsvReader::read_file(path, &options)?)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let options = CsvWriteOptions {
            delimiter: read_options_for(path)?.delimiter,
            ..CsvWriteOptions::default()
        };
        Ok(CsvWriter::write_grid_file(self, path, &options)?)
    }
}

/// Detect the tables in a CSV or TSV file
pub fn detect_file<P: AsRef<Path>>(path: P, options: &DetectOptions) -> Result<Vec<TableRange>> {
    let grid = Grid::open(path)?;
    Ok(find_table_ranges(&grid, options))
}

/// Open a grid with explicit read options, or by extension when `None`
pub fn open_grid<P: AsRef<Path>>(path: P, read: Option<&CsvReadOptions>) -> Result<Grid> {
    match read {
        Some(options) => Ok(CsvReader::read_file(path, options)?),
        None => Grid::open(path),
    }
}

/// Whether [`GridExt::open`] knows how to read this file
pub fn is_supported(path: &Path) -> bool {
    read_options_for(path).is_ok()
}

fn read_options_for(path: &Path) -> Result<CsvReadOptions> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("csv") | Some("txt") => Ok(CsvReadOptions::default()),
        Some("tsv") | Some("tab") => Ok(CsvReadOptions::tsv()),
        _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
    }
}
