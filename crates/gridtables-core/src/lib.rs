//! # gridtables-core
//!
//! Finds the separate tables that people pack side by side and one above
//! another into a single sheet.
//!
//! Given a [`Grid`] of cells, detection returns the [`TableRange`]s that each
//! hold exactly one table, leaving blank margins out:
//! - [`Grid`] - Read-only rectangular grid of [`CellValue`]s
//! - [`axis`] - Which rows and columns hold data
//! - [`segment`] - Runs of occupied rows/columns ([`Band`]s)
//! - [`compose`] - Refines bands into table rectangles
//! - [`TableRangeExtractor`] - Drives a whole detection pass
//!
//! ## Example
//!
//! ```rust
//! use gridtables_core::{find_table_ranges, DetectOptions, Grid, TableRange};
//!
//! // Two tables side by side over a third, wider one
//! let grid = Grid::from_rows(vec![
//!     vec!["id", "name", "", "id", "qty"],
//!     vec!["1", "bolt", "", "1", "40"],
//!     vec!["2", "nut", "", "2", "15"],
//!     vec!["", "", "", "", ""],
//!     vec!["month", "in", "out", "net", "note"],
//!     vec!["jan", "3", "1", "2", ""],
//!     vec!["feb", "5", "2", "3", "late"],
//! ])
//! .unwrap();
//!
//! let ranges = find_table_ranges(&grid, &DetectOptions::default());
//! assert_eq!(
//!     ranges,
//!     vec![
//!         TableRange::new(0, 3, 0, 2).unwrap(),
//!         TableRange::new(0, 3, 3, 5).unwrap(),
//!         TableRange::new(4, 7, 0, 5).unwrap(),
//!     ]
//! );
//! ```

pub mod axis;
pub mod cell;
pub mod compose;
pub mod error;
pub mod extract;
pub mod grid;
pub mod options;
pub mod range;
pub mod segment;
pub mod view;

// Re-exports for convenience
pub use axis::{occupied_cols, occupied_rows, Occupancy};
pub use cell::{CellAddress, CellValue, SharedString, StringPool};
pub use compose::{compose, resolve_overlaps, Composer};
pub use error::{Error, Result};
pub use extract::{
    extract_tables, find_table_ranges, find_table_ranges_in_rows, ExtractedTable,
    TableRangeExtractor,
};
pub use grid::Grid;
pub use options::{Axis, DetectOptions, Emptiness};
pub use range::TableRange;
pub use segment::{find_bands, Band};
pub use view::TableView;
