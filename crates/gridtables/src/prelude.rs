//! Prelude module - common imports for gridtables users
//!
//! ```rust
//! use gridtables::prelude::*;
//! ```

pub use crate::{
    // Detection
    extract_tables,
    find_table_ranges,
    DetectOptions,
    Emptiness,
    ExtractedTable,
    TableRangeExtractor,

    // Grid types
    CellAddress,
    CellValue,
    Grid,
    TableRange,
    TableView,

    // I/O types
    CsvReadOptions,
    CsvReader,
    CsvWriteOptions,
    CsvWriter,

    // Error types
    Error,
    Result,

    // Extension traits
    GridExt,
};
