//! # gridtables-csv
//!
//! CSV reader and writer for gridtables.
//!
//! [`CsvReader`] loads delimited text into a [`Grid`](gridtables_core::Grid)
//! ready for detection; [`CsvWriter`] writes one detected table (or a whole
//! grid) back out.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
