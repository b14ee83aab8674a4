//! Error type for file-level operations

use std::path::PathBuf;

use thiserror::Error;

/// Result type for gridtables operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from reading, detecting, and writing tables
#[derive(Debug, Error)]
pub enum Error {
    /// Grid or range error
    #[error(transparent)]
    Core(#[from] gridtables_core::Error),

    /// CSV reading or writing failed
    #[error(transparent)]
    Csv(#[from] gridtables_csv::CsvError),

    /// IO error outside of CSV handling
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Walking a directory tree failed
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// The file extension is not one we can read or write
    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
