//! Error types for gridtables-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridtables-core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A row of the input does not have the same width as the first row
    #[error("Shape mismatch: row {row} has {actual} cells, expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Cell coordinates outside the grid
    #[error("Cell ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A range whose bounds are empty, inverted, or outside the grid
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
