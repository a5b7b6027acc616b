//! Error types for loading verification inputs.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for input loading operations.
pub type InputResult<T> = Result<T, InputError>;

/// Fatal errors. A load that hits any of these returns no snapshot.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("File '{}' does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("File '{}' is not a valid input file", .0.display())]
    UnrecognizedFormat(PathBuf),

    #[error("Could not parse {}: Missing column '{column}'", .path.display())]
    MissingRequiredColumn { path: PathBuf, column: String },

    #[error("Incorrect number of columns (expecting {expected}, found {found}) on line {line}: '{row}'")]
    RowArityMismatch {
        line: usize,
        expected: usize,
        found: usize,
        row: String,
    },

    #[error("Invalid value '{value}' in column '{column}' on line {line}")]
    InvalidValue {
        line: usize,
        column: String,
        value: String,
    },

    /// Missing required variable or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Stored data does not fit the canonical layout
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
