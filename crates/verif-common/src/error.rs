//! Error types for the shared verification types.

use thiserror::Error;

/// Result type alias using CommonError.
pub type CommonResult<T> = Result<T, CommonError>;

/// Errors raised by the shared collaborators.
#[derive(Debug, Error)]
pub enum CommonError {
    #[error("Not a number: '{0}'")]
    InvalidNumber(String),

    #[error("Not a YYYYMMDD date: {0}")]
    InvalidDate(i64),
}
