//! Error types for cell operations.

use thiserror::Error;

use super::CellId;

/// Errors raised while writing or reading a cell.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CellError {
    #[error("Invalid Cell Id provided: {0}")]
    InvalidIdentifier(String),

    #[error("Reference Error: {0} refers to itself")]
    SelfReference(CellId),

    #[error("Invalid Cell Id: referenced cell {0} doesn't exist")]
    UnknownReference(CellId),

    #[error("Reference Error: circular dependency found at {0}")]
    CircularDependency(CellId),

    #[error("Error evaluating expression: {0}")]
    ExpressionEvaluation(String),

    #[error("Invalid Cell Id: cell {0} doesn't exist")]
    CellNotFound(CellId),
}

/// How an error is reported to the caller of the cell operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is malformed.
    ClientInput,
    NotFound,
    /// The stored graph cannot be evaluated in its current state.
    Conflict,
    Unprocessable,
}

impl ErrorKind {
    /// HTTP-style status code for the kind.
    pub fn status(self) -> u16 {
        match self {
            ErrorKind::ClientInput => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Unprocessable => 422,
        }
    }
}

impl CellError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CellError::InvalidIdentifier(_) | CellError::SelfReference(_) => ErrorKind::ClientInput,
            CellError::UnknownReference(_) | CellError::CellNotFound(_) => ErrorKind::NotFound,
            CellError::CircularDependency(_) => ErrorKind::Conflict,
            CellError::ExpressionEvaluation(_) => ErrorKind::Unprocessable,
        }
    }
}

pub type CellResult<T> = std::result::Result<T, CellError>;
