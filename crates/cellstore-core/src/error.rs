//! Error types for cellstore core.

use thiserror::Error;

use cellstore_engine::engine::{CellError, ErrorKind};

/// Errors that can occur in the cellstore application
#[derive(Error, Debug)]
pub enum CellstoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown command: {0}")]
    Command(String),

    #[error(transparent)]
    Cell(#[from] CellError),
}

impl CellstoreError {
    /// HTTP-style status used when the error is reported through the dispatcher.
    pub fn status(&self) -> u16 {
        match self {
            CellstoreError::Cell(err) => err.kind().status(),
            CellstoreError::Command(_) | CellstoreError::Parse { .. } => {
                ErrorKind::ClientInput.status()
            }
            CellstoreError::Io(_) | CellstoreError::Config(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, CellstoreError>;
