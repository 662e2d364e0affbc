//! Typed failures raised by the extraction and export pipeline.
//!
//! Structural problems in the pasted HTML surface as [`ParseError`]; everything
//! the user has to act on during an export is an [`ExportError`]. Command
//! handlers wrap both in `anyhow` context before they reach `main`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("document has no <{0}> section")]
    MissingSection(&'static str),
    #[error("document header contains no field cells")]
    NoHeaderCells,
    #[error("header cell {index} has an unreadable '{attribute}' attribute: {reason}")]
    Tooltip {
        index: usize,
        attribute: String,
        reason: String,
    },
    #[error("invalid selector '{0}'")]
    Selector(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("input file {0:?} not found")]
    InputMissing(PathBuf),
    #[error("malformed input {path:?}: {reason}")]
    InputMalformed { path: PathBuf, reason: String },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("nothing to export: none of the selected fields exist in the document")]
    SelectionEmpty,
    #[error("cannot sum column '{column}' for student {student}: '{value}' is not a whole number")]
    Fold {
        column: String,
        student: usize,
        value: String,
    },
    #[error("cannot sum column '{column}' for student {student}: the total is too large")]
    FoldOverflow { column: String, student: usize },
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("template '{0}' is not defined in the configuration")]
    UnknownTemplate(String),
}

impl ExportError {
    /// Process exit code reported by the binary for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExportError::SelectionEmpty => 2,
            _ => 1,
        }
    }
}
