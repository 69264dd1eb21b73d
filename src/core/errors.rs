//! Shared error types for the analysis and report layers

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for habrmeta operations
#[derive(Debug, Error)]
pub enum Error {
    /// A report operation was attempted before any page was opened
    #[error("no active report page; call new_page before writing")]
    NoActivePage,

    /// A cell was attached before the page declared its first row
    #[error("cell for column '{0}' added before any row was declared")]
    CellBeforeRow(String),

    /// Record file could not be loaded or decoded
    #[error("record file {path}: {message}")]
    RecordLoad { path: PathBuf, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Grid file errors
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a record-load error with path context
    pub fn record_load(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::RecordLoad {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
