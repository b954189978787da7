//! Error types for export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or validating an export file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Source file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a record failed part way through the file.
    #[error("failed to read {path} near line {line}: {source}")]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: csv::Error,
    },

    /// A row does not split into the expected number of fields.
    #[error("{path}: line {line} invalid, expected {expected} fields, found {actual}")]
    FieldCount {
        path: PathBuf,
        line: usize,
        expected: usize,
        actual: usize,
    },
}

impl IngestError {
    /// Line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            IngestError::Open { .. } => None,
            IngestError::Read { line, .. } | IngestError::FieldCount { line, .. } => Some(*line),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
