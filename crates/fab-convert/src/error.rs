//! Conversion error kinds.
//!
//! Every variant is fatal for the file being converted. Problems that only
//! degrade a single row are reported as
//! [`NormalizationWarning`](fab_model::NormalizationWarning) values instead.

use std::io;
use std::path::PathBuf;

use fab_catalog::CatalogError;
use fab_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// A row split into the wrong number of fields.
    #[error("{path}: line {line} invalid, expected {expected} fields, found {actual}")]
    Structural {
        path: PathBuf,
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("output directory {path} unusable: {reason}")]
    OutputDir { path: PathBuf, reason: String },

    /// The part catalog is missing, cannot be opened or failed a query;
    /// BOM conversion depends on it.
    #[error("part catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },
}

impl ConvertError {
    /// Source line of a structural error.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConvertError::Structural { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl From<IngestError> for ConvertError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::FieldCount {
                path,
                line,
                expected,
                actual,
            } => ConvertError::Structural {
                path,
                line,
                expected,
                actual,
            },
            IngestError::Open { path, source } => ConvertError::Io { path, source },
            IngestError::Read { path, source, .. } => ConvertError::Io {
                path,
                source: io::Error::other(source),
            },
        }
    }
}

impl From<CatalogError> for ConvertError {
    fn from(err: CatalogError) -> Self {
        ConvertError::CatalogUnavailable {
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
