//! Error types for catalog and rule table access.

use std::path::PathBuf;

use fab_ingest::IngestError;
use thiserror::Error;

/// Errors raised by the SQLite collaborators and the bulk importer.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("database not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("table {table} unavailable in {path}: {source}")]
    MissingTable {
        path: PathBuf,
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("invalid catalog dump: {0}")]
    Dump(#[from] IngestError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_file() {
        let err = CatalogError::NotFound {
            path: PathBuf::from("/tmp/partlist.sqlite3"),
        };
        assert_eq!(err.to_string(), "database not found: /tmp/partlist.sqlite3");
    }
}
