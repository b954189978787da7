//! Bulk catalog rebuild from a tab-delimited stock dump.
//!
//! The dump has seven columns: part number, name, category, package, pad
//! count, brand and stock class. Every line is validated before anything
//! is deleted, so a malformed dump leaves the existing catalog untouched.

use std::path::{Path, PathBuf};

use fab_ingest::{LineValidator, RecordReader};
use fab_model::{FileLayout, IMPORT_PROGRESS_INTERVAL};
use rusqlite::{Connection, Transaction, params};
use tracing::{debug, info, info_span, warn};

use crate::error::{CatalogError, Result};
use crate::sqlite::{BUSY_TIMEOUT, PART_TABLE, open_read_only};

/// First field of the dump's header row.
pub const HEADER_TOKEN: &str = "元件编号";
/// Stock class value marking standard (basic) inventory.
pub const STANDARD_STOCK_TOKEN: &str = "基础库";

pub const DUMP_LAYOUT: FileLayout = FileLayout {
    delimiter: b'\t',
    field_count: 7,
    skip_header: false,
    quoting: false,
};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS partList (
    partNumber TEXT PRIMARY KEY UNIQUE NOT NULL,
    name VARCHAR,
    type VARCHAR,
    package VARCHAR,
    padCount INTEGER,
    brand VARCHAR,
    isStanardStock BOOLEAN DEFAULT (0)
);
CREATE INDEX IF NOT EXISTS name ON partList (name);
CREATE INDEX IF NOT EXISTS name_package ON partList (name, package);
CREATE INDEX IF NOT EXISTS name_type ON partList (name, type);
";

const INSERT_SQL: &str = "INSERT INTO partList (partNumber, name, type, package, padCount, brand, isStanardStock)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

/// Import progress, in dump lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportProgress {
    pub processed: usize,
    pub total: usize,
}

impl ImportProgress {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let pct = self.processed.saturating_mul(100) / self.total;
        pct.min(100) as u8
    }
}

/// A dump row the database refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub line: usize,
    pub part_number: String,
    pub reason: String,
}

/// Result of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Lines in the dump, header included.
    pub lines: usize,
    /// Records created.
    pub records: usize,
    pub header_skipped: bool,
    /// Rows removed before the import.
    pub replaced: usize,
    pub rejected: Vec<RejectedRow>,
}

/// Size and content of a catalog file.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub row_count: i64,
}

impl CatalogInfo {
    pub fn size_mib(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Creates the part table and its indexes when missing.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Rebuilds the catalog at `catalog` from `dump`.
pub fn import_part_list(catalog: &Path, dump: &Path) -> Result<ImportSummary> {
    import_part_list_with_progress(catalog, dump, |_| {})
}

/// Like [`import_part_list`], reporting progress every
/// [`IMPORT_PROGRESS_INTERVAL`] lines.
pub fn import_part_list_with_progress(
    catalog: &Path,
    dump: &Path,
    mut on_progress: impl FnMut(ImportProgress),
) -> Result<ImportSummary> {
    let span = info_span!("catalog_import", dump = %dump.display());
    let _guard = span.enter();

    let lines = LineValidator::new(DUMP_LAYOUT).validate_path(dump)?;
    info!(lines, "importing catalog dump");

    let mut conn = Connection::open(catalog).map_err(|source| CatalogError::Open {
        path: catalog.to_path_buf(),
        source,
    })?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    create_schema(&conn)?;

    conn.pragma_update(None, "synchronous", "OFF")?;
    let outcome = conn
        .transaction()
        .map_err(CatalogError::from)
        .and_then(|tx| load_dump(tx, dump, lines, &mut on_progress));
    let restored = conn.pragma_update(None, "synchronous", "ON");

    let summary = outcome?;
    restored?;
    info!(
        records = summary.records,
        rejected = summary.rejected.len(),
        "{} records created",
        summary.records
    );
    Ok(summary)
}

fn load_dump(
    tx: Transaction<'_>,
    dump: &Path,
    lines: usize,
    on_progress: &mut impl FnMut(ImportProgress),
) -> Result<ImportSummary> {
    let mut summary = ImportSummary {
        lines,
        replaced: tx.execute("DELETE FROM partList", [])?,
        ..ImportSummary::default()
    };
    debug!(replaced = summary.replaced, "cleared part table");

    {
        let mut insert = tx.prepare(INSERT_SQL)?;
        let mut reader = RecordReader::open(dump, DUMP_LAYOUT)?;
        while let Some(record) = reader.next_record()? {
            if record.index % IMPORT_PROGRESS_INTERVAL == 0 {
                on_progress(ImportProgress {
                    processed: record.index,
                    total: lines,
                });
            }

            let part_number = record.field(0).trim();
            if part_number == HEADER_TOKEN {
                debug!(line = record.line, "header found, line skipped");
                summary.header_skipped = true;
                continue;
            }

            let pad_count = record.field(4).trim().parse::<i64>().ok();
            let is_standard_stock = record.field(6).trim() == STANDARD_STOCK_TOKEN;
            let inserted = insert.execute(params![
                part_number,
                record.field(1).trim(),
                record.field(2).trim(),
                record.field(3).trim(),
                pad_count,
                record.field(5).trim(),
                is_standard_stock,
            ]);
            match inserted {
                Ok(_) => summary.records += 1,
                Err(err) => {
                    warn!(line = record.line, part_number, error = %err, "row rejected");
                    summary.rejected.push(RejectedRow {
                        line: record.line,
                        part_number: part_number.to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    tx.commit()?;
    on_progress(ImportProgress {
        processed: lines,
        total: lines,
    });
    Ok(summary)
}

/// Reports the file size and row count of an existing catalog.
pub fn catalog_info(path: &Path) -> Result<CatalogInfo> {
    let conn = open_read_only(path, PART_TABLE)?;
    let size_bytes = std::fs::metadata(path)
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    let row_count = conn.query_row("SELECT COUNT(*) FROM partList", [], |row| row.get(0))?;
    Ok(CatalogInfo {
        path: path.to_path_buf(),
        size_bytes,
        row_count,
    })
}
