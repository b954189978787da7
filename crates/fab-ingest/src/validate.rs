//! Whole-file field-count validation.
//!
//! Conversion never starts on a file that has not passed this check: a
//! single malformed row aborts the file with the exact line number.

use std::io::Read;
use std::path::Path;

use fab_model::FileLayout;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::reader::RecordReader;

/// Checks that every data row splits into the expected field count.
#[derive(Debug, Clone, Copy)]
pub struct LineValidator {
    layout: FileLayout,
}

impl LineValidator {
    pub fn new(layout: FileLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> FileLayout {
        self.layout
    }

    /// Validates the file at `path` and returns its row count, header
    /// included.
    pub fn validate_path(&self, path: &Path) -> Result<usize> {
        let reader = RecordReader::open(path, self.layout)?;
        self.validate_records(reader)
    }

    /// Validates any reader; `source` names it in errors.
    pub fn validate_reader<R: Read>(&self, reader: R, source: &Path) -> Result<usize> {
        self.validate_records(RecordReader::from_reader(reader, self.layout, source))
    }

    fn validate_records<R: Read>(&self, mut records: RecordReader<R>) -> Result<usize> {
        let mut row_count = 0usize;
        while let Some(record) = records.next_record()? {
            row_count += 1;
            if self.layout.skip_header && record.index == 0 {
                continue;
            }
            if record.len() != self.layout.field_count {
                return Err(IngestError::FieldCount {
                    path: records.source().to_path_buf(),
                    line: record.line,
                    expected: self.layout.field_count,
                    actual: record.len(),
                });
            }
        }
        debug!(
            source = %records.source().display(),
            row_count,
            "field count validation passed"
        );
        Ok(row_count)
    }
}
