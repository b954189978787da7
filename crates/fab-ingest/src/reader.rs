//! Sequential record reading for delimited exports.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder};
use fab_model::FileLayout;

use crate::error::{IngestError, Result};

/// One delimited row of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    /// 1-based physical line the record starts on.
    pub line: usize,
    /// 0-based record index, counting the header.
    pub index: usize,
    pub fields: Vec<String>,
}

impl SourceRecord {
    /// Returns the field at `idx`, or an empty string past the end.
    pub fn field(&self, idx: usize) -> &str {
        self.fields.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Reads records one at a time from a delimited source.
///
/// Blank lines are skipped; field text is decoded lossily so a stray
/// non-UTF-8 byte never aborts the read.
pub struct RecordReader<R> {
    inner: csv::Reader<R>,
    record: ByteRecord,
    source: PathBuf,
    index: usize,
    last_line: usize,
}

impl RecordReader<File> {
    /// Opens `path` for reading with the given layout's delimiter.
    pub fn open(path: &Path, layout: FileLayout) -> Result<Self> {
        let file = File::open(path).map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(file, layout, path))
    }
}

impl<R: Read> RecordReader<R> {
    /// Wraps any reader; `source` is used in error messages.
    pub fn from_reader(reader: R, layout: FileLayout, source: &Path) -> Self {
        let inner = ReaderBuilder::new()
            .delimiter(layout.delimiter)
            .has_headers(false)
            .flexible(true)
            .quoting(layout.quoting)
            .from_reader(reader);
        Self {
            inner,
            record: ByteRecord::new(),
            source: source.to_path_buf(),
            index: 0,
            last_line: 0,
        }
    }

    /// Path or label this reader was built for.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Reads the next record, or `None` at end of input.
    pub fn next_record(&mut self) -> Result<Option<SourceRecord>> {
        let has_record = self
            .inner
            .read_byte_record(&mut self.record)
            .map_err(|source| IngestError::Read {
                path: self.source.clone(),
                line: source
                    .position()
                    .map_or(self.last_line + 1, |pos| pos.line() as usize),
                source,
            })?;
        if !has_record {
            return Ok(None);
        }
        let line = self
            .record
            .position()
            .map_or(self.last_line + 1, |pos| pos.line() as usize);
        self.last_line = line;
        let fields = self
            .record
            .iter()
            .map(|raw| String::from_utf8_lossy(raw).into_owned())
            .collect();
        let record = SourceRecord {
            line,
            index: self.index,
            fields,
        };
        self.index += 1;
        Ok(Some(record))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<SourceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
