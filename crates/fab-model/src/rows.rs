//! Source rows and the fixed layouts of the two input file kinds.

use serde::Serialize;
use std::fmt;

/// The two CAD exports the converter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Pick-and-place position file.
    Position,
    /// Bill of materials.
    Bom,
}

impl FileKind {
    /// Input layout for this kind.
    pub fn layout(self) -> FileLayout {
        match self {
            FileKind::Position => FileLayout {
                delimiter: b',',
                field_count: 7,
                skip_header: false,
                quoting: true,
            },
            FileKind::Bom => FileLayout {
                delimiter: b';',
                field_count: 8,
                skip_header: true,
                quoting: true,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Position => "position",
            FileKind::Bom => "BOM",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Delimiter and field count every data row must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileLayout {
    pub delimiter: u8,
    pub field_count: usize,
    /// Exempt the first row from the field-count check.
    ///
    /// Position exports carry a header with the same field count as data
    /// rows, so only the BOM header is exempted.
    pub skip_header: bool,
    /// Honour double-quoted fields. Catalog dumps are read unquoted.
    pub quoting: bool,
}

/// One data row of a position file.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRow {
    pub reference: String,
    pub value: String,
    pub package: String,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub side: String,
}

/// One data row of a BOM file. Unused positional fields are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomRow {
    pub reference: String,
    pub package: String,
    pub quantity: i64,
    pub value: String,
}
