//! Ingestion of KiCad position and BOM exports.
//!
//! - **validate**: whole-file field-count check run before any conversion
//! - **reader**: sequential record reading with line numbers
//! - **rows**: typed position/BOM rows from validated records

pub mod error;
pub mod reader;
pub mod rows;
pub mod validate;

pub use error::{IngestError, Result};
pub use reader::{RecordReader, SourceRecord};
pub use rows::{clean_field, parse_bom_row, parse_position_row};
pub use validate::LineValidator;
