//! Shared data model for converting KiCad exports into factory files.

pub mod catalog;
pub mod error;
pub mod options;
pub mod part;
pub mod report;
pub mod rows;

pub use catalog::{
    CatalogQuery, CategoryKeyword, CompareType, LookupResult, NameMatch, PackageRule, PartRecord,
};
pub use error::{ModelError, Result};
pub use options::{
    CONVERSION_PROGRESS_INTERVAL, ConvertOptions, DEFAULT_BOM_FILENAME, DEFAULT_CATALOG_FILENAME,
    DEFAULT_POSITION_FILENAME, DEFAULT_RULES_FILENAME, IMPORT_PROGRESS_INTERVAL,
};
pub use part::{ClassifiedPart, PartType, Side};
pub use report::{
    ConversionReport, ConversionState, NormalizationWarning, Progress, WarningKind,
};
pub use rows::{BomRow, FileKind, FileLayout, PositionRow};
