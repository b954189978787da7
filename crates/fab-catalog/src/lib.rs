//! Stock part catalog and package rule table.
//!
//! The conversion engine depends only on the [`PartCatalog`] and
//! [`PackageRuleSource`] traits. [`SqliteCatalog`] and [`SqliteRuleTable`]
//! read the `partList` and `packageJlc` tables of existing database files
//! read-only; [`import_part_list`] rebuilds a catalog from a stock dump.

pub mod error;
pub mod import;
pub mod source;
pub mod sqlite;

pub use error::{CatalogError, Result};
pub use import::{
    CatalogInfo, ImportProgress, ImportSummary, RejectedRow, catalog_info, create_schema,
    import_part_list, import_part_list_with_progress,
};
pub use source::{MemoryCatalog, MemoryRuleTable, PackageRuleSource, PartCatalog};
pub use sqlite::{SqliteCatalog, SqliteRuleTable, escape_like};
