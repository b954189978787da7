//! Opening the package rule and catalog databases.

use std::path::Path;

use anyhow::{Context, Result};
use fab_catalog::{SqliteCatalog, SqliteRuleTable};
use fab_model::{DEFAULT_CATALOG_FILENAME, DEFAULT_RULES_FILENAME};

use crate::paths::resolve_database;

/// Opens the package rule table at `explicit`, or the default
/// `conversion.sqlite3` next to the executable.
///
/// # Errors
///
/// A missing file or one without the `packageJlc` table fails; conversion
/// never starts without its rule database.
pub fn open_rule_table(explicit: Option<&Path>) -> Result<SqliteRuleTable> {
    let path = resolve_database(explicit, DEFAULT_RULES_FILENAME);
    SqliteRuleTable::open(&path).with_context(|| format!("open package rules {}", path.display()))
}

/// Opens the part catalog at `explicit`, or the default `partlist.sqlite3`.
///
/// The error is kept as a catalog error so the BOM file can fail on its own.
pub fn open_catalog(explicit: Option<&Path>) -> fab_catalog::Result<SqliteCatalog> {
    let path = resolve_database(explicit, DEFAULT_CATALOG_FILENAME);
    SqliteCatalog::open(&path)
}
