//! Read-only SQLite implementations of the collaborator traits.

use std::path::{Path, PathBuf};
use std::time::Duration;

use fab_model::{CatalogQuery, NameMatch, PackageRule, PartRecord};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params};
use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::source::{PackageRuleSource, PartCatalog};

pub const PART_TABLE: &str = "partList";
pub const RULE_TABLE: &str = "packageJlc";

/// Wait this long on a locked database before failing.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(2);

const BEST_MATCH_SQL: &str = "SELECT partNumber, name, type, package, padCount, brand, isStanardStock
     FROM partList
     WHERE name LIKE ?1 ESCAPE '\\' AND package = ?2 AND type LIKE ?3 ESCAPE '\\'
     ORDER BY isStanardStock DESC, partNumber ASC
     LIMIT 1";

const RULES_SQL: &str = "SELECT compareValue, convertTo, compareType FROM packageJlc ORDER BY rowid";

/// Opens `path` read-only and checks that `table` can be selected from.
pub(crate) fn open_read_only(path: &Path, table: &'static str) -> Result<Connection> {
    if !path.is_file() {
        return Err(CatalogError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| CatalogError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|source| CatalogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    check_table(&conn, table).map_err(|source| CatalogError::MissingTable {
        path: path.to_path_buf(),
        table,
        source,
    })?;
    Ok(conn)
}

fn check_table(conn: &Connection, table: &str) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM {table} LIMIT 1"))?;
    let mut rows = stmt.query([])?;
    rows.next()?;
    Ok(())
}

/// Escapes `LIKE` wildcards so user values match literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn name_pattern(query: &CatalogQuery) -> String {
    let value = escape_like(&query.name);
    match query.name_match {
        NameMatch::Prefix => format!("{value}%"),
        NameMatch::Contains => format!("%{value}%"),
    }
}

/// Reads a column as text whatever its storage class.
///
/// Catalog files written by older tools store some text columns with
/// numeric affinity, so an all-digit part number may come back as an
/// integer.
fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    })
}

fn integer_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<i64> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Integer(i) => i,
        ValueRef::Real(f) => f as i64,
        ValueRef::Text(t) => String::from_utf8_lossy(t).trim().parse().unwrap_or(0),
        ValueRef::Null | ValueRef::Blob(_) => 0,
    })
}

fn flag_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<bool> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Integer(i) => i != 0,
        ValueRef::Real(f) => f != 0.0,
        ValueRef::Text(t) => {
            let text = String::from_utf8_lossy(t);
            let text = text.trim();
            text.eq_ignore_ascii_case("true") || text == "1"
        }
        ValueRef::Null | ValueRef::Blob(_) => false,
    })
}

fn part_from_row(row: &Row<'_>) -> rusqlite::Result<PartRecord> {
    Ok(PartRecord {
        part_number: text_column(row, 0)?,
        name: text_column(row, 1)?,
        type_tag: text_column(row, 2)?,
        package: text_column(row, 3)?,
        pad_count: integer_column(row, 4)?,
        brand: text_column(row, 5)?,
        is_standard_stock: flag_column(row, 6)?,
    })
}

/// Stock catalog stored in a `partList` table.
pub struct SqliteCatalog {
    conn: Connection,
    path: PathBuf,
}

impl SqliteCatalog {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = open_read_only(path, PART_TABLE)?;
        info!(path = %path.display(), "opened part catalog");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn row_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM partList", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl PartCatalog for SqliteCatalog {
    fn find_best_match(&self, query: &CatalogQuery) -> Result<Option<PartRecord>> {
        let name = name_pattern(query);
        let category = format!("%{}%", escape_like(query.category.as_str()));
        let mut stmt = self.conn.prepare_cached(BEST_MATCH_SQL)?;
        let record = stmt
            .query_row(params![name, query.package, category], part_from_row)
            .optional()?;
        debug!(
            name = %query.name,
            package = %query.package,
            category = %query.category,
            part_number = record.as_ref().map(|r| r.part_number.as_str()),
            "catalog lookup"
        );
        Ok(record)
    }
}

/// Package rule table stored in a `packageJlc` table.
#[derive(Debug)]
pub struct SqliteRuleTable {
    conn: Connection,
}

impl SqliteRuleTable {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = open_read_only(path, RULE_TABLE)?;
        info!(path = %path.display(), "opened package rule table");
        Ok(Self { conn })
    }
}

impl PackageRuleSource for SqliteRuleTable {
    fn list_package_rules(&self) -> Result<Vec<PackageRule>> {
        let mut stmt = self.conn.prepare(RULES_SQL)?;
        let rules = stmt
            .query_map([], |row| {
                Ok(PackageRule::new(
                    text_column(row, 0)?,
                    text_column(row, 1)?,
                    text_column(row, 2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(rule_count = rules.len(), "loaded package rules");
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
        assert_eq!(escape_like("4.7kΩ"), "4.7kΩ");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = SqliteCatalog::open(Path::new("/nonexistent/partlist.sqlite3"))
            .err()
            .expect("open should fail");
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }
}
