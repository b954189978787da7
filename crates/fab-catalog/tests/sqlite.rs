//! Catalog import and lookup against real SQLite files.

use std::fs;
use std::path::{Path, PathBuf};

use fab_catalog::{
    CatalogError, PackageRuleSource, PartCatalog, SqliteCatalog, SqliteRuleTable, catalog_info,
    import_part_list, import_part_list_with_progress,
};
use fab_ingest::IngestError;
use fab_model::{CatalogQuery, CategoryKeyword, NameMatch};
use rusqlite::Connection;
use tempfile::TempDir;

const DUMP: &str = "元件编号\t名称\t类别\t封装\t焊盘数\t品牌\t库类别
C1591\t100nF 16V X7R\t贴片电容\t0603\t2\tSAMSUNG\t扩展库
C14663\t100nF 50V X7R\t贴片电容\t0603\t2\tYAGEO\t基础库
C25804\t10kΩ ±1% 0.1W\t贴片电阻\t0603\t2\tUNI-ROYAL\t基础库
C14663\t100nF duplicate\t贴片电容\t0603\t2\tYAGEO\t基础库
C32346\t16MHz 20pF\t贴片无源晶振\tSMD-3225\t4\tYXC\t基础库
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn imported_catalog(dir: &TempDir) -> PathBuf {
    let dump = write(dir, "dump.txt", DUMP);
    let catalog = dir.path().join("partlist.sqlite3");
    import_part_list(&catalog, &dump).expect("import");
    catalog
}

fn query(name: &str, name_match: NameMatch, package: &str, category: CategoryKeyword) -> CatalogQuery {
    CatalogQuery {
        name: name.to_string(),
        name_match,
        package: package.to_string(),
        category,
    }
}

#[test]
fn import_skips_header_and_reports_rejected_rows() {
    let dir = TempDir::new().expect("temp dir");
    let dump = write(&dir, "dump.txt", DUMP);
    let catalog = dir.path().join("partlist.sqlite3");

    let mut updates = Vec::new();
    let summary = import_part_list_with_progress(&catalog, &dump, |progress| {
        updates.push(progress.percent());
    })
    .expect("import");

    assert_eq!(summary.lines, 6);
    assert_eq!(summary.records, 4);
    assert!(summary.header_skipped);
    assert_eq!(summary.rejected.len(), 1);
    assert_eq!(summary.rejected[0].part_number, "C14663");
    assert_eq!(summary.rejected[0].line, 5);
    assert_eq!(updates.first(), Some(&0));
    assert_eq!(updates.last(), Some(&100));

    let info = catalog_info(&catalog).expect("info");
    assert_eq!(info.row_count, 4);
    assert!(info.size_bytes > 0);
}

#[test]
fn reimport_replaces_existing_rows() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = imported_catalog(&dir);
    let smaller = write(
        &dir,
        "small.txt",
        "C1\t1uF 10V\t贴片电容\t0402\t2\tMURATA\t基础库\n",
    );
    let summary = import_part_list(&catalog, &smaller).expect("reimport");
    assert_eq!(summary.replaced, 4);
    assert_eq!(summary.records, 1);
    assert!(!summary.header_skipped);
    assert_eq!(catalog_info(&catalog).expect("info").row_count, 1);
}

#[test]
fn malformed_dump_leaves_catalog_untouched() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = imported_catalog(&dir);
    let broken = write(
        &dir,
        "broken.txt",
        "C1\t1uF\t贴片电容\t0402\t2\tMURATA\t基础库\nC2\t2uF\t贴片电容\t0402\t2\n",
    );

    let err = import_part_list(&catalog, &broken).expect_err("must fail");
    match err {
        CatalogError::Dump(IngestError::FieldCount {
            line,
            expected,
            actual,
            ..
        }) => {
            assert_eq!(line, 2);
            assert_eq!(expected, 7);
            assert_eq!(actual, 5);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(catalog_info(&catalog).expect("info").row_count, 4);
}

#[test]
fn best_match_prefers_standard_stock() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = SqliteCatalog::open(&imported_catalog(&dir)).expect("open");

    let best = catalog
        .find_best_match(&query(
            "100nF",
            NameMatch::Prefix,
            "0603",
            CategoryKeyword::ChipCapacitor,
        ))
        .expect("lookup")
        .expect("found");
    assert_eq!(best.part_number, "C14663");
    assert!(best.is_standard_stock);
    assert_eq!(best.pad_count, 2);
    assert_eq!(best.brand, "YAGEO");
}

#[test]
fn lookup_requires_package_and_category() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = SqliteCatalog::open(&imported_catalog(&dir)).expect("open");

    let wrong_package = query("100nF", NameMatch::Prefix, "0805", CategoryKeyword::ChipCapacitor);
    assert!(catalog.find_best_match(&wrong_package).expect("lookup").is_none());

    let wrong_category = query("100nF", NameMatch::Prefix, "0603", CategoryKeyword::ChipResistor);
    assert!(catalog.find_best_match(&wrong_category).expect("lookup").is_none());

    let resistor = query("10kΩ", NameMatch::Prefix, "0603", CategoryKeyword::ChipResistor);
    assert_eq!(
        catalog
            .find_best_match(&resistor)
            .expect("lookup")
            .map(|part| part.part_number),
        Some("C25804".to_string())
    );
}

#[test]
fn contains_match_and_wildcards_in_values() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = SqliteCatalog::open(&imported_catalog(&dir)).expect("open");

    let crystal = query("20pF", NameMatch::Contains, "SMD-3225", CategoryKeyword::Crystal);
    assert!(catalog.find_best_match(&crystal).expect("lookup").is_some());

    let wildcard = query("100%", NameMatch::Prefix, "0603", CategoryKeyword::ChipCapacitor);
    assert!(catalog.find_best_match(&wildcard).expect("lookup").is_none());

    let underscore = query("1_0nF", NameMatch::Prefix, "0603", CategoryKeyword::ChipCapacitor);
    assert!(catalog.find_best_match(&underscore).expect("lookup").is_none());
}

fn rule_database(path: &Path) {
    let conn = Connection::open(path).expect("create");
    conn.execute_batch(
        "CREATE TABLE packageJlc (compareValue VARCHAR, convertTo VARCHAR, compareType VARCHAR);
         INSERT INTO packageJlc VALUES ('SOT-23', 'SOT-23-3', 'S');
         INSERT INTO packageJlc VALUES (NULL, 'ignored', 'S');
         INSERT INTO packageJlc VALUES ('SOIC-8', 'SOIC-8_3.9x4.9mm', 'C');",
    )
    .expect("seed rules");
}

#[test]
fn rule_table_lists_in_storage_order() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("conversion.sqlite3");
    rule_database(&path);

    let rules = SqliteRuleTable::open(&path)
        .expect("open")
        .list_package_rules()
        .expect("rules");
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0].convert_to, "SOT-23-3");
    assert_eq!(rules[1].compare_value, "");
    assert!(rules[1].usable_compare_type().is_none());
    assert_eq!(rules[2].compare_type, "C");
}

#[test]
fn missing_table_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("conversion.sqlite3");
    rule_database(&path);

    let err = SqliteCatalog::open(&path).err().expect("must fail");
    assert!(matches!(
        err,
        CatalogError::MissingTable {
            table: "partList",
            ..
        }
    ));
}
