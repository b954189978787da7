use std::fmt::Write as _;
use std::fs;

use fab_ingest::{IngestError, LineValidator, RecordReader, parse_position_row};
use fab_model::FileKind;

fn position_file(rows: usize, broken_line: Option<usize>) -> String {
    let mut contents = String::from("Ref,Val,Package,PosX,PosY,Rot,Side\n");
    for line in 2..=rows + 1 {
        if Some(line) == broken_line {
            writeln!(contents, "C{line},100nF,C_0603,1.0,2.0,0").unwrap();
        } else {
            writeln!(contents, "C{line},100nF,C_0603,1.0,2.0,0,top").unwrap();
        }
    }
    contents
}

#[test]
fn reports_exact_failing_line() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("board-pos.csv");
    fs::write(&path, position_file(60, Some(42))).expect("write input");

    let err = LineValidator::new(FileKind::Position.layout())
        .validate_path(&path)
        .expect_err("line 42 is short");
    match err {
        IngestError::FieldCount {
            line,
            expected,
            actual,
            ..
        } => {
            assert_eq!(line, 42);
            assert_eq!(expected, 7);
            assert_eq!(actual, 6);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn valid_file_counts_rows_and_reads_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("board-pos.csv");
    fs::write(&path, position_file(5, None)).expect("write input");

    let rows = LineValidator::new(FileKind::Position.layout())
        .validate_path(&path)
        .expect("valid file");
    assert_eq!(rows, 6);

    let mut warnings = Vec::new();
    let parsed: Vec<_> = RecordReader::open(&path, FileKind::Position.layout())
        .expect("open")
        .skip(1)
        .map(|record| parse_position_row(&record.expect("record"), &mut warnings))
        .collect();
    assert_eq!(parsed.len(), 5);
    assert_eq!(parsed[0].reference, "C2");
    assert!(warnings.is_empty());
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = LineValidator::new(FileKind::Bom.layout())
        .validate_path(&dir.path().join("missing.csv"))
        .expect_err("missing file");
    assert!(matches!(err, IngestError::Open { .. }));
    assert_eq!(err.line(), None);
}
