use std::path::PathBuf;

use fab_model::{
    ConversionReport, ConvertOptions, FileKind, LookupResult, NormalizationWarning, PartRecord,
    PartType, WarningKind,
};

#[test]
fn file_layouts_match_exports() {
    let position = FileKind::Position.layout();
    assert_eq!(position.delimiter, b',');
    assert_eq!(position.field_count, 7);
    assert!(!position.skip_header);

    let bom = FileKind::Bom.layout();
    assert_eq!(bom.delimiter, b';');
    assert_eq!(bom.field_count, 8);
    assert!(bom.skip_header);
}

#[test]
fn options_build_output_paths() {
    let options = ConvertOptions::new("/tmp/out").with_bom_filename("bom.csv");
    assert_eq!(options.bom_output(), PathBuf::from("/tmp/out/bom.csv"));
    assert_eq!(
        options.position_output(),
        PathBuf::from("/tmp/out/JLC_PCB_Factory_SMT.csv")
    );
    assert_eq!(options.with_progress_interval(0).progress_interval, 1);
}

#[test]
fn lookup_result_from_record() {
    let record = PartRecord {
        part_number: "C14663".to_string(),
        name: "100nF ±10% 50V".to_string(),
        type_tag: "贴片电容".to_string(),
        package: "0603".to_string(),
        pad_count: 2,
        brand: "YAGEO".to_string(),
        is_standard_stock: true,
    };
    let result = LookupResult::from(record);
    assert!(result.is_found());
    assert!(!LookupResult::NotFound.is_found());
}

#[test]
fn report_serializes() {
    let mut report = ConversionReport::new(
        FileKind::Bom,
        PathBuf::from("board.csv"),
        PathBuf::from("out/bom.csv"),
        12,
    );
    report.warnings.push(
        NormalizationWarning::new(WarningKind::UnrecognizedValue, "value \"DNP\"").for_reference("R1"),
    );
    let json = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(json["kind"], "bom");
    assert_eq!(json["rows_total"], 12);
    assert_eq!(json["warnings"][0]["kind"], "unrecognized_value");
    assert_eq!(json["warnings"][0]["reference"], "R1");
}

#[test]
fn part_type_serializes_as_tag() {
    let json = serde_json::to_string(&PartType::ResNetwork).expect("serialize tag");
    assert_eq!(json, "\"RESxN\"");
}
