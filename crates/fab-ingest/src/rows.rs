//! Typed views over validated source records.

use fab_model::{BomRow, NormalizationWarning, PositionRow, WarningKind};

use crate::reader::SourceRecord;

/// Trims a text field and removes embedded double quotes.
pub fn clean_field(raw: &str) -> String {
    raw.trim().replace('"', "")
}

/// Parses a float field, falling back to zero with a warning.
fn number_field(
    record: &SourceRecord,
    idx: usize,
    name: &str,
    reference: &str,
    warnings: &mut Vec<NormalizationWarning>,
) -> f64 {
    let raw = clean_field(record.field(idx));
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warnings.push(
                NormalizationWarning::new(
                    WarningKind::UnparsedNumber,
                    format!("{name} {raw:?} is not a number, using 0"),
                )
                .at_line(record.line)
                .for_reference(reference),
            );
            0.0
        }
    }
}

/// Parses a position record: reference, value, package, x, y, rotation, side.
pub fn parse_position_row(
    record: &SourceRecord,
    warnings: &mut Vec<NormalizationWarning>,
) -> PositionRow {
    let reference = clean_field(record.field(0));
    let x = number_field(record, 3, "x", &reference, warnings);
    let y = number_field(record, 4, "y", &reference, warnings);
    let rotation = number_field(record, 5, "rotation", &reference, warnings);
    PositionRow {
        value: clean_field(record.field(1)),
        package: clean_field(record.field(2)),
        x,
        y,
        rotation,
        side: record.field(6).trim().to_string(),
        reference,
    }
}

/// Parses a BOM record: unused, reference, package, quantity, value, unused...
pub fn parse_bom_row(record: &SourceRecord, warnings: &mut Vec<NormalizationWarning>) -> BomRow {
    let reference = clean_field(record.field(1));
    let raw_quantity = clean_field(record.field(3));
    let quantity = match raw_quantity.parse::<i64>() {
        Ok(quantity) => quantity,
        Err(_) => {
            warnings.push(
                NormalizationWarning::new(
                    WarningKind::UnparsedNumber,
                    format!("quantity {raw_quantity:?} is not a number, using 0"),
                )
                .at_line(record.line)
                .for_reference(&reference),
            );
            0
        }
    };
    BomRow {
        package: clean_field(record.field(2)),
        quantity,
        value: clean_field(record.field(4)),
        reference,
    }
}
