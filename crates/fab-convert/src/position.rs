//! Position (pick-and-place) row transform.

use std::fmt;

use fab_model::{NormalizationWarning, PartType, PositionRow, Side, WarningKind};
use fab_normalize::{PackageNormalizer, classify};
use tracing::warn;

/// Header line of the factory position file. A blank line follows it.
pub const POSITION_HEADER: &str =
    "Designator,Footprint,Mid X,Mid Y,Ref X,Ref Y,Pad X,Pad Y,Layer,Rotation,Comment";

/// Characters of the raw value kept in the comment column.
const COMMENT_VALUE_CHARS: usize = 10;

/// One row of the factory position file.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionOutput {
    pub reference: String,
    pub package: String,
    pub x: f64,
    pub y: f64,
    pub side: Side,
    pub rotation: f64,
    pub comment: String,
}

impl fmt::Display for PositionOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}mm,{}mm,,,,,{},{},{}",
            self.reference,
            self.package,
            format_number(self.x),
            format_number(self.y),
            self.side.code(),
            format_number(self.rotation),
            self.comment,
        )
    }
}

/// Shortest decimal form, without a negative zero.
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Rotation after the per-type placement offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectedRotation {
    pub degrees: f64,
    /// False when the angle is negative or the single wrap left it at 360
    /// or more.
    pub in_range: bool,
}

/// Applies the per-type rotation offsets and wraps once.
///
/// Tantalum capacitors turn 180°, transistors 270° on top and 90° on the
/// bottom, resistor networks 270°. Only one 360° subtraction is made, so
/// inputs that end up at 720° or more stay out of range. Negative results
/// are never wrapped up and are out of range too.
pub fn correct_rotation(part_type: &PartType, side: &Side, rotation: f64) -> CorrectedRotation {
    let mut degrees = rotation;
    if *part_type == PartType::Tcap {
        degrees += 180.0;
    }
    if part_type.is_transistor() {
        match side {
            Side::Top => degrees += 270.0,
            Side::Bottom => degrees += 90.0,
            Side::Other(_) => {}
        }
    }
    if *part_type == PartType::ResNetwork {
        degrees += 270.0;
    }
    if degrees >= 360.0 {
        degrees -= 360.0;
    }
    CorrectedRotation {
        degrees,
        in_range: (0.0..360.0).contains(&degrees),
    }
}

/// Converts one parsed position row.
///
/// `line` is the source line, used to locate any warning.
pub fn transform_position(
    row: &PositionRow,
    packages: &PackageNormalizer<'_>,
    line: usize,
    warnings: &mut Vec<NormalizationWarning>,
) -> PositionOutput {
    let part_type = classify(&row.reference, &row.value, &row.package);
    let side = Side::parse(&row.side);
    let value_head: String = row.value.chars().take(COMMENT_VALUE_CHARS).collect();
    let comment = format!("{part_type} {value_head}");

    let rotation = correct_rotation(&part_type, &side, row.rotation);
    if !rotation.in_range {
        let warning = NormalizationWarning::new(
            WarningKind::RotationOutOfRange,
            format!(
                "rotation {} corrects to {}, outside [0, 360)",
                format_number(row.rotation),
                format_number(rotation.degrees)
            ),
        )
        .at_line(line)
        .for_reference(&row.reference);
        warn!(%warning, "rotation out of range");
        warnings.push(warning);
    }

    PositionOutput {
        reference: row.reference.clone(),
        package: packages.normalize(&row.package),
        x: row.x,
        y: row.y,
        side,
        rotation: rotation.degrees,
        comment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(reference: &str, value: &str, package: &str, rotation: f64, side: &str) -> PositionRow {
        PositionRow {
            reference: reference.to_string(),
            value: value.to_string(),
            package: package.to_string(),
            x: 12.5,
            y: -3.25,
            rotation,
            side: side.to_string(),
        }
    }

    #[test]
    fn rotation_offsets_by_type_and_side() {
        let top = Side::Top;
        let bottom = Side::Bottom;
        assert_eq!(correct_rotation(&PartType::Tcap, &top, 90.0).degrees, 270.0);
        assert_eq!(correct_rotation(&PartType::Tcap, &top, 180.0).degrees, 0.0);
        assert_eq!(correct_rotation(&PartType::Trx, &top, 0.0).degrees, 270.0);
        assert_eq!(correct_rotation(&PartType::Mosfet, &bottom, 0.0).degrees, 90.0);
        assert_eq!(correct_rotation(&PartType::ResNetwork, &bottom, 180.0).degrees, 90.0);
        assert_eq!(correct_rotation(&PartType::Cap, &top, 45.0).degrees, 45.0);
    }

    #[test]
    fn unknown_side_gets_no_transistor_offset() {
        let side = Side::parse("inner");
        assert_eq!(correct_rotation(&PartType::Trx, &side, 10.0).degrees, 10.0);
    }

    #[test]
    fn only_one_wrap_is_applied() {
        let corrected = correct_rotation(&PartType::Trx, &Side::Top, 500.0);
        assert_eq!(corrected.degrees, 410.0);
        assert!(!corrected.in_range);
    }

    #[test]
    fn formats_factory_row() {
        let mut warnings = Vec::new();
        let out = transform_position(
            &row("Q1", "2N3904 NPN transistor", "SOT-23", 90.0, "top"),
            &PackageNormalizer::builtin(),
            2,
            &mut warnings,
        );
        assert_eq!(
            out.to_string(),
            "Q1,SOT-23,12.5mm,-3.25mm,,,,,T,0,TRX 2N3904 NPN"
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn out_of_range_rotation_is_flagged() {
        let mut warnings = Vec::new();
        let out = transform_position(
            &row("RN1", "4x10k", "R_Array", 720.0, "bottom"),
            &PackageNormalizer::builtin(),
            9,
            &mut warnings,
        );
        assert_eq!(out.rotation, 630.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::RotationOutOfRange);
        assert_eq!(warnings[0].line, Some(9));
        assert_eq!(warnings[0].reference.as_deref(), Some("RN1"));
    }

    #[test]
    fn negative_rotation_is_flagged() {
        let corrected = correct_rotation(&PartType::Cap, &Side::Top, -90.0);
        assert_eq!(corrected.degrees, -90.0);
        assert!(!corrected.in_range);

        // The offset can bring a negative input back into range.
        let corrected = correct_rotation(&PartType::Tcap, &Side::Top, -90.0);
        assert_eq!(corrected.degrees, 90.0);
        assert!(corrected.in_range);

        let mut warnings = Vec::new();
        let out = transform_position(
            &row("C3", "1uF", "C_0603_1608Metric", -90.0, "top"),
            &PackageNormalizer::builtin(),
            4,
            &mut warnings,
        );
        assert_eq!(out.rotation, -90.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::RotationOutOfRange);
    }

    #[test]
    fn numbers_print_without_trailing_zeros() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(147.32), "147.32");
    }
}
