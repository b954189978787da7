//! BOM row transform and catalog enrichment.

use std::fmt;

use fab_model::{BomRow, ClassifiedPart, LookupResult, NormalizationWarning, WarningKind};
use fab_normalize::{PackageNormalizer, classify};
use tracing::{debug, warn};

use crate::error::{ConvertError, Result};
use crate::lookup::{CatalogLookup, plan_query};

/// Header line of the factory BOM file.
pub const BOM_HEADER: &str = "Comment,Description,Designator,Footprint,LibRef,Pins,Quantity,编号";

/// Reference prefixes that never reach the factory BOM: mounting holes,
/// test points and ground markers.
pub const SKIPPED_REFERENCE_PREFIXES: [&str; 3] = ["H", "TP", "G"];

const COMMENT_CHARS: usize = 60;
const LIB_REF_VALUE_CHARS: usize = 10;

pub fn is_skipped_reference(reference: &str) -> bool {
    SKIPPED_REFERENCE_PREFIXES
        .iter()
        .any(|prefix| reference.starts_with(prefix))
}

/// One row of the factory BOM file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomOutput {
    pub comment: String,
    /// Catalog type text when found, else the classified tag.
    pub description: String,
    pub reference: String,
    pub package: String,
    pub lib_ref: String,
    pub pins: Option<i64>,
    pub quantity: i64,
    pub part_number: Option<String>,
}

impl BomOutput {
    pub fn is_matched(&self) -> bool {
        self.part_number.is_some()
    }
}

impl fmt::Display for BomOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\",{},\"{}\",\"{}\",{},",
            self.comment.replace('"', "\"\""),
            self.description,
            self.reference,
            self.package,
            self.lib_ref
        )?;
        if let Some(pins) = self.pins {
            write!(f, "{pins}")?;
        }
        write!(f, ",{},", self.quantity)?;
        if let Some(part_number) = &self.part_number {
            f.write_str(part_number)?;
        }
        Ok(())
    }
}

/// Converts one retained BOM row.
///
/// Without a catalog match the locally derived comment, type and package
/// are kept and the pin count and part number stay blank.
///
/// # Errors
///
/// A failed catalog query is [`ConvertError::CatalogUnavailable`] and ends
/// the file's conversion.
pub fn transform_bom(
    row: &BomRow,
    packages: &PackageNormalizer<'_>,
    lookup: &CatalogLookup<'_>,
    line: usize,
    warnings: &mut Vec<NormalizationWarning>,
) -> Result<BomOutput> {
    let part_type = classify(&row.reference, &row.value, &row.package);
    let package = packages.normalize(&row.package);

    // The library reference is classified against the normalized package.
    let value_head: String = row.value.chars().take(LIB_REF_VALUE_CHARS).collect();
    let lib_ref = format!("{} {value_head}", classify(&row.reference, &row.value, &package));

    let part = ClassifiedPart {
        reference: row.reference.clone(),
        value: row.value.clone(),
        package,
        part_type,
    };

    let result = match plan_query(&part) {
        Some(planned) => {
            if !planned.recognized {
                let warning = NormalizationWarning::new(
                    WarningKind::UnrecognizedValue,
                    format!(
                        "value {:?} does not look like a {} value",
                        part.value, part.part_type
                    ),
                )
                .at_line(line)
                .for_reference(&part.reference);
                warn!(%warning, "unrecognized value");
                warnings.push(warning);
            }
            lookup.run(&planned).map_err(|err| {
                debug!(reference = %part.reference, line, %err, "catalog lookup failed");
                ConvertError::from(err)
            })?
        }
        None => LookupResult::NotFound,
    };

    let out = match result {
        LookupResult::Found {
            part_number,
            name,
            type_tag,
            package,
            pad_count,
            ..
        } => {
            debug!(reference = %part.reference, %part_number, "catalog match");
            BomOutput {
                comment: name,
                description: type_tag,
                reference: part.reference,
                package,
                lib_ref,
                pins: Some(pad_count),
                quantity: row.quantity,
                part_number: Some(part_number),
            }
        }
        LookupResult::NotFound => BomOutput {
            comment: part.value.chars().take(COMMENT_CHARS).collect(),
            description: part.part_type.to_string(),
            reference: part.reference,
            package: part.package,
            lib_ref,
            pins: None,
            quantity: row.quantity,
            part_number: None,
        },
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fab_catalog::{MemoryCatalog, PartCatalog};
    use fab_model::{CatalogQuery, PartRecord};

    fn row(reference: &str, package: &str, quantity: i64, value: &str) -> BomRow {
        BomRow {
            reference: reference.to_string(),
            package: package.to_string(),
            quantity,
            value: value.to_string(),
        }
    }

    struct BrokenCatalog;

    impl PartCatalog for BrokenCatalog {
        fn find_best_match(&self, _query: &CatalogQuery) -> fab_catalog::Result<Option<PartRecord>> {
            Err(fab_catalog::CatalogError::NotFound {
                path: "partlist.sqlite3".into(),
            })
        }
    }

    #[test]
    fn skipped_prefixes() {
        assert!(is_skipped_reference("H1"));
        assert!(is_skipped_reference("TP3"));
        assert!(is_skipped_reference("G1"));
        assert!(!is_skipped_reference("T1"));
        assert!(!is_skipped_reference("C1"));
    }

    #[test]
    fn unmatched_row_keeps_local_data() {
        let catalog = MemoryCatalog::default();
        let mut warnings = Vec::new();
        let out = transform_bom(
            &row("J1", "Connector_USB:USB_C_Receptacle_GCT_USB4085", 1, "USB_C"),
            &PackageNormalizer::builtin(),
            &CatalogLookup::new(&catalog),
            2,
            &mut warnings,
        )
        .unwrap();
        assert_eq!(
            out.to_string(),
            "\"USB_C\",CON,\"J1\",\"Connector_USB:USB_C_\",CON USB_C,,1,"
        );
        assert!(!out.is_matched());
        assert!(warnings.is_empty());
    }

    #[test]
    fn matched_row_takes_catalog_fields() {
        let catalog = MemoryCatalog::new(vec![PartRecord {
            part_number: "C14663".to_string(),
            name: "100nF 50V X7R".to_string(),
            type_tag: "贴片电容".to_string(),
            package: "0603".to_string(),
            pad_count: 2,
            brand: "YAGEO".to_string(),
            is_standard_stock: true,
        }]);
        let mut warnings = Vec::new();
        let out = transform_bom(
            &row("C1", "C_0603_1608Metric", 4, "0.1uF"),
            &PackageNormalizer::builtin(),
            &CatalogLookup::new(&catalog),
            3,
            &mut warnings,
        )
        .unwrap();
        assert_eq!(
            out.to_string(),
            "\"100nF 50V X7R\",贴片电容,\"C1\",\"0603\",CAP 0.1uF,2,4,C14663"
        );
        assert!(out.is_matched());
    }

    #[test]
    fn comment_with_comma_or_quote_stays_in_one_column() {
        let catalog = MemoryCatalog::default();
        let mut warnings = Vec::new();
        let out = transform_bom(
            &row("J2", "PinHeader_1x02", 1, "HDR 2,54mm \"A\""),
            &PackageNormalizer::builtin(),
            &CatalogLookup::new(&catalog),
            4,
            &mut warnings,
        )
        .unwrap();
        let line = out.to_string();
        assert!(line.starts_with("\"HDR 2,54mm \"\"A\"\"\",CON,\"J2\""), "{line}");
    }

    #[test]
    fn catalog_failure_aborts_the_row() {
        let mut warnings = Vec::new();
        let err = transform_bom(
            &row("R1", "R_0805_2012Metric", 1, "DNP"),
            &PackageNormalizer::builtin(),
            &CatalogLookup::new(&BrokenCatalog),
            5,
            &mut warnings,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::CatalogUnavailable { .. }), "{err}");
        let kinds: Vec<_> = warnings.iter().map(|w| w.kind).collect();
        assert_eq!(kinds, vec![WarningKind::UnrecognizedValue]);
    }
}
