//! Part-type classification.
//!
//! Classification is an ordered list of (predicate, outcome) rules over the
//! reference designator, value and raw package. Rules are evaluated in
//! table order and the first whose predicate holds decides the type; later
//! rules rely on earlier ones not having matched (`RN` must be tested
//! before `R`). When no rule applies the first character of the reference
//! is used as the tag.

use fab_model::{ClassifiedPart, PartType};
use tracing::trace;

/// Fields a classification rule can look at.
#[derive(Debug, Clone, Copy)]
pub struct PartFields<'a> {
    pub reference: &'a str,
    pub value: &'a str,
    pub package: &'a str,
}

/// One entry of the classification table.
pub struct ClassificationRule {
    pub name: &'static str,
    pub applies: fn(&PartFields<'_>) -> bool,
    pub outcome: fn(&PartFields<'_>) -> PartType,
}

/// Classification rules in evaluation order.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "resistor network",
        applies: |p| p.reference.starts_with("RN"),
        outcome: |_| PartType::ResNetwork,
    },
    ClassificationRule {
        name: "capacitor",
        applies: |p| p.reference.starts_with('C'),
        outcome: |p| {
            if p.package.starts_with("CP_EIA-") {
                PartType::Tcap
            } else {
                PartType::Cap
            }
        },
    },
    ClassificationRule {
        name: "resistor",
        applies: |p| p.reference.starts_with('R'),
        outcome: |_| PartType::Res,
    },
    ClassificationRule {
        name: "inductor",
        applies: |p| p.reference.starts_with('L'),
        outcome: |_| PartType::Ind,
    },
    ClassificationRule {
        name: "connector",
        applies: |p| p.reference.starts_with('J'),
        outcome: |_| PartType::Con,
    },
    ClassificationRule {
        name: "transistor",
        applies: |p| p.reference.starts_with('Q'),
        outcome: |p| {
            if p.value.starts_with("IRLM") {
                PartType::Mosfet
            } else {
                PartType::Trx
            }
        },
    },
    ClassificationRule {
        name: "diode",
        applies: |p| p.reference.starts_with('D'),
        outcome: |p| {
            if p.package.contains("LED") {
                PartType::Led
            } else {
                PartType::Diode
            }
        },
    },
    ClassificationRule {
        name: "crystal",
        applies: |p| p.value.contains("MHz") || p.value.contains("kHz"),
        outcome: |_| PartType::Xtal,
    },
    ClassificationRule {
        name: "integrated circuit",
        applies: |p| p.package.contains("QFN") || p.package.contains("SOP"),
        outcome: |_| PartType::Ic,
    },
];

/// Infers the part type of a single part.
pub fn classify(reference: &str, value: &str, package: &str) -> PartType {
    let fields = PartFields {
        reference,
        value,
        package,
    };
    for rule in CLASSIFICATION_RULES {
        if (rule.applies)(&fields) {
            let part_type = (rule.outcome)(&fields);
            trace!(reference, rule = rule.name, part_type = %part_type, "classified");
            return part_type;
        }
    }
    PartType::fallback(reference)
}

/// Classifies and bundles the part's fields.
pub fn classify_part(reference: &str, value: &str, package: &str) -> ClassifiedPart {
    ClassifiedPart {
        reference: reference.to_string(),
        value: value.to_string(),
        package: package.to_string(),
        part_type: classify(reference, value, package),
    }
}
