//! Catalog and package-rule records.
//!
//! Both stores are owned by external collaborators; the conversion engine
//! only reads them.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// One part in the stock catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartRecord {
    /// Unique stock part number (primary key).
    pub part_number: String,
    /// Display name, usually starting with the value ("100nF ...").
    pub name: String,
    /// Catalog category text searched with a [`CategoryKeyword`].
    pub type_tag: String,
    /// Package code.
    pub package: String,
    pub pad_count: i64,
    pub brand: String,
    /// Preferred/commonly held inventory.
    pub is_standard_stock: bool,
}

/// How a rule's compare value is tested against a raw package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareType {
    Prefix,
    Contains,
}

impl CompareType {
    pub fn matches(self, raw_package: &str, compare_value: &str) -> bool {
        match self {
            CompareType::Prefix => raw_package.starts_with(compare_value),
            CompareType::Contains => raw_package.contains(compare_value),
        }
    }
}

impl FromStr for CompareType {
    type Err = ModelError;

    /// Stored rule tables only look at the first character: `S` (starts
    /// with) or `P` selects prefix matching, `C` selects substring matching.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().chars().next() {
            Some('S' | 's' | 'P' | 'p') => Ok(CompareType::Prefix),
            Some('C' | 'c') => Ok(CompareType::Contains),
            _ => Err(ModelError::UnknownCompareType(s.to_string())),
        }
    }
}

impl fmt::Display for CompareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareType::Prefix => f.write_str("Prefix"),
            CompareType::Contains => f.write_str("Contains"),
        }
    }
}

/// A row of the package rule table as stored.
///
/// Fields are kept raw so that rows with empty fields can be skipped at
/// evaluation time rather than rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageRule {
    pub compare_value: String,
    pub convert_to: String,
    pub compare_type: String,
}

impl PackageRule {
    pub fn new(
        compare_value: impl Into<String>,
        convert_to: impl Into<String>,
        compare_type: impl Into<String>,
    ) -> Self {
        Self {
            compare_value: compare_value.into(),
            convert_to: convert_to.into(),
            compare_type: compare_type.into(),
        }
    }

    /// Returns the parsed compare type, or `None` when any field is empty
    /// or the compare type is unrecognised.
    pub fn usable_compare_type(&self) -> Option<CompareType> {
        if self.compare_value.is_empty() || self.convert_to.is_empty() {
            return None;
        }
        self.compare_type.parse().ok()
    }
}

/// How the normalized value is matched against catalog names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NameMatch {
    /// Name starts with the value.
    Prefix,
    /// Name contains the value anywhere.
    Contains,
}

/// Fixed catalog category keywords, matched as a substring of the
/// catalog's type text.
///
/// The tokens are literal search keys in the catalog's stored language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CategoryKeyword {
    ChipCapacitor,
    TantalumCapacitor,
    ChipResistor,
    ResistorNetwork,
    Inductor,
    Crystal,
    Transistor,
    Led,
    Diode,
    Mosfet,
}

impl CategoryKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKeyword::ChipCapacitor => "贴片电容",
            CategoryKeyword::TantalumCapacitor => "钽电容",
            CategoryKeyword::ChipResistor => "贴片电阻",
            CategoryKeyword::ResistorNetwork => "贴片排阻",
            CategoryKeyword::Inductor => "电感",
            CategoryKeyword::Crystal => "贴片无源晶振",
            CategoryKeyword::Transistor => "三极管",
            CategoryKeyword::Led => "发光二极管",
            CategoryKeyword::Diode => "二极管",
            CategoryKeyword::Mosfet => "场效应管",
        }
    }
}

impl fmt::Display for CategoryKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query handed to the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub name: String,
    pub name_match: NameMatch,
    pub package: String,
    pub category: CategoryKeyword,
}

/// Outcome of a catalog lookup for one BOM row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupResult {
    Found {
        part_number: String,
        name: String,
        type_tag: String,
        package: String,
        pad_count: i64,
        is_standard_stock: bool,
    },
    NotFound,
}

impl LookupResult {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found { .. })
    }
}

impl From<PartRecord> for LookupResult {
    fn from(record: PartRecord) -> Self {
        LookupResult::Found {
            part_number: record.part_number,
            name: record.name,
            type_tag: record.type_tag,
            package: record.package,
            pad_count: record.pad_count,
            is_standard_stock: record.is_standard_stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_type_reads_first_character() {
        assert_eq!("StartsWith".parse::<CompareType>().ok(), Some(CompareType::Prefix));
        assert_eq!("Prefix".parse::<CompareType>().ok(), Some(CompareType::Prefix));
        assert_eq!("Contains".parse::<CompareType>().ok(), Some(CompareType::Contains));
        assert!("Exact".parse::<CompareType>().is_err());
        assert!("".parse::<CompareType>().is_err());
    }

    #[test]
    fn rules_with_empty_fields_are_unusable() {
        assert!(PackageRule::new("", "SOT-23", "S").usable_compare_type().is_none());
        assert!(PackageRule::new("SOT", "", "S").usable_compare_type().is_none());
        assert!(PackageRule::new("SOT", "SOT-23", "").usable_compare_type().is_none());
        assert_eq!(
            PackageRule::new("SOT", "SOT-23", "C").usable_compare_type(),
            Some(CompareType::Contains)
        );
    }

    #[test]
    fn compare_type_matching() {
        assert!(CompareType::Prefix.matches("SOT-23-5", "SOT-23"));
        assert!(!CompareType::Prefix.matches("Package_SOT-23", "SOT-23"));
        assert!(CompareType::Contains.matches("Package_SOT-23", "SOT-23"));
    }
}
