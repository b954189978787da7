//! Catalog-ranked part lookup.
//!
//! Each searchable part type maps to one category keyword and one value
//! normalization. Connectors, ICs and fallback tags are never looked up.

use fab_catalog::{PartCatalog, Result};
use fab_model::{CatalogQuery, CategoryKeyword, ClassifiedPart, LookupResult, NameMatch, PartType};
use fab_normalize::normalize_value;

/// Catalog category and name matching for a part type.
pub fn search_scope(part_type: &PartType) -> Option<(CategoryKeyword, NameMatch)> {
    let scope = match part_type {
        PartType::Cap => (CategoryKeyword::ChipCapacitor, NameMatch::Prefix),
        PartType::Tcap => (CategoryKeyword::TantalumCapacitor, NameMatch::Prefix),
        PartType::Res => (CategoryKeyword::ChipResistor, NameMatch::Prefix),
        PartType::ResNetwork => (CategoryKeyword::ResistorNetwork, NameMatch::Prefix),
        PartType::Ind => (CategoryKeyword::Inductor, NameMatch::Prefix),
        PartType::Led => (CategoryKeyword::Led, NameMatch::Prefix),
        PartType::Xtal => (CategoryKeyword::Crystal, NameMatch::Contains),
        PartType::Trx => (CategoryKeyword::Transistor, NameMatch::Contains),
        PartType::Diode => (CategoryKeyword::Diode, NameMatch::Contains),
        PartType::Mosfet => (CategoryKeyword::Mosfet, NameMatch::Contains),
        PartType::Con | PartType::Ic | PartType::Other(_) => return None,
    };
    Some(scope)
}

/// A catalog query together with how well the value was understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedQuery {
    pub query: CatalogQuery,
    /// False when the raw value did not fit its type's pattern.
    pub recognized: bool,
}

/// Builds the catalog query for a part whose package is already
/// normalized. Returns `None` for types that are never looked up.
pub fn plan_query(part: &ClassifiedPart) -> Option<PlannedQuery> {
    let (category, name_match) = search_scope(&part.part_type)?;
    let value = normalize_value(&part.part_type, &part.value);
    Some(PlannedQuery {
        query: CatalogQuery {
            name: value.text,
            name_match,
            package: part.package.clone(),
            category,
        },
        recognized: value.recognized,
    })
}

/// Looks parts up in a catalog.
pub struct CatalogLookup<'a> {
    catalog: &'a dyn PartCatalog,
}

impl<'a> CatalogLookup<'a> {
    pub fn new(catalog: &'a dyn PartCatalog) -> Self {
        Self { catalog }
    }

    /// Runs an already planned query.
    pub fn run(&self, planned: &PlannedQuery) -> Result<LookupResult> {
        Ok(self
            .catalog
            .find_best_match(&planned.query)?
            .map_or(LookupResult::NotFound, LookupResult::from))
    }

    /// Finds the best catalog record for `part`.
    pub fn lookup(&self, part: &ClassifiedPart) -> Result<LookupResult> {
        match plan_query(part) {
            Some(planned) => self.run(&planned),
            None => Ok(LookupResult::NotFound),
        }
    }
}
