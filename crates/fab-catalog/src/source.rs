//! Collaborator traits consumed by the conversion engine.
//!
//! The engine never owns the catalog or the rule table; it only asks for
//! the best part for a query and for the ordered rule list. The in-memory
//! implementations here follow the same matching semantics as the SQLite
//! ones and are used in tests and when embedding the engine.

use fab_model::{CatalogQuery, NameMatch, PackageRule, PartRecord};

use crate::error::Result;

/// Stock part catalog.
pub trait PartCatalog {
    /// Returns the best part whose name matches the query value, whose
    /// package equals the query package and whose type text contains the
    /// category keyword. Standard stock is preferred; ties go to the lowest
    /// part number.
    fn find_best_match(&self, query: &CatalogQuery) -> Result<Option<PartRecord>>;
}

/// Ordered package rule table.
pub trait PackageRuleSource {
    /// All rules in storage order.
    fn list_package_rules(&self) -> Result<Vec<PackageRule>>;
}

impl<T: PartCatalog + ?Sized> PartCatalog for &T {
    fn find_best_match(&self, query: &CatalogQuery) -> Result<Option<PartRecord>> {
        (**self).find_best_match(query)
    }
}

impl<T: PackageRuleSource + ?Sized> PackageRuleSource for &T {
    fn list_package_rules(&self) -> Result<Vec<PackageRule>> {
        (**self).list_package_rules()
    }
}

/// Catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    records: Vec<PartRecord>,
}

impl MemoryCatalog {
    pub fn new(records: Vec<PartRecord>) -> Self {
        Self { records }
    }

    pub fn insert(&mut self, record: PartRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<PartRecord> for MemoryCatalog {
    fn from_iter<I: IntoIterator<Item = PartRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl PartCatalog for MemoryCatalog {
    fn find_best_match(&self, query: &CatalogQuery) -> Result<Option<PartRecord>> {
        let category = query.category.as_str();
        let best = self
            .records
            .iter()
            .filter(|record| name_matches(&record.name, &query.name, query.name_match))
            .filter(|record| record.package == query.package)
            .filter(|record| record.type_tag.contains(category))
            .min_by(|a, b| {
                b.is_standard_stock
                    .cmp(&a.is_standard_stock)
                    .then_with(|| a.part_number.cmp(&b.part_number))
            });
        Ok(best.cloned())
    }
}

/// SQLite `LIKE` folds ASCII case only; mirror that here.
fn name_matches(name: &str, value: &str, mode: NameMatch) -> bool {
    let name = name.to_ascii_lowercase();
    let value = value.to_ascii_lowercase();
    match mode {
        NameMatch::Prefix => name.starts_with(&value),
        NameMatch::Contains => name.contains(&value),
    }
}

/// Rule table held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRuleTable {
    rules: Vec<PackageRule>,
}

impl MemoryRuleTable {
    pub fn new(rules: Vec<PackageRule>) -> Self {
        Self { rules }
    }
}

impl PackageRuleSource for MemoryRuleTable {
    fn list_package_rules(&self) -> Result<Vec<PackageRule>> {
        Ok(self.rules.clone())
    }
}
