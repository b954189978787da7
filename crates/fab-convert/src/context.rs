//! Explicit per-call configuration for the conversion pipeline.

use fab_catalog::{PackageRuleSource, PartCatalog};
use fab_model::ConvertOptions;

/// Options plus borrowed collaborators for one or more conversions.
///
/// Nothing is cached between calls; the rule table is re-read for every
/// file converted.
#[derive(Clone, Copy)]
pub struct ConversionContext<'a> {
    options: &'a ConvertOptions,
    catalog: Option<&'a dyn PartCatalog>,
    rules: Option<&'a dyn PackageRuleSource>,
}

impl<'a> ConversionContext<'a> {
    pub fn new(options: &'a ConvertOptions) -> Self {
        Self {
            options,
            catalog: None,
            rules: None,
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: &'a dyn PartCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: &'a dyn PackageRuleSource) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn options(&self) -> &'a ConvertOptions {
        self.options
    }

    pub fn catalog(&self) -> Option<&'a dyn PartCatalog> {
        self.catalog
    }

    pub fn rules(&self) -> Option<&'a dyn PackageRuleSource> {
        self.rules
    }
}

impl std::fmt::Debug for ConversionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionContext")
            .field("options", &self.options)
            .field("catalog", &self.catalog.is_some())
            .field("rules", &self.rules.is_some())
            .finish()
    }
}
