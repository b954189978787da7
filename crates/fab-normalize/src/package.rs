//! Footprint to factory package code mapping.

use fab_model::PackageRule;
use tracing::trace;

/// Chip sizes recognised directly from KiCad footprint names such as
/// `R_0603_1608Metric`: the five characters after the first one.
const BUILTIN_CHIP_SIZES: [(&str, &str); 3] =
    [("_0603", "0603"), ("_0805", "0805"), ("_1206", "1206")];

/// Longest package text passed through when nothing matches.
pub const MAX_PACKAGE_LEN: usize = 20;

/// Maps raw footprints to standardized package codes.
///
/// Built-in chip sizes are tried first, then the rule table in stored
/// order; the first matching rule wins.
#[derive(Debug, Clone, Copy)]
pub struct PackageNormalizer<'a> {
    rules: &'a [PackageRule],
}

impl<'a> PackageNormalizer<'a> {
    pub fn new(rules: &'a [PackageRule]) -> Self {
        Self { rules }
    }

    /// Normalizer with no rule table (built-in rules only).
    pub fn builtin() -> PackageNormalizer<'static> {
        PackageNormalizer { rules: &[] }
    }

    pub fn rules(&self) -> &[PackageRule] {
        self.rules
    }

    pub fn normalize(&self, raw_package: &str) -> String {
        let chip_size: String = raw_package.chars().skip(1).take(5).collect();
        if let Some((_, code)) = BUILTIN_CHIP_SIZES
            .iter()
            .find(|(marker, _)| *marker == chip_size)
        {
            return (*code).to_string();
        }

        for rule in self.rules {
            let Some(compare_type) = rule.usable_compare_type() else {
                continue;
            };
            if compare_type.matches(raw_package, &rule.compare_value) {
                trace!(
                    raw_package,
                    compare_value = %rule.compare_value,
                    convert_to = %rule.convert_to,
                    "package rule matched"
                );
                return rule.convert_to.clone();
            }
        }

        raw_package.chars().take(MAX_PACKAGE_LEN).collect()
    }
}

/// Convenience wrapper over [`PackageNormalizer::normalize`].
pub fn normalize_package(raw_package: &str, rules: &[PackageRule]) -> String {
    PackageNormalizer::new(rules).normalize(raw_package)
}
