//! Conversion results, warnings and progress notifications.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::rows::FileKind;

/// Category of a non-fatal normalization problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The package rule source could not be read; built-in rules only.
    PackageRulesUnavailable,
    /// A numeric field did not parse and was read as zero.
    UnparsedNumber,
    /// Rotation is still outside `[0, 360)` after the single wrap.
    RotationOutOfRange,
    /// A value did not fit the expected unit pattern for its part type.
    UnrecognizedValue,
}

impl WarningKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WarningKind::PackageRulesUnavailable => "package_rules_unavailable",
            WarningKind::UnparsedNumber => "unparsed_number",
            WarningKind::RotationOutOfRange => "rotation_out_of_range",
            WarningKind::UnrecognizedValue => "unrecognized_value",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal problem found while converting a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizationWarning {
    pub kind: WarningKind,
    /// 1-based source line, when the warning belongs to a row.
    pub line: Option<usize>,
    /// Reference designator, when the warning belongs to a part.
    pub reference: Option<String>,
    pub message: String,
}

impl NormalizationWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            line: None,
            reference: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn for_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

impl fmt::Display for NormalizationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        if let Some(reference) = &self.reference {
            write!(f, "{reference}: ")?;
        }
        f.write_str(&self.message)
    }
}

/// Per-file conversion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionState {
    Idle,
    Validating,
    Converting,
    Done,
    Failed,
}

/// Progress notification emitted at a fixed row cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub kind: FileKind,
    /// Rows read so far, header included.
    pub processed: usize,
    /// Rows counted by the validation pass.
    pub total: usize,
}

impl Progress {
    /// Completion in percent, `0.0..=100.0`.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.processed as f64 / self.total as f64 * 100.0).min(100.0)
        }
    }
}

/// Summary of one successful file conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    pub kind: FileKind,
    pub source: PathBuf,
    pub output: PathBuf,
    /// Rows counted by the validation pass, header included.
    pub rows_total: usize,
    /// Rows written to the output file.
    pub rows_processed: usize,
    /// Rows intentionally excluded (mount holes, test points, ground marks).
    pub rows_skipped: usize,
    /// BOM rows enriched from the catalog.
    pub catalog_matches: usize,
    pub warnings: Vec<NormalizationWarning>,
}

impl ConversionReport {
    pub fn new(kind: FileKind, source: PathBuf, output: PathBuf, rows_total: usize) -> Self {
        Self {
            kind,
            source,
            output,
            rows_total,
            rows_processed: 0,
            rows_skipped: 0,
            catalog_matches: 0,
            warnings: Vec::new(),
        }
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_percent_is_bounded() {
        let progress = Progress {
            kind: FileKind::Bom,
            processed: 5,
            total: 4,
        };
        assert!((progress.percent() - 100.0).abs() < f64::EPSILON);
        let empty = Progress {
            kind: FileKind::Bom,
            processed: 0,
            total: 0,
        };
        assert!((empty.percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn warning_display_includes_location() {
        let warning = NormalizationWarning::new(WarningKind::UnparsedNumber, "x is not a number")
            .at_line(7)
            .for_reference("C3");
        assert_eq!(warning.to_string(), "line 7: C3: x is not a number");
    }
}
