//! Two-pass file conversion.
//!
//! Each file goes `Idle → Validating → Converting → Done`, or to `Failed`
//! from any step. The validation pass reads the whole source before the
//! destination is created, so a structural error never leaves an output
//! file behind. The converting pass re-reads the source from the start and
//! writes rows as they are transformed. A failure in that pass removes the
//! partial output.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use fab_catalog::PartCatalog;
use fab_ingest::{LineValidator, RecordReader, parse_bom_row, parse_position_row};
use fab_model::{
    ConversionReport, ConversionState, ConvertOptions, FileKind, NormalizationWarning,
    PackageRule, Progress, WarningKind,
};
use fab_normalize::PackageNormalizer;
use tracing::{debug, error, info, info_span, warn};

use crate::bom::{BOM_HEADER, is_skipped_reference, transform_bom};
use crate::context::ConversionContext;
use crate::error::{ConvertError, Result};
use crate::lookup::CatalogLookup;
use crate::position::{POSITION_HEADER, transform_position};

/// Converts position and BOM files for one context.
#[derive(Debug)]
pub struct ConversionPipeline<'a> {
    context: ConversionContext<'a>,
    state: ConversionState,
}

impl<'a> ConversionPipeline<'a> {
    pub fn new(context: ConversionContext<'a>) -> Self {
        Self {
            context,
            state: ConversionState::Idle,
        }
    }

    /// State reached by the most recent conversion.
    pub fn state(&self) -> ConversionState {
        self.state
    }

    pub fn convert_position(
        &mut self,
        source: &Path,
        on_progress: impl FnMut(Progress),
    ) -> Result<ConversionReport> {
        self.convert(FileKind::Position, source, on_progress)
    }

    pub fn convert_bom(
        &mut self,
        source: &Path,
        on_progress: impl FnMut(Progress),
    ) -> Result<ConversionReport> {
        self.convert(FileKind::Bom, source, on_progress)
    }

    /// Converts `source` into the factory file for `kind`.
    pub fn convert(
        &mut self,
        kind: FileKind,
        source: &Path,
        mut on_progress: impl FnMut(Progress),
    ) -> Result<ConversionReport> {
        let span = info_span!("convert", %kind, source = %source.display());
        let _guard = span.enter();

        self.state = ConversionState::Idle;
        let outcome = self.run(kind, source, &mut on_progress);
        match &outcome {
            Ok(report) => {
                self.transition(ConversionState::Done);
                info!(
                    output = %report.output.display(),
                    rows = report.rows_processed,
                    skipped = report.rows_skipped,
                    matches = report.catalog_matches,
                    warnings = report.warning_count(),
                    "conversion finished"
                );
            }
            Err(err) => {
                self.transition(ConversionState::Failed);
                error!(%err, "conversion failed");
            }
        }
        outcome
    }

    fn transition(&mut self, next: ConversionState) {
        debug!(from = ?self.state, to = ?next, "state change");
        self.state = next;
    }

    fn run(
        &mut self,
        kind: FileKind,
        source: &Path,
        on_progress: &mut dyn FnMut(Progress),
    ) -> Result<ConversionReport> {
        let options = self.context.options();
        check_output_dir(options.output_dir())?;
        let output = output_path(options, kind);
        let catalog = match kind {
            FileKind::Position => None,
            FileKind::Bom => Some(self.context.catalog().ok_or_else(|| {
                ConvertError::CatalogUnavailable {
                    reason: "no part catalog configured".to_string(),
                }
            })?),
        };

        self.transition(ConversionState::Validating);
        let layout = kind.layout();
        let total = LineValidator::new(layout).validate_path(source)?;

        let mut report = ConversionReport::new(kind, source.to_path_buf(), output.clone(), total);
        let rules = self.load_rules(&mut report.warnings);
        let packages = PackageNormalizer::new(&rules);

        self.transition(ConversionState::Converting);
        let file = File::create(&output).map_err(io_error(&output))?;
        let mut writer = BufWriter::new(file);
        let mut rows = RowLoop {
            kind,
            total,
            interval: options.progress_interval.max(1),
            records: RecordReader::open(source, layout)?,
            on_progress,
        };

        let written = match catalog {
            None => write_position(&mut rows, &mut writer, &packages, &mut report),
            Some(catalog) => write_bom(&mut rows, &mut writer, &packages, catalog, &mut report),
        };
        if let Err(err) = written {
            drop(writer);
            discard_partial(&output);
            return Err(err.with_output(&output));
        }
        writer.flush().map_err(io_error(&output))?;

        (rows.on_progress)(Progress {
            kind,
            processed: total,
            total,
        });
        Ok(report)
    }

    /// Reads the rule table once for this file. A failure falls back to the
    /// built-in package rules.
    fn load_rules(&self, warnings: &mut Vec<NormalizationWarning>) -> Vec<PackageRule> {
        let Some(source) = self.context.rules() else {
            debug!("no package rule table configured, built-in rules only");
            return Vec::new();
        };
        match source.list_package_rules() {
            Ok(rules) => rules,
            Err(err) => {
                let warning = NormalizationWarning::new(
                    WarningKind::PackageRulesUnavailable,
                    format!("package rules unavailable, built-in rules only: {err}"),
                );
                warn!(%warning, "package rule table unavailable");
                warnings.push(warning);
                Vec::new()
            }
        }
    }
}

/// Converts a position file with a one-off pipeline.
pub fn convert_position_file(
    source: &Path,
    context: ConversionContext<'_>,
    on_progress: impl FnMut(Progress),
) -> Result<ConversionReport> {
    ConversionPipeline::new(context).convert_position(source, on_progress)
}

/// Converts a BOM file with a one-off pipeline.
pub fn convert_bom_file(
    source: &Path,
    context: ConversionContext<'_>,
    on_progress: impl FnMut(Progress),
) -> Result<ConversionReport> {
    ConversionPipeline::new(context).convert_bom(source, on_progress)
}

fn check_output_dir(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ConvertError::OutputDir {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        }),
        Err(err) => Err(ConvertError::OutputDir {
            path: dir.to_path_buf(),
            reason: err.to_string(),
        }),
    }
}

fn discard_partial(output: &Path) {
    if let Err(err) = fs::remove_file(output) {
        warn!(output = %output.display(), %err, "partial output left behind");
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ConvertError + '_ {
    move |source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Error inside the row loop: a source read or catalog failure, or a write
/// failure whose path is filled in by the caller.
enum RowError {
    Source(ConvertError),
    Write(io::Error),
}

impl RowError {
    fn with_output(self, output: &Path) -> ConvertError {
        match self {
            RowError::Source(err) => err,
            RowError::Write(source) => ConvertError::Io {
                path: output.to_path_buf(),
                source,
            },
        }
    }
}

impl From<io::Error> for RowError {
    fn from(err: io::Error) -> Self {
        RowError::Write(err)
    }
}

impl From<ConvertError> for RowError {
    fn from(err: ConvertError) -> Self {
        RowError::Source(err)
    }
}

impl From<fab_ingest::IngestError> for RowError {
    fn from(err: fab_ingest::IngestError) -> Self {
        RowError::Source(err.into())
    }
}

/// Second-pass record iteration with progress notification.
struct RowLoop<'p> {
    kind: FileKind,
    total: usize,
    interval: usize,
    records: RecordReader<File>,
    on_progress: &'p mut dyn FnMut(Progress),
}

impl RowLoop<'_> {
    /// Next data record; the header row is consumed here.
    fn next_data(&mut self) -> std::result::Result<Option<fab_ingest::SourceRecord>, RowError> {
        while let Some(record) = self.records.next_record()? {
            if record.index % self.interval == 0 {
                (self.on_progress)(Progress {
                    kind: self.kind,
                    processed: record.index,
                    total: self.total,
                });
            }
            if record.index == 0 {
                continue;
            }
            return Ok(Some(record));
        }
        Ok(None)
    }
}

fn log_new_warnings(warnings: &[NormalizationWarning]) {
    for warning in warnings {
        warn!(%warning, "row normalized with defaults");
    }
}

fn write_position(
    rows: &mut RowLoop<'_>,
    writer: &mut impl Write,
    packages: &PackageNormalizer<'_>,
    report: &mut ConversionReport,
) -> std::result::Result<(), RowError> {
    writeln!(writer, "{POSITION_HEADER}")?;
    writeln!(writer)?;

    while let Some(record) = rows.next_data()? {
        let before = report.warnings.len();
        let row = parse_position_row(&record, &mut report.warnings);
        log_new_warnings(&report.warnings[before..]);

        let out = transform_position(&row, packages, record.line, &mut report.warnings);
        writeln!(writer, "{out}")?;
        report.rows_processed += 1;
    }
    Ok(())
}

fn write_bom(
    rows: &mut RowLoop<'_>,
    writer: &mut impl Write,
    packages: &PackageNormalizer<'_>,
    catalog: &dyn PartCatalog,
    report: &mut ConversionReport,
) -> std::result::Result<(), RowError> {
    let lookup = CatalogLookup::new(catalog);
    writeln!(writer, "{BOM_HEADER}")?;

    while let Some(record) = rows.next_data()? {
        let before = report.warnings.len();
        let row = parse_bom_row(&record, &mut report.warnings);
        if is_skipped_reference(&row.reference) {
            debug!(reference = %row.reference, line = record.line, "row skipped");
            report.warnings.truncate(before);
            report.rows_skipped += 1;
            continue;
        }
        log_new_warnings(&report.warnings[before..]);

        let out = transform_bom(&row, packages, &lookup, record.line, &mut report.warnings)?;
        if out.is_matched() {
            report.catalog_matches += 1;
        }
        writeln!(writer, "{out}")?;
        report.rows_processed += 1;
    }
    Ok(())
}

/// Output path for `kind` under `options`.
pub fn output_path(options: &ConvertOptions, kind: FileKind) -> PathBuf {
    match kind {
        FileKind::Position => options.position_output(),
        FileKind::Bom => options.bom_output(),
    }
}
