//! Per-file outcomes of a conversion run and their JSON report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fab_model::{ConversionReport, FileKind};
use serde::Serialize;

/// Result of converting one file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Converted(ConversionReport),
    Failed {
        kind: FileKind,
        source: PathBuf,
        /// Source line of a structural error.
        line: Option<usize>,
        error: String,
    },
}

impl FileOutcome {
    pub fn kind(&self) -> FileKind {
        match self {
            FileOutcome::Converted(report) => report.kind,
            FileOutcome::Failed { kind, .. } => *kind,
        }
    }

    pub fn source(&self) -> &Path {
        match self {
            FileOutcome::Converted(report) => &report.source,
            FileOutcome::Failed { source, .. } => source,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// Every file handled by one command, in the order converted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConvertRun {
    pub files: Vec<FileOutcome>,
}

impl ConvertRun {
    pub fn push(&mut self, outcome: FileOutcome) {
        self.files.push(outcome);
    }

    pub fn has_errors(&self) -> bool {
        self.files.iter().any(FileOutcome::is_failed)
    }

    pub fn reports(&self) -> impl Iterator<Item = &ConversionReport> {
        self.files.iter().filter_map(|outcome| match outcome {
            FileOutcome::Converted(report) => Some(report),
            FileOutcome::Failed { .. } => None,
        })
    }
}

/// Writes `run` as pretty-printed JSON to `path`.
pub fn write_json_report(path: &Path, run: &ConvertRun) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, run)
        .with_context(|| format!("serialize report to {}", path.display()))?;
    writeln!(writer)?;
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
