use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use fab_catalog::{CatalogInfo, catalog_info, import_part_list_with_progress};
use fab_cli::databases::{open_catalog, open_rule_table};
use fab_cli::paths::{default_output_dir, resolve_database};
use fab_cli::report::{ConvertRun, FileOutcome, write_json_report};
use fab_convert::{ConversionContext, ConversionPipeline, ConvertError};
use fab_model::{ConvertOptions, DEFAULT_CATALOG_FILENAME, FileKind};

use crate::cli::{BomArgs, ConvertArgs, ImportArgs, InfoArgs, PositionArgs};
use crate::progress::ProgressDisplay;
use crate::types::ImportResult;

/// Inputs and databases of one conversion command.
struct Job<'a> {
    options: ConvertOptions,
    position: Option<&'a Path>,
    bom: Option<&'a Path>,
    rules: Option<&'a Path>,
    /// Skip the rule database and use the built-in package rules only.
    no_rules: bool,
    catalog: Option<&'a Path>,
    report: Option<&'a Path>,
}

pub fn run_position(args: &PositionArgs) -> Result<ConvertRun> {
    let output_dir = args
        .output
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.file));
    let mut options = ConvertOptions::new(output_dir);
    if let Some(name) = &args.output_name {
        options = options.with_position_filename(name.as_str());
    }
    run_job(&Job {
        options,
        position: Some(&args.file),
        bom: None,
        rules: args.rules.as_deref(),
        no_rules: args.no_rules,
        catalog: None,
        report: args.output.report.as_deref(),
    })
}

pub fn run_bom(args: &BomArgs) -> Result<ConvertRun> {
    let output_dir = args
        .output
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.file));
    let mut options = ConvertOptions::new(output_dir);
    if let Some(name) = &args.output_name {
        options = options.with_bom_filename(name.as_str());
    }
    run_job(&Job {
        options,
        position: None,
        bom: Some(&args.file),
        rules: args.rules.as_deref(),
        no_rules: args.no_rules,
        catalog: args.catalog.as_deref(),
        report: args.output.report.as_deref(),
    })
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertRun> {
    let first_input = args.position.as_deref().or(args.bom.as_deref());
    let output_dir = match (&args.output.output_dir, first_input) {
        (Some(dir), _) => dir.clone(),
        (None, Some(source)) => default_output_dir(source),
        (None, None) => PathBuf::from("."),
    };
    let mut options = ConvertOptions::new(output_dir);
    if let Some(name) = &args.position_name {
        options = options.with_position_filename(name.as_str());
    }
    if let Some(name) = &args.bom_name {
        options = options.with_bom_filename(name.as_str());
    }
    run_job(&Job {
        options,
        position: args.position.as_deref(),
        bom: args.bom.as_deref(),
        rules: args.rules.as_deref(),
        no_rules: args.no_rules,
        catalog: args.catalog.as_deref(),
        report: args.output.report.as_deref(),
    })
}

fn run_job(job: &Job<'_>) -> Result<ConvertRun> {
    let span = info_span!("run", output_dir = %job.options.output_dir().display());
    let _guard = span.enter();

    let rules = if job.no_rules {
        info!("package rule database disabled, built-in rules only");
        None
    } else {
        Some(open_rule_table(job.rules)?)
    };
    let catalog = job.bom.map(|_| open_catalog(job.catalog));

    let mut context = ConversionContext::new(&job.options);
    if let Some(rules) = &rules {
        context = context.with_rules(rules);
    }
    if let Some(Ok(catalog)) = &catalog {
        context = context.with_catalog(catalog);
    }
    let mut pipeline = ConversionPipeline::new(context);

    // Each file succeeds or fails on its own.
    let mut run = ConvertRun::default();
    if let Some(source) = job.position {
        run.push(convert_file(&mut pipeline, FileKind::Position, source));
    }
    if let Some(source) = job.bom {
        let outcome = match catalog.as_ref() {
            Some(Err(err)) => {
                let err = ConvertError::CatalogUnavailable {
                    reason: err.to_string(),
                };
                failed(FileKind::Bom, source, &err)
            }
            _ => convert_file(&mut pipeline, FileKind::Bom, source),
        };
        run.push(outcome);
    }

    if let Some(path) = job.report {
        write_json_report(path, &run)
            .with_context(|| format!("write report {}", path.display()))?;
        info!(report = %path.display(), "report written");
    }
    Ok(run)
}

fn convert_file(
    pipeline: &mut ConversionPipeline<'_>,
    kind: FileKind,
    source: &Path,
) -> FileOutcome {
    let display = ProgressDisplay::new(kind.label());
    let result = pipeline.convert(kind, source, |progress| {
        display.update(progress.processed, progress.total);
    });
    display.finish();
    match result {
        Ok(report) => FileOutcome::Converted(report),
        Err(err) => failed(kind, source, &err),
    }
}

fn failed(kind: FileKind, source: &Path, err: &ConvertError) -> FileOutcome {
    FileOutcome::Failed {
        kind,
        source: source.to_path_buf(),
        line: err.line(),
        error: err.to_string(),
    }
}

pub fn run_catalog_import(args: &ImportArgs) -> Result<ImportResult> {
    let catalog = resolve_database(args.catalog.as_deref(), DEFAULT_CATALOG_FILENAME);
    let span = info_span!("catalog_import", catalog = %catalog.display());
    let _guard = span.enter();

    let display = ProgressDisplay::new("import");
    let imported = import_part_list_with_progress(&catalog, &args.dump, |progress| {
        display.update(progress.processed, progress.total);
    });
    display.finish();
    let summary = imported
        .with_context(|| format!("import {} into {}", args.dump.display(), catalog.display()))?;
    Ok(ImportResult {
        catalog,
        dump: args.dump.clone(),
        summary,
    })
}

pub fn run_catalog_info(args: &InfoArgs) -> Result<CatalogInfo> {
    let catalog = resolve_database(args.catalog.as_deref(), DEFAULT_CATALOG_FILENAME);
    catalog_info(&catalog).with_context(|| format!("read catalog {}", catalog.display()))
}
