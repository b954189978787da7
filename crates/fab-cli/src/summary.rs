use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fab_catalog::CatalogInfo;
use fab_cli::report::{ConvertRun, FileOutcome};

use crate::types::ImportResult;

pub fn print_conversion_summary(run: &ConvertRun) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Source"),
        header_cell("Output"),
        header_cell("Rows"),
        header_cell("Skipped"),
        header_cell("Matches"),
        header_cell("Warnings"),
    ]);
    apply_table_style(&mut table);
    for index in 3..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_rows = 0usize;
    let mut total_skipped = 0usize;
    let mut total_matches = 0usize;
    let mut total_warnings = 0usize;
    for outcome in &run.files {
        let kind = Cell::new(outcome.kind())
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold);
        let source = Cell::new(outcome.source().display());
        match outcome {
            FileOutcome::Converted(report) => {
                total_rows += report.rows_processed;
                total_skipped += report.rows_skipped;
                total_matches += report.catalog_matches;
                total_warnings += report.warning_count();
                table.add_row(vec![
                    kind,
                    source,
                    Cell::new(report.output.display()),
                    Cell::new(report.rows_processed),
                    count_cell(Some(report.rows_skipped), Color::DarkYellow),
                    count_cell(Some(report.catalog_matches), Color::Green),
                    count_cell(Some(report.warning_count()), Color::Yellow),
                ]);
            }
            FileOutcome::Failed { .. } => {
                table.add_row(vec![
                    kind,
                    source,
                    Cell::new("FAILED")
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                ]);
            }
        }
    }
    if run.files.len() > 1 {
        table.add_row(vec![
            Cell::new("TOTAL")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new(total_rows).add_attribute(Attribute::Bold),
            count_cell(Some(total_skipped), Color::DarkYellow).add_attribute(Attribute::Bold),
            count_cell(Some(total_matches), Color::Green).add_attribute(Attribute::Bold),
            count_cell(Some(total_warnings), Color::Yellow).add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");
    print_warning_table(run);

    let failures: Vec<_> = run
        .files
        .iter()
        .filter_map(|outcome| match outcome {
            FileOutcome::Failed { error, .. } => Some(error),
            FileOutcome::Converted(_) => None,
        })
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for error in failures {
            eprintln!("- {error}");
        }
    }
}

fn print_warning_table(run: &ConvertRun) {
    let warnings: Vec<_> = run
        .reports()
        .flat_map(|report| report.warnings.iter().map(move |w| (report.kind, w)))
        .collect();
    if warnings.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Line"),
        header_cell("Designator"),
        header_cell("Kind"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (kind, warning) in warnings {
        table.add_row(vec![
            Cell::new(kind),
            count_cell(warning.line, Color::Reset),
            match &warning.reference {
                Some(reference) => Cell::new(reference),
                None => dim_cell("-"),
            },
            Cell::new(warning.kind).fg(Color::Yellow),
            Cell::new(&warning.message),
        ]);
    }
    println!();
    println!("Warnings:");
    println!("{table}");
}

pub fn print_import_summary(result: &ImportResult) {
    let summary = &result.summary;
    println!("Catalog: {}", result.catalog.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dump"),
        header_cell("Lines"),
        header_cell("Replaced"),
        header_cell("Imported"),
        header_cell("Rejected"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.dump.display()),
        Cell::new(summary.lines),
        dim_cell(summary.replaced),
        Cell::new(summary.records)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        count_cell(Some(summary.rejected.len()), Color::Red),
    ]);
    println!("{table}");

    if !summary.rejected.is_empty() {
        let mut rejected = Table::new();
        rejected.set_header(vec![
            header_cell("Line"),
            header_cell("Part"),
            header_cell("Reason"),
        ]);
        apply_table_style(&mut rejected);
        align_column(&mut rejected, 0, CellAlignment::Right);
        for row in &summary.rejected {
            rejected.add_row(vec![
                Cell::new(row.line),
                Cell::new(&row.part_number),
                Cell::new(&row.reason).fg(Color::Red),
            ]);
        }
        println!();
        println!("Rejected rows:");
        println!("{rejected}");
    }
}

pub fn print_catalog_info(info: &CatalogInfo) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Catalog"),
        header_cell("Size"),
        header_cell("Parts"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(info.path.display()),
        Cell::new(format!("{:.2} MiB", info.size_mib())),
        Cell::new(info.row_count).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
