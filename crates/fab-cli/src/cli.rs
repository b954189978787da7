//! CLI argument definitions for `kicad-fab`.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "kicad-fab",
    version,
    about = "Convert KiCad position and BOM exports into JLC factory files",
    long_about = "Convert KiCad position (pick-and-place) and BOM exports into the files\n\
                  the JLC assembly service accepts.\n\n\
                  BOM rows are matched against a local stock catalog (partlist.sqlite3);\n\
                  package names can be remapped with a rule table (conversion.sqlite3).\n\
                  Both databases are looked up next to the executable by default."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a position (pick-and-place) file.
    Position(PositionArgs),

    /// Convert a BOM file, filling in catalog part numbers.
    Bom(BomArgs),

    /// Convert a position file and a BOM file in one run.
    Convert(ConvertArgs),

    /// Manage the stock part catalog.
    #[command(subcommand)]
    Catalog(CatalogCommand),
}

/// Output location and report shared by the conversion commands.
#[derive(Args)]
pub struct OutputArgs {
    /// Directory receiving the factory files (default: the input's directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write the conversion reports as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Args)]
pub struct PositionArgs {
    /// KiCad position export (comma separated, 7 fields).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Output file name (default: JLC_PCB_Factory_SMT.csv).
    #[arg(long = "output-name", value_name = "NAME")]
    pub output_name: Option<String>,

    /// Package rule database (default: conversion.sqlite3 next to the executable).
    #[arg(long = "rules", value_name = "DB")]
    pub rules: Option<PathBuf>,

    /// Convert with the built-in package rules only.
    #[arg(long = "no-rules", conflicts_with = "rules")]
    pub no_rules: bool,
}

#[derive(Args)]
pub struct BomArgs {
    /// KiCad BOM export (semicolon separated, 8 fields).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Output file name (default: JLC_PCB_Factory_BOM.csv).
    #[arg(long = "output-name", value_name = "NAME")]
    pub output_name: Option<String>,

    /// Package rule database (default: conversion.sqlite3 next to the executable).
    #[arg(long = "rules", value_name = "DB")]
    pub rules: Option<PathBuf>,

    /// Convert with the built-in package rules only.
    #[arg(long = "no-rules", conflicts_with = "rules")]
    pub no_rules: bool,

    /// Stock part catalog (default: partlist.sqlite3 next to the executable).
    #[arg(long = "catalog", value_name = "DB")]
    pub catalog: Option<PathBuf>,
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("inputs")
        .required(true)
        .multiple(true)
        .args(["position", "bom"])
))]
pub struct ConvertArgs {
    /// KiCad position export.
    #[arg(long = "position", value_name = "FILE")]
    pub position: Option<PathBuf>,

    /// KiCad BOM export.
    #[arg(long = "bom", value_name = "FILE")]
    pub bom: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Output file name for the position file.
    #[arg(long = "position-name", value_name = "NAME")]
    pub position_name: Option<String>,

    /// Output file name for the BOM file.
    #[arg(long = "bom-name", value_name = "NAME")]
    pub bom_name: Option<String>,

    /// Package rule database.
    #[arg(long = "rules", value_name = "DB")]
    pub rules: Option<PathBuf>,

    /// Convert with the built-in package rules only.
    #[arg(long = "no-rules", conflicts_with = "rules")]
    pub no_rules: bool,

    /// Stock part catalog.
    #[arg(long = "catalog", value_name = "DB")]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// Rebuild the catalog from a tab-separated stock dump.
    Import(ImportArgs),

    /// Show the catalog's size and row count.
    Info(InfoArgs),
}

#[derive(Args)]
pub struct ImportArgs {
    /// Tab-separated stock dump (7 fields per line).
    #[arg(value_name = "DUMP")]
    pub dump: PathBuf,

    /// Catalog database to rebuild (default: partlist.sqlite3 next to the executable).
    #[arg(long = "catalog", value_name = "DB")]
    pub catalog: Option<PathBuf>,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Catalog database (default: partlist.sqlite3 next to the executable).
    #[arg(long = "catalog", value_name = "DB")]
    pub catalog: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
