//! kicad-fab command line tool.

use clap::{ColorChoice, Parser};
use fab_cli::logging::{LogConfig, LogFormat, init_logging};
use fab_cli::report::ConvertRun;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod progress;
mod summary;
mod types;

use crate::cli::{CatalogCommand, Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_bom, run_catalog_import, run_catalog_info, run_convert, run_position};
use crate::summary::{print_catalog_info, print_conversion_summary, print_import_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Position(args) => finish_conversion(run_position(args)),
        Command::Bom(args) => finish_conversion(run_bom(args)),
        Command::Convert(args) => finish_conversion(run_convert(args)),
        Command::Catalog(CatalogCommand::Import(args)) => match run_catalog_import(args) {
            Ok(result) => {
                print_import_summary(&result);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Catalog(CatalogCommand::Info(args)) => match run_catalog_info(args) {
            Ok(info) => {
                print_catalog_info(&info);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn finish_conversion(outcome: anyhow::Result<ConvertRun>) -> i32 {
    match outcome {
        Ok(run) => {
            print_conversion_summary(&run);
            if run.has_errors() { 1 } else { 0 }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
