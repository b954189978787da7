//! Logging configuration and file output.
//!
//! Only one test may install the global subscriber per test binary.

use std::fs;
use std::path::PathBuf;

use fab_cli::logging::{LogConfig, LogFormat, init_logging};
use tempfile::TempDir;
use tracing::level_filters::LevelFilter;

#[test]
fn builders_override_defaults() {
    let config = LogConfig::default()
        .with_level(LevelFilter::WARN)
        .with_format(LogFormat::Compact)
        .with_timestamps(true)
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(false)
        .with_log_file(Some(PathBuf::from("kicad-fab.log")));

    assert_eq!(config.level_filter, LevelFilter::WARN);
    assert_eq!(config.format, LogFormat::Compact);
    assert!(config.with_timestamps);
    assert!(config.with_target);
    assert!(!config.with_ansi);
    assert!(!config.use_env_filter);
    assert_eq!(config.log_file, Some(PathBuf::from("kicad-fab.log")));
}

#[test]
fn json_events_are_appended_to_the_log_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("kicad-fab.log");
    let config = LogConfig::default()
        .with_level(LevelFilter::INFO)
        .with_env_filter(false)
        .with_format(LogFormat::Json)
        .with_log_file(Some(path.clone()));

    init_logging(&config).expect("init logging");
    tracing::warn!(reference = "C7", "capacitance value not recognized");
    tracing::debug!("below the configured level");

    let contents = fs::read_to_string(&path).expect("read log");
    assert!(contents.contains("capacitance value not recognized"));
    assert!(contents.contains("\"reference\":\"C7\""));
    assert!(!contents.contains("below the configured level"));
}
