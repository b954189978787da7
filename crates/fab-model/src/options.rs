use std::path::{Path, PathBuf};

/// Default output file name for converted position files.
pub const DEFAULT_POSITION_FILENAME: &str = "JLC_PCB_Factory_SMT.csv";
/// Default output file name for converted BOM files.
pub const DEFAULT_BOM_FILENAME: &str = "JLC_PCB_Factory_BOM.csv";
/// Default catalog database file name.
pub const DEFAULT_CATALOG_FILENAME: &str = "partlist.sqlite3";
/// Default package rule database file name.
pub const DEFAULT_RULES_FILENAME: &str = "conversion.sqlite3";

/// Rows between progress notifications during file conversion.
pub const CONVERSION_PROGRESS_INTERVAL: usize = 4;
/// Rows between progress notifications during catalog import.
pub const IMPORT_PROGRESS_INTERVAL: usize = 32;

/// Options controlling where and how converted files are written.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory receiving the converted files. Must already exist.
    pub output_dir: PathBuf,
    /// File name for the converted position file.
    pub position_filename: String,
    /// File name for the converted BOM file.
    pub bom_filename: String,
    /// Rows between progress notifications.
    pub progress_interval: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            position_filename: DEFAULT_POSITION_FILENAME.to_string(),
            bom_filename: DEFAULT_BOM_FILENAME.to_string(),
            progress_interval: CONVERSION_PROGRESS_INTERVAL,
        }
    }
}

impl ConvertOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_position_filename(mut self, name: impl Into<String>) -> Self {
        self.position_filename = name.into();
        self
    }

    #[must_use]
    pub fn with_bom_filename(mut self, name: impl Into<String>) -> Self {
        self.bom_filename = name.into();
        self
    }

    #[must_use]
    pub fn with_progress_interval(mut self, rows: usize) -> Self {
        self.progress_interval = rows.max(1);
        self
    }

    pub fn position_output(&self) -> PathBuf {
        self.output_dir.join(&self.position_filename)
    }

    pub fn bom_output(&self) -> PathBuf {
        self.output_dir.join(&self.bom_filename)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
