use std::path::PathBuf;

use fab_catalog::ImportSummary;

#[derive(Debug)]
pub struct ImportResult {
    pub catalog: PathBuf,
    pub dump: PathBuf,
    pub summary: ImportSummary,
}
