//! Default locations for databases and output files.

use std::env;
use std::path::{Path, PathBuf};

/// `file_name` in the directory holding the running executable.
///
/// Falls back to a path relative to the working directory when the
/// executable location is unknown.
pub fn default_database_path(file_name: &str) -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(file_name)))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

/// The explicit path when given, otherwise the default next to the executable.
pub fn resolve_database(explicit: Option<&Path>, file_name: &str) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => default_database_path(file_name),
    }
}

/// Output directory used when none is given: the directory of `source`.
pub fn default_output_dir(source: &Path) -> PathBuf {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_database_wins() {
        let path = resolve_database(Some(Path::new("/data/parts.db")), "partlist.sqlite3");
        assert_eq!(path, PathBuf::from("/data/parts.db"));
    }

    #[test]
    fn default_database_sits_beside_the_executable() {
        let path = resolve_database(None, "conversion.sqlite3");
        assert!(path.ends_with("conversion.sqlite3"));
    }

    #[test]
    fn output_dir_defaults_to_source_directory() {
        assert_eq!(
            default_output_dir(Path::new("/boards/rev2/board-pos.csv")),
            PathBuf::from("/boards/rev2")
        );
        assert_eq!(default_output_dir(Path::new("board.csv")), PathBuf::from("."));
    }
}
