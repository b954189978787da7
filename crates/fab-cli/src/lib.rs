//! Library side of the `kicad-fab` command line tool.

pub mod databases;
pub mod logging;
pub mod paths;
pub mod report;
