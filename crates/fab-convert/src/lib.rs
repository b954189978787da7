//! Conversion engine: KiCad position and BOM exports to factory files.
//!
//! [`ConversionPipeline`] validates a whole source file, then re-reads it
//! and writes one factory row per part. Position rows get package codes,
//! side codes and rotation corrections; BOM rows are additionally looked up
//! in a [`PartCatalog`](fab_catalog::PartCatalog) through [`CatalogLookup`].

pub mod bom;
pub mod context;
pub mod error;
pub mod lookup;
pub mod pipeline;
pub mod position;

pub use bom::{
    BOM_HEADER, BomOutput, SKIPPED_REFERENCE_PREFIXES, is_skipped_reference, transform_bom,
};
pub use context::ConversionContext;
pub use error::{ConvertError, Result};
pub use lookup::{CatalogLookup, PlannedQuery, plan_query, search_scope};
pub use pipeline::{ConversionPipeline, convert_bom_file, convert_position_file, output_path};
pub use position::{
    CorrectedRotation, POSITION_HEADER, PositionOutput, correct_rotation, transform_position,
};
