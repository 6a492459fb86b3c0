//! Models file parsing for relations-openapi
//!
//! This crate reads declarative models files into the descriptors the
//! generator and registry work from.
//!
//! ## Defaults
//!
//! Only model and field names are required:
//! - singular → snake case of the name, plural → singular + "s"
//! - title → the name
//! - id → `id` when the model has such a field
//! - titles → first non-id field, list → titles, order → `+` each title
//! - chunk → 100
//! - kind → inferred from the default, then the first option, else `str`

pub mod models;
mod type_mapper;

pub use models::{ModelsFile, ModelsParser, ResourceEntry};
pub use type_mapper::TypeMapper;

use relations_openapi_common::Result;
use std::path::Path;

/// Parse a models file (convenience function)
///
/// # Arguments
/// * `path` - Path to a `.yaml`, `.yml` or `.json` models file
///
/// # Returns
/// * `ModelsFile` - Defaulted descriptors and declared resources
pub fn parse_models_file<P: AsRef<Path>>(path: P) -> Result<ModelsFile> {
    ModelsParser::from_file(path)?.parse()
}
