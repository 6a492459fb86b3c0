//! OpenAPI generation for relations models
//!
//! This crate turns model descriptors into JSON-schema fragments, example
//! payloads and operation descriptions, and merges them into an OpenAPI
//! 3.0.3 document seeded by the router.

pub mod cache;
pub mod document;
pub mod example;
pub mod openapi;
pub mod operations;
pub mod paths;
pub mod schema;

#[cfg(test)]
mod fixtures;

pub use cache::DocumentCache;
pub use document::{assemble, Binding, DocumentAssembler, OPENAPI_VERSION};
pub use openapi::{Operation, Schema};

use relations_openapi_common::{GeneratorError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Serialization format for written documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// Pick the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("yaml") | Some("yml") => OutputFormat::Yaml,
            _ => OutputFormat::Json,
        }
    }
}

/// Render a document in the given format
pub fn render_document(document: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(document)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(document)?),
    }
}

/// Write a rendered document to a file, creating parent directories
pub fn write_document(document: &Value, path: &Path, format: OutputFormat) -> Result<()> {
    let rendered = render_document(document, format)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            GeneratorError::Generation(format!("Failed to create output directory: {}", e))
        })?;
    }

    fs::write(path, rendered).map_err(|e| {
        GeneratorError::Generation(format!("Failed to write {}: {}", path.display(), e))
    })?;

    Ok(())
}
