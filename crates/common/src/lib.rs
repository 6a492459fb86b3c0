//! Common types and utilities for relations-openapi
//!
//! This crate contains the model and field descriptors, path classification,
//! the descriptor provider seam, and the error type shared by the parser,
//! generator, registry, and CLI components.

mod descriptor;
mod info;
mod path;

#[cfg(test)]
mod fixtures;

pub use descriptor::{
    DescriptorProvider, FieldDescriptor, FieldKind, ModelDescriptor, StaticProvider,
};
pub use info::ApiInfo;
pub use path::{extract_path, route_params, PathShape, RouteParam, Verb};

use thiserror::Error;

/// Errors that can occur while compiling models into resources and documents
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Descriptor for model {model} unavailable: {message}")]
    Provider { model: String, message: String },

    #[error("Invalid descriptor for model {model}: {reason}")]
    InvalidDescriptor { model: String, reason: String },

    #[error("Schema {name} is produced more than once")]
    SchemaCollision { name: String },

    #[error("Operation id {0} is used more than once")]
    DuplicateOperationId(String),

    #[error("Registration error: {0}")]
    Registration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
