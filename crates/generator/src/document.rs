//! Document assembly
//!
//! Turns the router's base document into an OpenAPI 3.0.3 document by adding
//! tags, schema fragments and operations for every bound model.

use crate::{paths, schema};
use relations_openapi_common::{GeneratorError, ModelDescriptor, Result};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::{debug, info};

/// OpenAPI version written into assembled documents
pub const OPENAPI_VERSION: &str = "3.0.3";

/// A model bound to the router, with the URLs its resource serves
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Route name of the resource
    pub name: String,
    pub descriptor: ModelDescriptor,
    /// Router-style URL templates, e.g. `/simple` and `/simple/<id>`
    pub urls: Vec<String>,
}

impl Binding {
    /// Create a binding
    pub fn new(name: impl Into<String>, descriptor: ModelDescriptor, urls: Vec<String>) -> Self {
        Self {
            name: name.into(),
            descriptor,
            urls,
        }
    }
}

/// Assembles OpenAPI documents for a set of bindings
pub struct DocumentAssembler<'a> {
    bindings: &'a [Binding],
}

impl<'a> DocumentAssembler<'a> {
    /// Create an assembler over bindings in registration order
    pub fn new(bindings: &'a [Binding]) -> Self {
        Self { bindings }
    }

    /// Assemble the document, starting from the router's base document
    pub fn assemble(&self, base: Value) -> Result<Value> {
        let Value::Object(mut document) = base else {
            return Err(GeneratorError::Generation(
                "base document is not an object".to_string(),
            ));
        };

        document.shift_remove("swagger");
        document.insert("openapi".to_string(), json!(OPENAPI_VERSION));

        let mut tags = take_array(&mut document, "tags");
        let mut paths = take_object(&mut document, "paths");
        let mut components = take_object(&mut document, "components");
        let mut schemas = take_object(&mut components, "schemas");

        for (name, fragment) in schema::shared() {
            schemas.insert(name, serde_json::to_value(fragment)?);
        }

        for binding in self.bindings {
            let descriptor = &binding.descriptor;
            descriptor.validate()?;
            debug!(
                resource = %binding.name,
                model = %descriptor.name,
                urls = binding.urls.len(),
                "Adding model to document"
            );

            tags.push(json!({ "name": descriptor.title }));

            for (name, fragment) in schema::schemas(descriptor) {
                if schemas.contains_key(&name) {
                    return Err(GeneratorError::SchemaCollision { name });
                }
                schemas.insert(name, serde_json::to_value(fragment)?);
            }

            for url in &binding.urls {
                paths::merge(&mut paths, url, descriptor)?;
            }
        }

        check_operation_ids(&paths)?;

        components.insert("schemas".to_string(), Value::Object(schemas));
        document.insert("tags".to_string(), Value::Array(tags));
        document.insert("paths".to_string(), Value::Object(paths));
        document.insert("components".to_string(), Value::Object(components));

        info!(
            models = self.bindings.len(),
            "Assembled OpenAPI {} document", OPENAPI_VERSION
        );

        Ok(Value::Object(document))
    }
}

/// Assemble a document (convenience function)
pub fn assemble(base: Value, bindings: &[Binding]) -> Result<Value> {
    DocumentAssembler::new(bindings).assemble(base)
}

fn take_object(map: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match map.shift_remove(key) {
        Some(Value::Object(object)) => object,
        _ => Map::new(),
    }
}

fn take_array(map: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match map.shift_remove(key) {
        Some(Value::Array(array)) => array,
        _ => Vec::new(),
    }
}

/// Fail when two operations anywhere in the document share an operationId
fn check_operation_ids(paths: &Map<String, Value>) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();

    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            continue;
        };
        for operation in item.values() {
            let Some(id) = operation.get("operationId").and_then(Value::as_str) else {
                continue;
            };
            if let Some(first) = seen.insert(id, path.as_str()) {
                if first != path {
                    return Err(GeneratorError::DuplicateOperationId(id.to_string()));
                }
            }
        }
    }

    Ok(())
}
