//! Resources bound to models

use relations_openapi_common::{DescriptorProvider, ModelDescriptor, Result};
use std::fmt;
use std::sync::Arc;

/// A request-handling resource serving one model
///
/// The registry only needs its identity, its model's descriptor and the
/// URLs it answers on; request handling itself happens elsewhere.
pub trait Resource: Send + Sync {
    /// Route name
    fn name(&self) -> &str;

    /// Name of the model the resource serves
    fn model(&self) -> &str;

    /// Current descriptor of the model
    fn descriptor(&self) -> Result<ModelDescriptor>;

    /// Router-style URLs: the collection path, plus the item path when the
    /// model has an identifier
    fn endpoints(&self, descriptor: &ModelDescriptor) -> Vec<String> {
        default_endpoints(descriptor)
    }
}

/// `/{singular}` and, with an identifier, `/{singular}/<{id}>`
pub fn default_endpoints(descriptor: &ModelDescriptor) -> Vec<String> {
    let collection = format!("/{}", descriptor.singular);
    match &descriptor.id {
        Some(id) => vec![collection.clone(), format!("{}/<{}>", collection, id)],
        None => vec![collection],
    }
}

/// Resource reading its descriptor from a provider
#[derive(Clone)]
pub struct ModelResource {
    name: String,
    model: String,
    provider: Arc<dyn DescriptorProvider>,
    endpoints: Option<Vec<String>>,
}

impl ModelResource {
    /// Create a resource named after the model
    pub fn new(model: impl Into<String>, provider: Arc<dyn DescriptorProvider>) -> Self {
        let model = model.into();
        Self {
            name: model.clone(),
            model,
            provider,
            endpoints: None,
        }
    }

    /// Use a route name other than the model name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Serve explicit URLs instead of the defaults
    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = Some(endpoints);
        self
    }
}

impl fmt::Debug for ModelResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelResource")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl Resource for ModelResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn descriptor(&self) -> Result<ModelDescriptor> {
        self.provider.descriptor(&self.model)
    }

    fn endpoints(&self, descriptor: &ModelDescriptor) -> Vec<String> {
        self.endpoints
            .clone()
            .unwrap_or_else(|| default_endpoints(descriptor))
    }
}
