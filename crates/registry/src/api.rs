//! Api: router plus the lazily built OpenAPI document

use crate::attach::{attach, Scope};
use crate::manifest::{Manifest, MANIFEST_URL};
use crate::router::Router;
use relations_openapi_common::{ApiInfo, DescriptorProvider, Result, Verb};
use relations_openapi_generator::{assemble, Binding, DocumentCache};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// A router with its document metadata and document cache
#[derive(Debug, Default)]
pub struct Api {
    info: ApiInfo,
    router: Router,
    cache: DocumentCache,
}

impl Api {
    /// Create an API with no routes
    pub fn new(info: ApiInfo) -> Self {
        Self {
            info,
            router: Router::new(),
            cache: DocumentCache::new(),
        }
    }

    pub fn info(&self) -> &ApiInfo {
        &self.info
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Mutable router access; drops any cached document
    pub fn router_mut(&mut self) -> &mut Router {
        self.cache.clear();
        &mut self.router
    }

    /// Attach declared and default resources, see [`attach`]
    pub fn attach(
        &mut self,
        scope: &Scope,
        provider: &Arc<dyn DescriptorProvider>,
    ) -> Result<Manifest> {
        attach(self.router_mut(), scope, provider)
    }

    /// Current bindings, reading each resource's descriptor
    pub fn bindings(&self) -> Result<Vec<Binding>> {
        self.router
            .resources()
            .map(|route| -> Result<Binding> {
                Ok(Binding::new(
                    route.name,
                    route.resource.descriptor()?,
                    route.urls.to_vec(),
                ))
            })
            .collect()
    }

    /// Assemble the document without touching the cache
    pub fn build_document(&self) -> Result<Value> {
        let bindings = self.bindings()?;
        debug!(bindings = bindings.len(), "Building OpenAPI document");
        assemble(self.router.base_document(&self.info), &bindings)
    }

    /// The OpenAPI document, built on first use and shared afterwards
    ///
    /// A failed build yields `{"error": "Unable to render schema"}` and is
    /// retried on the next call.
    pub fn schema(&self) -> Arc<Value> {
        self.cache.get(|| self.build_document())
    }

    pub fn is_schema_built(&self) -> bool {
        self.cache.is_built()
    }

    /// Body of `GET /model`
    pub fn manifest(&self) -> Option<Value> {
        self.router.respond(Verb::Get, MANIFEST_URL)
    }
}
