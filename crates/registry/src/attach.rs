//! Resource registry
//!
//! Collects explicitly declared resources, creates default resources for the
//! remaining models, and registers all of them on a router together with the
//! `/model` manifest. Attaching is idempotent: routes that already exist are
//! skipped, never duplicated.

use crate::manifest::{Manifest, ManifestEntry, MANIFEST_NAME, MANIFEST_URL};
use crate::resource::{ModelResource, Resource};
use crate::router::Router;
use relations_openapi_common::{DescriptorProvider, ModelDescriptor, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Resources declared for registration, in declaration order
#[derive(Default, Clone)]
pub struct Scope {
    resources: Vec<Arc<dyn Resource>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a resource
    pub fn register<R: Resource + 'static>(&mut self, resource: R) -> &mut Self {
        self.resources.push(Arc::new(resource));
        self
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Whether a declared resource serves this model
    pub fn covers(&self, model: &str) -> bool {
        self.resources.iter().any(|resource| resource.model() == model)
    }
}

/// Resources declared in the scope
pub fn discover(scope: &Scope) -> Vec<Arc<dyn Resource>> {
    scope.resources.clone()
}

/// Default resources for every model no declared resource serves
///
/// Each is named after its model; a model listed twice gets one resource.
pub fn ensure(scope: &Scope, provider: &Arc<dyn DescriptorProvider>) -> Vec<Arc<dyn Resource>> {
    let mut seen = HashSet::new();

    provider
        .models()
        .into_iter()
        .filter(|model| !scope.covers(model) && seen.insert(model.clone()))
        .map(|model| {
            Arc::new(ModelResource::new(model, Arc::clone(provider))) as Arc<dyn Resource>
        })
        .collect()
}

/// Register the manifest and every resource on the router
///
/// Declared resources come first, then defaults. A resource whose name is
/// already an endpoint (ignoring case) is skipped, and a model already in the
/// manifest is not listed again. Every descriptor is read before the router
/// changes, so a provider failure leaves the router untouched. Returns the
/// manifest as served.
pub fn attach(
    router: &mut Router,
    scope: &Scope,
    provider: &Arc<dyn DescriptorProvider>,
) -> Result<Manifest> {
    let described = discover(scope)
        .into_iter()
        .chain(ensure(scope, provider))
        .map(|resource| -> Result<(Arc<dyn Resource>, ModelDescriptor)> {
            let descriptor = resource.descriptor()?;
            Ok((resource, descriptor))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut manifest = Manifest::from_body(router.static_body(MANIFEST_NAME));
    for (_, descriptor) in &described {
        manifest.add(ManifestEntry::from(descriptor));
    }
    router.set_static(MANIFEST_NAME, MANIFEST_URL, manifest.to_value())?;

    let mut registered = 0;
    for (resource, descriptor) in described {
        if router.has_endpoint(resource.name()) {
            debug!(
                resource = resource.name(),
                "Endpoint already registered, skipping"
            );
            continue;
        }

        let urls = resource.endpoints(&descriptor);
        router.add_resource(resource, urls)?;
        registered += 1;
    }

    info!(
        registered,
        models = manifest.len(),
        "Attached resources"
    );

    Ok(manifest)
}
