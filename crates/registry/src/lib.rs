//! Resource registry for relations-openapi
//!
//! Binds models to resources, registers them on a router exactly once
//! together with the `/model` manifest, and serves the assembled OpenAPI
//! document through a build-once cache.
//!
//! # Examples
//!
//! ```
//! use relations_openapi_common::{
//!     ApiInfo, DescriptorProvider, FieldDescriptor, ModelDescriptor, StaticProvider,
//! };
//! use relations_openapi_registry::{Api, Scope};
//! use std::sync::Arc;
//!
//! let simple = ModelDescriptor {
//!     name: "Simple".to_string(),
//!     singular: "simple".to_string(),
//!     plural: "simples".to_string(),
//!     title: "Simple".to_string(),
//!     fields: vec![
//!         FieldDescriptor::new("id", "int").readonly(),
//!         FieldDescriptor::new("name", "str").required(),
//!     ],
//!     id: Some("id".to_string()),
//!     titles: vec!["name".to_string()],
//!     list: vec!["name".to_string()],
//!     order: vec!["+name".to_string()],
//!     chunk: 2,
//! };
//! let provider: Arc<dyn DescriptorProvider> =
//!     Arc::new([simple].into_iter().collect::<StaticProvider>());
//!
//! let mut api = Api::new(ApiInfo::default());
//! api.attach(&Scope::new(), &provider).expect("attach");
//!
//! let schema = api.schema();
//! assert_eq!(schema["openapi"], "3.0.3");
//! ```

pub mod api;
pub mod attach;
pub mod manifest;
pub mod resource;
pub mod router;

#[cfg(test)]
mod fixtures;

pub use api::Api;
pub use attach::{attach, discover, ensure, Scope};
pub use manifest::{Manifest, ManifestEntry};
pub use resource::{default_endpoints, ModelResource, Resource};
pub use router::{ResourceRoute, Router};
