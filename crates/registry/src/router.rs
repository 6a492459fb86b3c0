//! In-memory router
//!
//! Keeps resource and static routes in registration order and produces the
//! Swagger 2.0 style base document that assembly starts from. It does not
//! dispatch requests beyond serving static `GET` bodies.

use crate::resource::Resource;
use relations_openapi_common::{
    extract_path, route_params, ApiInfo, GeneratorError, Result, Verb,
};
use serde_json::{json, Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

enum Route {
    Resource {
        resource: Arc<dyn Resource>,
        urls: Vec<String>,
    },
    Static {
        url: String,
        body: Value,
    },
}

struct RouteEntry {
    /// Lowercase endpoint name
    name: String,
    route: Route,
}

/// Resource route as registered
pub struct ResourceRoute<'a> {
    pub name: &'a str,
    pub resource: &'a Arc<dyn Resource>,
    pub urls: &'a [String],
}

/// Routes by lowercase endpoint name, in registration order
#[derive(Default)]
pub struct Router {
    routes: Vec<RouteEntry>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.routes.iter().position(|entry| entry.name == name)
    }

    fn check_url(name: &str, url: &str) -> Result<()> {
        if !url.starts_with('/') {
            return Err(GeneratorError::Registration(format!(
                "URL {} of {} must start with /",
                url, name
            )));
        }
        Ok(())
    }

    /// Whether an endpoint with this name exists, ignoring case
    pub fn has_endpoint(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Endpoint names, in registration order
    pub fn endpoints(&self) -> Vec<&str> {
        self.routes.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Register a resource on the given URLs
    ///
    /// Fails when an endpoint with the same name, ignoring case, exists.
    pub fn add_resource(&mut self, resource: Arc<dyn Resource>, urls: Vec<String>) -> Result<()> {
        let name = resource.name().to_lowercase();
        if self.has_endpoint(&name) {
            return Err(GeneratorError::Registration(format!(
                "Endpoint {} already registered",
                name
            )));
        }
        if urls.is_empty() {
            return Err(GeneratorError::Registration(format!(
                "Resource {} has no URLs",
                name
            )));
        }
        for url in &urls {
            Self::check_url(&name, url)?;
        }

        debug!(endpoint = %name, urls = ?urls, "Added resource route");
        self.routes.push(RouteEntry {
            name,
            route: Route::Resource { resource, urls },
        });
        Ok(())
    }

    /// Register a static `GET` route, or replace the existing one in place
    pub fn set_static(&mut self, name: &str, url: &str, body: Value) -> Result<()> {
        Self::check_url(name, url)?;

        let route = Route::Static {
            url: url.to_string(),
            body,
        };

        match self.position(name) {
            Some(index) => {
                if matches!(self.routes[index].route, Route::Resource { .. }) {
                    return Err(GeneratorError::Registration(format!(
                        "Endpoint {} is a resource route",
                        name.to_lowercase()
                    )));
                }
                self.routes[index].route = route;
            }
            None => {
                debug!(endpoint = %name.to_lowercase(), url, "Added static route");
                self.routes.push(RouteEntry {
                    name: name.to_lowercase(),
                    route,
                });
            }
        }

        Ok(())
    }

    /// Body of a static route
    pub fn static_body(&self, name: &str) -> Option<&Value> {
        self.position(name)
            .and_then(|index| match &self.routes[index].route {
                Route::Static { body, .. } => Some(body),
                Route::Resource { .. } => None,
            })
    }

    /// Resource routes, in registration order
    pub fn resources(&self) -> impl Iterator<Item = ResourceRoute<'_>> {
        self.routes.iter().filter_map(|entry| match &entry.route {
            Route::Resource { resource, urls } => Some(ResourceRoute {
                name: &entry.name,
                resource,
                urls,
            }),
            Route::Static { .. } => None,
        })
    }

    /// Answer a request from a static route
    ///
    /// Only `GET` on a static URL is served; anything else is `None`.
    pub fn respond(&self, verb: Verb, path: &str) -> Option<Value> {
        if verb != Verb::Get {
            return None;
        }
        self.routes.iter().find_map(|entry| match &entry.route {
            Route::Static { url, body } if url == path => Some(body.clone()),
            _ => None,
        })
    }

    /// Swagger 2.0 style document seeding every route's operations
    pub fn base_document(&self, info: &ApiInfo) -> Value {
        let mut paths = Map::new();

        for entry in &self.routes {
            match &entry.route {
                Route::Resource { urls, .. } => {
                    for url in urls {
                        if let Some(item) = path_item(&mut paths, url) {
                            for verb in Verb::ORDER {
                                item.insert(verb.as_str().to_string(), seed(verb, &entry.name));
                            }
                        }
                    }
                }
                Route::Static { url, .. } => {
                    if let Some(item) = path_item(&mut paths, url) {
                        item.insert(Verb::Get.as_str().to_string(), seed(Verb::Get, &entry.name));
                    }
                }
            }
        }

        json!({
            "swagger": "2.0",
            "basePath": "/",
            "info": info,
            "produces": ["application/json"],
            "consumes": ["application/json"],
            "tags": [],
            "paths": paths,
        })
    }
}

/// Path item for a router URL, created with its path-level parameters
fn path_item<'m>(
    paths: &'m mut Map<String, Value>,
    url: &str,
) -> Option<&'m mut Map<String, Value>> {
    let entry = paths.entry(extract_path(url)).or_insert_with(|| {
        let mut item = Map::new();
        let parameters: Vec<Value> = route_params(url)
            .into_iter()
            .map(|param| {
                let param_type = match param.converter.as_deref() {
                    Some("int") => "integer",
                    Some("float") => "number",
                    _ => "string",
                };
                json!({
                    "name": param.name,
                    "in": "path",
                    "required": true,
                    "type": param_type,
                })
            })
            .collect();
        if !parameters.is_empty() {
            item.insert("parameters".to_string(), Value::Array(parameters));
        }
        Value::Object(item)
    });

    entry.as_object_mut()
}

fn seed(verb: Verb, endpoint: &str) -> Value {
    json!({
        "operationId": format!("{}_{}", verb.as_str(), endpoint),
        "responses": {"200": {"description": "Success"}},
        "x-endpoint": endpoint,
    })
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("endpoints", &self.endpoints())
            .finish()
    }
}
