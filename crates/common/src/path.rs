//! Path templates and HTTP verbs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Router-style placeholder, optionally typed: `<id>` or `<int:id>`
static ROUTE_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(?:([^:<>]+):)?([^<>]+)>").expect("placeholder regex is valid"));

/// Placeholder in a router template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParam {
    pub name: String,
    /// Converter prefix, e.g. `int` in `<int:id>`
    pub converter: Option<String>,
}

/// Placeholders of a router template, in order
pub fn route_params(url: &str) -> Vec<RouteParam> {
    ROUTE_PLACEHOLDER
        .captures_iter(url)
        .map(|captures| RouteParam {
            name: captures[2].to_string(),
            converter: captures.get(1).map(|converter| converter.as_str().to_string()),
        })
        .collect()
}

/// Convert a router template into an OpenAPI path template
///
/// # Examples
/// ```
/// use relations_openapi_common::extract_path;
///
/// assert_eq!(extract_path("/simple/<id>"), "/simple/{id}");
/// assert_eq!(extract_path("/simple/<int:id>"), "/simple/{id}");
/// assert_eq!(extract_path("/simple"), "/simple");
/// ```
pub fn extract_path(url: &str) -> String {
    ROUTE_PLACEHOLDER.replace_all(url, "{$2}").into_owned()
}

/// Classification of a path template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathShape {
    /// No identifier placeholder, addresses many records
    Collection,
    /// Identifier placeholder, addresses one record
    Item,
}

impl PathShape {
    /// Classify an OpenAPI path template by its placeholders
    pub fn of(path: &str) -> Self {
        if path.contains('{') {
            PathShape::Item
        } else {
            PathShape::Collection
        }
    }
}

/// HTTP verbs a resource answers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verb {
    Options,
    Post,
    Get,
    Patch,
    Delete,
}

impl Verb {
    /// Order in which verbs are visited when routing a path
    pub const ORDER: [Verb; 5] = [
        Verb::Options,
        Verb::Post,
        Verb::Get,
        Verb::Patch,
        Verb::Delete,
    ];

    /// Lowercase key used in OpenAPI path items
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Options => "options",
            Verb::Post => "post",
            Verb::Get => "get",
            Verb::Patch => "patch",
            Verb::Delete => "delete",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}
