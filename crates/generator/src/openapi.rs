//! OpenAPI 3.0 fragments produced by the generator
//!
//! Simplified representation covering what the schema and operation
//! builders emit. Maps are insertion ordered so documents render stably.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of every schema reference
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Media type of every body the generator describes
pub const JSON: &str = "application/json";

/// JSON-schema-shaped fragment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Reference to a named schema
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Type: object, array, integer, ... or a field kind tag
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Items schema (for array type)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(rename = "readOnly", default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,

    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Schema>,
}

impl Schema {
    /// Reference to a schema in `components.schemas`
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("{}{}", SCHEMA_REF_PREFIX, name)),
            ..Self::default()
        }
    }

    /// Schema with only a type
    pub fn typed(schema_type: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            ..Self::default()
        }
    }

    /// Object schema with the given properties
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self {
            schema_type: Some("object".to_string()),
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
            ..Self::default()
        }
    }

    /// Array schema of the given items
    pub fn array(items: Schema) -> Self {
        Self {
            schema_type: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    /// Union where exactly one branch applies
    pub fn one_of(branches: Vec<Schema>) -> Self {
        Self {
            one_of: branches,
            ..Self::default()
        }
    }

    /// Union where any branches apply
    pub fn any_of(branches: Vec<Schema>) -> Self {
        Self {
            any_of: branches,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Name of the schema this fragment references, if it is a reference
    pub fn referenced_name(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .and_then(|reference| reference.strip_prefix(SCHEMA_REF_PREFIX))
    }

    /// Every schema name referenced anywhere in this fragment
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        if let Some(name) = self.referenced_name() {
            names.push(name);
        }
        for schema in self.properties.values() {
            schema.collect_references(names);
        }
        if let Some(items) = &self.items {
            items.collect_references(names);
        }
        for schema in self.one_of.iter().chain(&self.any_of) {
            schema.collect_references(names);
        }
    }
}

/// Named example payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub value: Value,
}

/// Named examples, in presentation order
pub type Examples = IndexMap<String, Example>;

/// Schema and examples for one media type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: Examples,
}

/// Request body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Content types
    pub content: IndexMap<String, MediaType>,
}

impl RequestBody {
    /// JSON body with a schema and named examples
    pub fn json(schema: Schema, examples: Examples) -> Self {
        Self {
            content: IndexMap::from([(
                JSON.to_string(),
                MediaType {
                    schema: Some(schema),
                    examples,
                },
            )]),
        }
    }
}

/// Response for one status code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,

    /// Content types
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    /// Response without a body
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: IndexMap::new(),
        }
    }

    /// Response with a JSON body
    pub fn json(description: impl Into<String>, schema: Schema, examples: Examples) -> Self {
        Self {
            description: description.into(),
            content: IndexMap::from([(
                JSON.to_string(),
                MediaType {
                    schema: Some(schema),
                    examples,
                },
            )]),
        }
    }
}

/// Query parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Location: query, header, path, cookie
    #[serde(rename = "in")]
    pub location: String,

    pub schema: Schema,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,

    pub name: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: Examples,
}

impl Parameter {
    /// Free-form query object, exploded into individual query parameters
    pub fn query_params(examples: Examples) -> Self {
        Self {
            location: "query".to_string(),
            schema: Schema::typed("object"),
            style: Some("form".to_string()),
            explode: Some(true),
            name: "params".to_string(),
            examples,
        }
    }
}

/// Generated description of one (path shape, verb) combination
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Tags (for grouping)
    pub tags: Vec<String>,

    /// Operation ID (unique identifier)
    #[serde(rename = "operationId")]
    pub operation_id: String,

    pub summary: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(rename = "requestBody", default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,

    /// Responses keyed by status code
    pub responses: IndexMap<String, Response>,
}

/// Build named examples from (name, value) pairs
pub fn examples<I, K>(pairs: I) -> Examples
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), Example { value }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_serializes() {
        let schema = Schema::reference("Simple");
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"$ref": "#/components/schemas/Simple"})
        );
        assert_eq!(schema.referenced_name(), Some("Simple"));
    }

    #[test]
    fn test_empty_items_render_as_empty_object() {
        let schema = Schema::array(Schema::default());
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"type": "array", "items": {}})
        );
    }

    #[test]
    fn test_references_walks_nested() {
        let schema = Schema::one_of(vec![
            Schema::reference("simple"),
            Schema::object([("simples", Schema::array(Schema::reference("Simple")))]),
            Schema::any_of(vec![Schema::reference("simple_sort")]),
        ]);
        assert_eq!(schema.references(), vec!["simple", "Simple", "simple_sort"]);
    }

    #[test]
    fn test_response_without_content() {
        assert_eq!(
            serde_json::to_value(Response::described("simple not found")).unwrap(),
            json!({"description": "simple not found"})
        );
    }
}
