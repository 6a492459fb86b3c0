//! Model and field descriptors
//!
//! A descriptor is a read-only snapshot of a model's structural metadata,
//! taken from a [`DescriptorProvider`] when resources are registered or a
//! document is assembled.

use crate::{GeneratorError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Primitive kind tag of a field
///
/// Unrecognized tags are kept verbatim in [`FieldKind::Other`] so that a
/// document can still be produced for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    Float,
    /// Multi-valued enumeration
    Set,
    List,
    Dict,
    Other(String),
}

impl FieldKind {
    /// The tag as it appears in descriptors and in record schemas
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::String => "str",
            FieldKind::Integer => "int",
            FieldKind::Boolean => "bool",
            FieldKind::Float => "float",
            FieldKind::Set => "set",
            FieldKind::List => "list",
            FieldKind::Dict => "dict",
            FieldKind::Other(tag) => tag,
        }
    }

    /// Whether examples for this kind are sequences of options
    pub fn is_multi(&self) -> bool {
        matches!(self, FieldKind::Set)
    }
}

impl From<&str> for FieldKind {
    fn from(tag: &str) -> Self {
        match tag {
            "str" => FieldKind::String,
            "int" => FieldKind::Integer,
            "bool" => FieldKind::Boolean,
            "float" => FieldKind::Float,
            "set" => FieldKind::Set,
            "list" => FieldKind::List,
            "dict" => FieldKind::Dict,
            other => FieldKind::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldKind {
    fn from(tag: String) -> Self {
        FieldKind::from(tag.as_str())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural metadata of one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,

    /// Kind tag
    pub kind: FieldKind,

    /// Whether a value must be supplied
    #[serde(default)]
    pub required: bool,

    /// Whether the field is computed by the store and never written by callers
    #[serde(default)]
    pub readonly: bool,

    /// Allowed values, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,

    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldDescriptor {
    /// Create an optional, writable field without options or default
    pub fn new(name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            required: false,
            readonly: false,
            options: None,
            default: None,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as readonly
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Set the allowed values
    pub fn with_options(mut self, options: Vec<Value>) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Structural metadata of one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Model identity, also the name of its default resource binding
    pub name: String,

    /// Singular name, e.g. "person"
    pub singular: String,

    /// Plural name, e.g. "persons"
    pub plural: String,

    /// Display title, e.g. "Person"
    pub title: String,

    /// Fields, in declaration order
    pub fields: Vec<FieldDescriptor>,

    /// Identifier field, if the model has one
    #[serde(default)]
    pub id: Option<String>,

    /// Fields used to title a record
    #[serde(default)]
    pub titles: Vec<String>,

    /// Fields shown when listing records
    #[serde(default)]
    pub list: Vec<String>,

    /// Default sort tokens, "+field" or "-field"
    #[serde(default)]
    pub order: Vec<String>,

    /// Page size used for pagination
    pub chunk: u32,
}

impl ModelDescriptor {
    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Names of the seven schema fragments generated for this model
    ///
    /// Record, single envelope, list envelope, then the filter, sort, limit
    /// and count envelopes.
    pub fn fragment_names(&self) -> [String; 7] {
        [
            self.title.clone(),
            self.singular.clone(),
            self.plural.clone(),
            format!("{}_filter", self.singular),
            format!("{}_sort", self.singular),
            format!("{}_limit", self.singular),
            format!("{}_count", self.singular),
        ]
    }

    /// Check the descriptor is usable for generation
    ///
    /// Fragment names that coincide (a title equal to the singular, say)
    /// are reported as [`GeneratorError::SchemaCollision`].
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| GeneratorError::InvalidDescriptor {
            model: self.name.clone(),
            reason,
        };

        for (label, value) in [
            ("singular", &self.singular),
            ("plural", &self.plural),
            ("title", &self.title),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(format!("{} name is empty", label)));
            }
        }

        let mut fragments = HashSet::new();
        for name in self.fragment_names() {
            if fragments.contains(&name) {
                return Err(GeneratorError::SchemaCollision { name });
            }
            fragments.insert(name);
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(invalid(format!("field {} declared twice", field.name)));
            }
        }

        if let Some(id) = &self.id {
            if self.field(id).is_none() {
                return Err(invalid(format!("identifier {} is not a field", id)));
            }
        }

        for token in &self.order {
            if !(token.starts_with('+') || token.starts_with('-')) || token.len() < 2 {
                return Err(invalid(format!("sort token {:?} needs a +/- prefix", token)));
            }
        }

        if self.chunk == 0 {
            return Err(invalid("chunk must be positive".to_string()));
        }

        Ok(())
    }
}

/// Supplies descriptors for models
///
/// Implementations may consult live metadata, so `descriptor` can fail.
pub trait DescriptorProvider: Send + Sync {
    /// Names of every model the provider knows, in declaration order
    fn models(&self) -> Vec<String>;

    /// Snapshot of one model's metadata
    fn descriptor(&self, model: &str) -> Result<ModelDescriptor>;
}

/// Provider over a fixed set of descriptors
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    models: IndexMap<String, ModelDescriptor>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor, replacing any earlier one with the same model name
    pub fn insert(&mut self, descriptor: ModelDescriptor) {
        self.models.insert(descriptor.name.clone(), descriptor);
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl FromIterator<ModelDescriptor> for StaticProvider {
    fn from_iter<I: IntoIterator<Item = ModelDescriptor>>(iter: I) -> Self {
        let mut provider = Self::new();
        for descriptor in iter {
            provider.insert(descriptor);
        }
        provider
    }
}

impl DescriptorProvider for StaticProvider {
    fn models(&self) -> Vec<String> {
        self.models.keys().cloned().collect()
    }

    fn descriptor(&self, model: &str) -> Result<ModelDescriptor> {
        self.models
            .get(model)
            .cloned()
            .ok_or_else(|| GeneratorError::Provider {
                model: model.to_string(),
                message: "unknown model".to_string(),
            })
    }
}
