//! Models file structures

use relations_openapi_common::{ApiInfo, ModelDescriptor, StaticProvider};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Root of a models file, as written
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsDocument {
    #[serde(default)]
    pub info: Option<InfoEntry>,

    #[serde(default)]
    pub models: Vec<ModelEntry>,

    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
}

/// Document metadata, as written
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InfoEntry {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// One model, as written
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelEntry {
    pub name: String,

    #[serde(default)]
    pub singular: Option<String>,

    #[serde(default)]
    pub plural: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldEntry>,

    /// Absent: defaulted; `null`: no identifier
    #[serde(default, deserialize_with = "explicit")]
    pub id: Option<Option<String>>,

    #[serde(default)]
    pub titles: Option<Vec<String>>,

    #[serde(default)]
    pub list: Option<Vec<String>>,

    #[serde(default)]
    pub order: Option<Vec<String>>,

    #[serde(default)]
    pub chunk: Option<u32>,
}

/// One field, as written
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub name: String,

    /// Kind tag or alias; inferred when absent
    #[serde(default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub readonly: bool,

    #[serde(default)]
    pub options: Option<Vec<Value>>,

    #[serde(default)]
    pub default: Option<Value>,
}

/// A resource binding declared in the models file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceEntry {
    /// Route name
    pub name: String,

    /// Name of the model the resource serves
    pub model: String,

    /// Router-style URLs; defaulted from the model's singular name when absent
    #[serde(default)]
    pub endpoints: Option<Vec<String>>,
}

/// Parsed and defaulted contents of a models file
#[derive(Debug, Clone, PartialEq)]
pub struct ModelsFile {
    pub info: ApiInfo,
    pub models: Vec<ModelDescriptor>,
    pub resources: Vec<ResourceEntry>,
}

impl ModelsFile {
    /// Look up a model by name
    pub fn model(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|model| model.name == name)
    }

    /// Descriptor provider over the file's models, in declaration order
    pub fn provider(&self) -> StaticProvider {
        self.models.iter().cloned().collect()
    }

    /// Model names, in declaration order
    pub fn model_names(&self) -> Vec<String> {
        self.models.iter().map(|model| model.name.clone()).collect()
    }
}

/// Keep an explicit `null` apart from an absent key
fn explicit<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
