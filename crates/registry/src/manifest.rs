//! The `/model` manifest listing every bound model

use relations_openapi_common::ModelDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Route name of the manifest endpoint
pub const MANIFEST_NAME: &str = "model";

/// URL of the manifest endpoint
pub const MANIFEST_URL: &str = "/model";

/// Display metadata of one bound model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: Option<String>,
    pub titles: Vec<String>,
    pub title: String,
    pub singular: String,
    pub plural: String,
    pub list: Vec<String>,
}

impl From<&ModelDescriptor> for ManifestEntry {
    fn from(descriptor: &ModelDescriptor) -> Self {
        Self {
            id: descriptor.id.clone(),
            titles: descriptor.titles.clone(),
            title: descriptor.title.clone(),
            singular: descriptor.singular.clone(),
            plural: descriptor.plural.clone(),
            list: descriptor.list.clone(),
        }
    }
}

/// Body of `GET /model`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub models: Vec<ManifestEntry>,
}

impl Manifest {
    /// Read a manifest back from a served body, empty when it is not one
    pub fn from_body(body: Option<&Value>) -> Self {
        body.and_then(|body| serde_json::from_value(body.clone()).ok())
            .unwrap_or_default()
    }

    /// Add an entry unless a model with the same singular name is listed
    pub fn add(&mut self, entry: ManifestEntry) -> bool {
        if self.contains(&entry.singular) {
            return false;
        }
        self.models.push(entry);
        true
    }

    pub fn contains(&self, singular: &str) -> bool {
        self.models.iter().any(|entry| entry.singular == singular)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({ "models": self.models })
    }
}
