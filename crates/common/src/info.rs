//! Document metadata

use serde::{Deserialize, Serialize};

/// The `info` block of a generated document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ApiInfo {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self::new("Relations API", "0.1.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_description_omitted() {
        assert_eq!(
            serde_json::to_value(ApiInfo::default()).unwrap(),
            json!({"title": "Relations API", "version": "0.1.0"})
        );
    }
}
