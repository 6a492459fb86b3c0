//! Models file parser

use super::converter::convert_models_document;
use super::types::{ModelsDocument, ModelsFile};
use relations_openapi_common::{GeneratorError, Result};
use std::fs;
use std::path::Path;

/// Serialization format of a models file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelsFormat {
    Json,
    Yaml,
}

impl ModelsFormat {
    /// Detect the format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("json") => ModelsFormat::Json,
            _ => ModelsFormat::Yaml,
        }
    }
}

/// Models file parser
///
/// Reads a models file and converts it into descriptors and declared
/// resource bindings.
pub struct ModelsParser {
    document: ModelsDocument,
}

impl ModelsParser {
    /// Load a models file, detecting its format from the extension
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = ModelsParser::from_file("models.yaml")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read models file {}: {}",
                path.display(),
                e
            ))
        })?;

        match ModelsFormat::from_path(path) {
            ModelsFormat::Json => Self::from_json(&content),
            ModelsFormat::Yaml => Self::from_yaml(&content),
        }
    }

    /// Parse a models file from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let document: ModelsDocument = serde_json::from_str(json)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse models JSON: {}", e)))?;

        Ok(Self { document })
    }

    /// Parse a models file from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: ModelsDocument = serde_yaml::from_str(yaml)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse models YAML: {}", e)))?;

        Ok(Self { document })
    }

    /// Convert into defaulted, validated descriptors
    pub fn parse(&self) -> Result<ModelsFile> {
        convert_models_document(self.document.clone())
    }
}
