//! Converter from models file entries to descriptors
//!
//! Fills in every value the file leaves out and validates the result.

use super::types::{FieldEntry, InfoEntry, ModelEntry, ModelsDocument, ModelsFile};
use crate::type_mapper::TypeMapper;
use relations_openapi_common::{
    ApiInfo, FieldDescriptor, GeneratorError, ModelDescriptor, Result,
};
use std::collections::HashSet;

/// Page size used when a model does not declare one
pub const DEFAULT_CHUNK: u32 = 100;

/// Convert a parsed models document into defaulted descriptors
pub fn convert_models_document(document: ModelsDocument) -> Result<ModelsFile> {
    let info = convert_info(document.info.unwrap_or_default());

    let mut models = Vec::with_capacity(document.models.len());
    let mut names = HashSet::new();
    for entry in document.models {
        if !names.insert(entry.name.clone()) {
            return Err(GeneratorError::Parse(format!(
                "Model {} declared twice",
                entry.name
            )));
        }
        models.push(convert_model(entry)?);
    }

    let mut resources = HashSet::new();
    for resource in &document.resources {
        if !names.contains(&resource.model) {
            return Err(GeneratorError::Parse(format!(
                "Resource {} refers to unknown model {}",
                resource.name, resource.model
            )));
        }
        if !resources.insert(resource.name.to_lowercase()) {
            return Err(GeneratorError::Parse(format!(
                "Resource {} declared twice",
                resource.name
            )));
        }
    }

    Ok(ModelsFile {
        info,
        models,
        resources: document.resources,
    })
}

fn convert_info(entry: InfoEntry) -> ApiInfo {
    let defaults = ApiInfo::default();
    ApiInfo {
        title: entry.title.unwrap_or(defaults.title),
        version: entry.version.unwrap_or(defaults.version),
        description: entry.description,
    }
}

/// Convert one model entry, filling in defaults
pub fn convert_model(entry: ModelEntry) -> Result<ModelDescriptor> {
    if entry.name.trim().is_empty() {
        return Err(GeneratorError::Parse("Model name is empty".to_string()));
    }

    let fields: Vec<FieldDescriptor> = entry.fields.into_iter().map(convert_field).collect();

    let singular = entry.singular.unwrap_or_else(|| snake_case(&entry.name));
    let plural = entry.plural.unwrap_or_else(|| format!("{}s", singular));
    let title = entry.title.unwrap_or_else(|| entry.name.clone());

    let id = match entry.id {
        Some(explicit) => explicit,
        None => fields
            .iter()
            .any(|field| field.name == "id")
            .then(|| "id".to_string()),
    };

    let titles = entry.titles.unwrap_or_else(|| {
        fields
            .iter()
            .find(|field| Some(&field.name) != id.as_ref())
            .map(|field| vec![field.name.clone()])
            .unwrap_or_default()
    });
    let list = entry.list.unwrap_or_else(|| titles.clone());
    let order = entry
        .order
        .unwrap_or_else(|| titles.iter().map(|name| format!("+{}", name)).collect());

    let descriptor = ModelDescriptor {
        name: entry.name,
        singular,
        plural,
        title,
        fields,
        id,
        titles,
        list,
        order,
        chunk: entry.chunk.unwrap_or(DEFAULT_CHUNK),
    };

    descriptor.validate()?;
    Ok(descriptor)
}

fn convert_field(entry: FieldEntry) -> FieldDescriptor {
    let kind = match entry.kind.as_deref() {
        Some(kind) => TypeMapper::map_kind(kind),
        None => TypeMapper::infer_kind(entry.default.as_ref(), entry.options.as_deref()),
    };

    FieldDescriptor {
        name: entry.name,
        kind,
        required: entry.required,
        readonly: entry.readonly,
        options: entry.options,
        default: entry.default,
    }
}

/// Convert a model name to snake case
///
/// # Examples
/// ```
/// use relations_openapi_parser::models::snake_case;
///
/// assert_eq!(snake_case("Person"), "person");
/// assert_eq!(snake_case("PersonRole"), "person_role");
/// assert_eq!(snake_case("HTTPServer"), "http_server");
/// ```
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.trim().chars().collect();
    let mut snake = String::with_capacity(chars.len() + 4);

    for (index, &c) in chars.iter().enumerate() {
        if c == ' ' || c == '-' || c == '_' {
            if !snake.is_empty() && !snake.ends_with('_') {
                snake.push('_');
            }
            continue;
        }

        if c.is_uppercase() && index > 0 && !snake.ends_with('_') {
            let previous = chars[index - 1];
            let next_lower = chars.get(index + 1).is_some_and(|next| next.is_lowercase());
            if previous.is_lowercase()
                || previous.is_ascii_digit()
                || (previous.is_uppercase() && next_lower)
            {
                snake.push('_');
            }
        }

        snake.extend(c.to_lowercase());
    }

    snake
}
