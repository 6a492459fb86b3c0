//! Descriptors shared by unit tests

use relations_openapi_common::{
    DescriptorProvider, FieldDescriptor, ModelDescriptor, StaticProvider,
};
use std::sync::Arc;

pub fn simple() -> ModelDescriptor {
    ModelDescriptor {
        name: "Simple".to_string(),
        singular: "simple".to_string(),
        plural: "simples".to_string(),
        title: "Simple".to_string(),
        fields: vec![
            FieldDescriptor::new("id", "int").readonly(),
            FieldDescriptor::new("name", "str").required(),
        ],
        id: Some("id".to_string()),
        titles: vec!["name".to_string()],
        list: vec!["name".to_string()],
        order: vec!["+name".to_string()],
        chunk: 2,
    }
}

/// Plain model without an identifier
pub fn plain() -> ModelDescriptor {
    ModelDescriptor {
        name: "Plain".to_string(),
        singular: "plain".to_string(),
        plural: "plains".to_string(),
        title: "Plain".to_string(),
        fields: vec![FieldDescriptor::new("name", "str")],
        id: None,
        titles: vec!["name".to_string()],
        list: vec!["name".to_string()],
        order: vec!["+name".to_string()],
        chunk: 100,
    }
}

pub fn provider() -> Arc<dyn DescriptorProvider> {
    Arc::new([simple(), plain()].into_iter().collect::<StaticProvider>())
}
