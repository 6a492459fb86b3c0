//! Descriptors shared by the unit tests

use crate::{FieldDescriptor, ModelDescriptor};

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
