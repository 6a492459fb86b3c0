//! Integration test for the models file parser

use relations_openapi_common::{DescriptorProvider, FieldKind};
use relations_openapi_parser::{parse_models_file, ModelsParser};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const PEOPLE_YAML: &str = r#"
info:
  title: People API
  version: 1.2.0
  description: People and their stuff
models:
  - name: Person
    chunk: 2
    fields:
      - {name: id, kind: int, readonly: true}
      - {name: name, kind: str, required: true}
      - {name: status, options: [active, inactive], default: active}
  - name: Stuff
    id: null
    fields:
      - {name: person_id, kind: int}
      - {name: name, kind: str}
      - {name: items, kind: list}
  - name: Meta
    fields:
      - {name: id, kind: integer}
      - {name: name, kind: string}
      - {name: flag, kind: boolean}
      - {name: spend, kind: number}
      - {name: people, kind: set, options: [tom, mary]}
      - {name: stuff, kind: array}
      - {name: things, kind: object}
resources:
  - {name: people, model: Person, endpoints: ["/people", "/people/<int:id>"]}
"#;

#[test]
fn test_parse_people_yaml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("models.yaml");
    fs::write(&path, PEOPLE_YAML).unwrap();

    let models = parse_models_file(&path).unwrap();

    assert_eq!(models.info.title, "People API");
    assert_eq!(models.info.version, "1.2.0");
    assert_eq!(models.info.description.as_deref(), Some("People and their stuff"));
    assert_eq!(models.model_names(), vec!["Person", "Stuff", "Meta"]);

    let person = models.model("Person").unwrap();
    assert_eq!(person.singular, "person");
    assert_eq!(person.plural, "persons");
    assert_eq!(person.chunk, 2);
    assert_eq!(person.id.as_deref(), Some("id"));
    assert_eq!(person.order, vec!["+name"]);

    let status = person.field("status").unwrap();
    assert_eq!(status.kind, FieldKind::String);
    assert_eq!(status.default, Some(json!("active")));

    let stuff = models.model("Stuff").unwrap();
    assert_eq!(stuff.id, None);
    assert_eq!(stuff.titles, vec!["person_id"]);

    let meta = models.model("Meta").unwrap();
    let kinds: Vec<&str> = meta.fields.iter().map(|field| field.kind.as_str()).collect();
    assert_eq!(kinds, vec!["int", "str", "bool", "float", "set", "list", "dict"]);

    assert_eq!(models.resources.len(), 1);
    assert_eq!(models.resources[0].model, "Person");
    assert_eq!(
        models.resources[0].endpoints,
        Some(vec!["/people".to_string(), "/people/<int:id>".to_string()])
    );
}

#[test]
fn test_parse_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("models.json");
    fs::write(
        &path,
        r#"{"models": [{"name": "Simple", "chunk": 2, "fields": [
            {"name": "id", "kind": "int", "readonly": true},
            {"name": "name", "kind": "str", "required": true}
        ]}]}"#,
    )
    .unwrap();

    let models = parse_models_file(&path).unwrap();
    let provider = models.provider();

    assert_eq!(provider.models(), vec!["Simple"]);
    let simple = provider.descriptor("Simple").unwrap();
    assert_eq!(simple.titles, vec!["name"]);
    assert_eq!(simple.chunk, 2);
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = parse_models_file(temp_dir.path().join("absent.yaml"));
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to read models file"));
}

#[test]
fn test_resource_for_unknown_model() {
    let parser = ModelsParser::from_yaml(
        "models:\n  - name: Simple\n    fields: [{name: name}]\nresources:\n  - {name: other, model: Other}\n",
    )
    .unwrap();
    let err = parser.parse().unwrap_err();
    assert!(err.to_string().contains("unknown model Other"));
}

#[test]
fn test_duplicate_model() {
    let parser = ModelsParser::from_yaml(
        "models:\n  - {name: Simple, fields: [{name: name}]}\n  - {name: Simple, fields: [{name: name}]}\n",
    )
    .unwrap();
    assert!(parser.parse().is_err());
}
