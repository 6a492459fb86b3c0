//! Example value synthesis
//!
//! Turns field descriptors into representative values for request and
//! response examples.

use relations_openapi_common::{FieldDescriptor, FieldKind, ModelDescriptor};
use serde_json::{json, Map, Value};

/// Representative value for a field
///
/// Precedence: the default, then the first option (wrapped in a sequence for
/// multi-valued kinds), then the zero value of the kind. Kinds without a
/// zero value yield `null`.
///
/// # Examples
/// ```
/// use relations_openapi_common::FieldDescriptor;
/// use relations_openapi_generator::example;
/// use serde_json::json;
///
/// let field = FieldDescriptor::new("people", "set").with_options(vec![json!(1), json!(2)]);
/// assert_eq!(example::value(&field), json!([1]));
/// ```
pub fn value(field: &FieldDescriptor) -> Value {
    if let Some(default) = &field.default {
        return default.clone();
    }

    if let Some(first) = field.options.as_ref().and_then(|options| options.first()) {
        return if field.kind.is_multi() {
            json!([first])
        } else {
            first.clone()
        };
    }

    match field.kind {
        FieldKind::String => json!(""),
        FieldKind::Integer => json!(0),
        FieldKind::Boolean => json!(false),
        FieldKind::Float => json!(0.0),
        _ => Value::Null,
    }
}

/// Example record for a model
///
/// Readonly fields are only included when `include_readonly` is set, which
/// is how records look in responses rather than requests.
pub fn record(descriptor: &ModelDescriptor, include_readonly: bool) -> Map<String, Value> {
    descriptor
        .fields
        .iter()
        .filter(|field| include_readonly || !field.readonly)
        .map(|field| (field.name.clone(), value(field)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::simple;

    #[test]
    fn test_default_wins() {
        let field = FieldDescriptor::new("count", "int")
            .with_options(vec![json!(1), json!(2)])
            .with_default(json!(1));
        assert_eq!(value(&field), json!(1));

        let field = FieldDescriptor::new("odd", "nope").with_default(json!("x"));
        assert_eq!(value(&field), json!("x"));
    }

    #[test]
    fn test_first_option() {
        let field = FieldDescriptor::new("people", "set").with_options(vec![json!(1), json!(2), json!(3)]);
        assert_eq!(value(&field), json!([1]));

        let field = FieldDescriptor::new("count", "int").with_options(vec![json!(1), json!(2), json!(3)]);
        assert_eq!(value(&field), json!(1));

        let field = FieldDescriptor::new("status", "str").with_options(vec![json!("active")]);
        assert_eq!(value(&field), json!("active"));
    }

    #[test]
    fn test_empty_options_fall_back_to_kind() {
        let field = FieldDescriptor::new("count", "int").with_options(vec![]);
        assert_eq!(value(&field), json!(0));
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(value(&FieldDescriptor::new("a", "str")), json!(""));
        assert_eq!(value(&FieldDescriptor::new("a", "int")), json!(0));
        assert_eq!(value(&FieldDescriptor::new("a", "bool")), json!(false));
        assert_eq!(value(&FieldDescriptor::new("a", "float")), json!(0.0));
    }

    #[test]
    fn test_unknown_kind_is_null() {
        assert_eq!(value(&FieldDescriptor::new("a", "nope")), Value::Null);
        assert_eq!(value(&FieldDescriptor::new("a", "set")), Value::Null);
        assert_eq!(value(&FieldDescriptor::new("a", "dict")), Value::Null);
    }

    #[test]
    fn test_record() {
        assert_eq!(Value::Object(record(&simple(), false)), json!({"name": ""}));
        assert_eq!(
            Value::Object(record(&simple(), true)),
            json!({"id": 0, "name": ""})
        );
    }
}
