//! Type mapping from models-file kinds to field kind tags
//!
//! Maps declared kind names, JSON-schema style aliases included, to
//! `FieldKind`, and infers a kind from sample values when none is declared.

use relations_openapi_common::FieldKind;
use serde_json::Value;

/// Maps kind names and sample values to FieldKind
pub struct TypeMapper;

impl TypeMapper {
    /// Map a declared kind name to FieldKind
    ///
    /// # Examples
    /// ```
    /// use relations_openapi_parser::TypeMapper;
    /// use relations_openapi_common::FieldKind;
    ///
    /// assert_eq!(TypeMapper::map_kind("string"), FieldKind::String);
    /// assert_eq!(TypeMapper::map_kind("int"), FieldKind::Integer);
    /// assert_eq!(TypeMapper::map_kind("set"), FieldKind::Set);
    /// ```
    pub fn map_kind(kind: &str) -> FieldKind {
        match kind.trim() {
            "string" => FieldKind::String,
            "integer" => FieldKind::Integer,
            "boolean" => FieldKind::Boolean,
            "number" => FieldKind::Float,
            "array" => FieldKind::List,
            "object" => FieldKind::Dict,
            tag => FieldKind::from(tag),
        }
    }

    /// Kind of a sample value, if it has one
    pub fn kind_of(value: &Value) -> Option<FieldKind> {
        match value {
            Value::Bool(_) => Some(FieldKind::Boolean),
            Value::Number(number) if number.is_f64() => Some(FieldKind::Float),
            Value::Number(_) => Some(FieldKind::Integer),
            Value::String(_) => Some(FieldKind::String),
            Value::Array(_) => Some(FieldKind::List),
            Value::Object(_) => Some(FieldKind::Dict),
            Value::Null => None,
        }
    }

    /// Infer a kind for a field declared without one
    ///
    /// Looks at the default first, then the first option. A field with
    /// string options stays `str`; multi-valued sets must be declared.
    pub fn infer_kind(default: Option<&Value>, options: Option<&[Value]>) -> FieldKind {
        default
            .and_then(Self::kind_of)
            .or_else(|| options.and_then(<[Value]>::first).and_then(Self::kind_of))
            .unwrap_or(FieldKind::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_aliases() {
        assert_eq!(TypeMapper::map_kind("integer"), FieldKind::Integer);
        assert_eq!(TypeMapper::map_kind("boolean"), FieldKind::Boolean);
        assert_eq!(TypeMapper::map_kind("number"), FieldKind::Float);
        assert_eq!(TypeMapper::map_kind("array"), FieldKind::List);
        assert_eq!(TypeMapper::map_kind("object"), FieldKind::Dict);
    }

    #[test]
    fn test_tags_pass_through() {
        assert_eq!(TypeMapper::map_kind("float"), FieldKind::Float);
        assert_eq!(TypeMapper::map_kind("dict"), FieldKind::Dict);
        assert_eq!(
            TypeMapper::map_kind("ipv4"),
            FieldKind::Other("ipv4".to_string())
        );
    }

    #[test]
    fn test_infer_from_default() {
        assert_eq!(
            TypeMapper::infer_kind(Some(&json!(true)), None),
            FieldKind::Boolean
        );
        assert_eq!(
            TypeMapper::infer_kind(Some(&json!(3)), Some(&[json!("a")])),
            FieldKind::Integer
        );
        assert_eq!(
            TypeMapper::infer_kind(Some(&json!(1.5)), None),
            FieldKind::Float
        );
    }

    #[test]
    fn test_infer_from_options() {
        assert_eq!(
            TypeMapper::infer_kind(None, Some(&[json!("active"), json!("inactive")])),
            FieldKind::String
        );
        assert_eq!(
            TypeMapper::infer_kind(Some(&Value::Null), Some(&[json!(1)])),
            FieldKind::Integer
        );
    }

    #[test]
    fn test_infer_fallback() {
        assert_eq!(TypeMapper::infer_kind(None, None), FieldKind::String);
        assert_eq!(TypeMapper::infer_kind(None, Some(&[])), FieldKind::String);
    }
}
