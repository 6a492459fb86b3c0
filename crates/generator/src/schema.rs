//! Schema fragments
//!
//! Each model contributes seven named fragments: the record itself, the
//! singular and plural wrappers, and the filter, sort, limit and count
//! envelopes used by retrieval. Six more fragments are shared by every model.

use crate::openapi::Schema;
use indexmap::IndexMap;
use relations_openapi_common::ModelDescriptor;
use serde_json::json;

/// Names of the fragments shared by every model
pub const SHARED: [&str; 6] = ["Field", "Options", "Retrieved", "Counted", "Updated", "Deleted"];

/// Name of the filter envelope for a model
pub fn filter_name(descriptor: &ModelDescriptor) -> String {
    format!("{}_filter", descriptor.singular)
}

/// Name of the sort envelope for a model
pub fn sort_name(descriptor: &ModelDescriptor) -> String {
    format!("{}_sort", descriptor.singular)
}

/// Name of the limit envelope for a model
pub fn limit_name(descriptor: &ModelDescriptor) -> String {
    format!("{}_limit", descriptor.singular)
}

/// Name of the count envelope for a model
pub fn count_name(descriptor: &ModelDescriptor) -> String {
    format!("{}_count", descriptor.singular)
}

/// The record fragment, one property per field typed by its kind tag
pub fn record(descriptor: &ModelDescriptor) -> Schema {
    let mut schema = Schema::object(descriptor.fields.iter().map(|field| {
        let mut property = Schema::typed(field.kind.as_str());
        if field.readonly {
            property.read_only = Some(true);
        }
        (field.name.clone(), property)
    }));

    schema.required = descriptor
        .fields
        .iter()
        .filter(|field| field.required)
        .map(|field| field.name.clone())
        .collect();

    schema
}

/// The seven fragments of a model, keyed by schema name
///
/// Names follow [`ModelDescriptor::fragment_names`]; they are distinct once
/// the descriptor passes [`ModelDescriptor::validate`].
pub fn schemas(descriptor: &ModelDescriptor) -> IndexMap<String, Schema> {
    let title = descriptor.title.as_str();
    let singular = descriptor.singular.as_str();
    let plural = descriptor.plural.as_str();

    let mut schemas = IndexMap::new();

    schemas.insert(title.to_string(), record(descriptor));

    schemas.insert(
        singular.to_string(),
        Schema::object([(singular, Schema::reference(title))]),
    );

    schemas.insert(
        plural.to_string(),
        Schema::object([(plural, Schema::array(Schema::reference(title)))]),
    );

    schemas.insert(
        filter_name(descriptor),
        Schema::object([("filter", Schema::reference(title))]),
    );

    schemas.insert(
        sort_name(descriptor),
        Schema::object([(
            "sort",
            Schema::array(Schema::typed("string"))
                .with_description(
                    "sort by these fields, prefix with + for ascending (default), - for descending",
                )
                .with_default(json!(descriptor.order)),
        )]),
    );

    schemas.insert(
        limit_name(descriptor),
        Schema::object([
            (
                "limit",
                Schema::typed("integer")
                    .with_description(format!("limit the number of {}", plural)),
            ),
            (
                "limit__start",
                Schema::typed("integer")
                    .with_description(format!("limit the number of {} starting here", plural)),
            ),
            (
                "limit__per_page",
                Schema::typed("integer").with_description(format!(
                    "limit the number of {} by this page size (default {})",
                    plural, descriptor.chunk
                )),
            ),
            (
                "limit__page",
                Schema::typed("integer").with_description(format!(
                    "limit the number of {} and retrieve this page",
                    plural
                )),
            ),
        ]),
    );

    schemas.insert(
        count_name(descriptor),
        Schema::object([(
            "count",
            Schema::typed("boolean")
                .with_description(format!("return only the count of {} found", plural)),
        )]),
    );

    schemas
}

/// Fragments documented once per document, independent of any model
pub fn shared() -> IndexMap<String, Schema> {
    let described = |schema_type: Option<&str>, description: &str| {
        let schema = match schema_type {
            Some(schema_type) => Schema::typed(schema_type),
            None => Schema::default(),
        };
        schema.with_description(description)
    };

    let mut schemas = IndexMap::new();

    schemas.insert(
        "Field".to_string(),
        Schema::object([
            ("name", described(Some("string"), "name of the field")),
            ("value", described(None, "the current value of the field")),
            ("original", described(None, "the original value of the field")),
            ("default", described(None, "the default value of the field")),
            (
                "options",
                Schema::array(Schema::default()).with_description("array of options to select from"),
            ),
            ("required", described(Some("boolean"), "whether the field is required")),
            (
                "multi",
                described(Some("boolean"), "whether multiple options can be selected"),
            ),
            (
                "trigger",
                described(Some("boolean"), "whether to reload when this field changes"),
            ),
            ("readonly", described(Some("boolean"), "whether the field is readonly")),
            ("validation", described(None, "how to validate this field")),
            (
                "content",
                described(Some("object"), "used for any other data, like titles"),
            ),
            (
                "errors",
                described(Some("array"), "errors found validating the field"),
            ),
        ]),
    );

    schemas.insert(
        "Options".to_string(),
        Schema::object([
            ("fields", Schema::array(Schema::reference("Field"))),
            ("errors", Schema::array(Schema::typed("string"))),
        ]),
    );

    schemas.insert(
        "Retrieved".to_string(),
        Schema::object([
            (
                "overflow",
                described(Some("boolean"), "whether more could have been retrieved"),
            ),
            (
                "formats",
                described(Some("object"), "Formatting information for fields, like titles"),
            ),
        ]),
    );

    schemas.insert(
        "Counted".to_string(),
        Schema::object([(
            "count",
            described(Some("integer"), "count of those retrieved"),
        )]),
    );

    schemas.insert(
        "Updated".to_string(),
        Schema::object([(
            "updated",
            described(Some("integer"), "count of those updated"),
        )]),
    );

    schemas.insert(
        "Deleted".to_string(),
        Schema::object([(
            "deleted",
            described(Some("integer"), "count of those deleted"),
        )]),
    );

    schemas
}
