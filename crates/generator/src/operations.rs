//! Operation builders
//!
//! One builder per (path shape, verb) combination a model's resource answers
//! to. Collection paths create, search, and act on many records; item paths
//! act on the single record their identifier addresses.

use crate::example;
use crate::openapi::{examples, Examples, Operation, Parameter, RequestBody, Response, Schema};
use crate::schema::{count_name, filter_name, limit_name, sort_name};
use indexmap::IndexMap;
use relations_openapi_common::{ModelDescriptor, PathShape, Verb};
use serde_json::{json, Map, Value};

/// Signature shared by every operation builder
pub type OperationBuilder = fn(&ModelDescriptor) -> Operation;

/// Builders keyed by (path shape, verb); `None` marks a combination that
/// must not appear in a document
const TABLE: [(PathShape, Verb, Option<OperationBuilder>); 10] = [
    (PathShape::Collection, Verb::Options, Some(create_options)),
    (PathShape::Collection, Verb::Post, Some(create_search)),
    (PathShape::Collection, Verb::Get, Some(retrieve_many)),
    (PathShape::Collection, Verb::Patch, Some(update_many)),
    (PathShape::Collection, Verb::Delete, Some(delete_many)),
    (PathShape::Item, Verb::Options, Some(update_options)),
    (PathShape::Item, Verb::Post, None),
    (PathShape::Item, Verb::Get, Some(retrieve_one)),
    (PathShape::Item, Verb::Patch, Some(update_one)),
    (PathShape::Item, Verb::Delete, Some(delete_one)),
];

/// Look up the builder for a path shape and verb
///
/// Returns `None` when the combination is not applicable, e.g. creating on
/// an item path.
pub fn operation_for(shape: PathShape, verb: Verb) -> Option<OperationBuilder> {
    TABLE
        .iter()
        .find(|(s, v, _)| *s == shape && *v == verb)
        .and_then(|(_, _, builder)| *builder)
}

/// Example payloads derived from one descriptor
struct Samples {
    /// Writable fields only, as sent by callers
    record: Map<String, Value>,
    /// Every field, as returned by the store
    full: Map<String, Value>,
    sort: Value,
    sort_param: String,
    chunk: u32,
}

impl Samples {
    fn new(descriptor: &ModelDescriptor) -> Self {
        Self {
            record: example::record(descriptor, false),
            full: example::record(descriptor, true),
            sort: json!(descriptor.order),
            sort_param: descriptor.order.join(","),
            chunk: descriptor.chunk,
        }
    }

    fn record(&self) -> Value {
        Value::Object(self.record.clone())
    }

    fn full(&self) -> Value {
        Value::Object(self.full.clone())
    }

    /// Record fields flattened into query parameters, plus extras
    fn params(&self, extra: Value) -> Value {
        let mut params = self.record.clone();
        if let Value::Object(extra) = extra {
            params.extend(extra);
        }
        Value::Object(params)
    }

    /// Body envelope: filter on the record, plus extras
    fn filtered(&self, extra: Value) -> Value {
        let mut body = Map::new();
        body.insert("filter".to_string(), self.record());
        if let Value::Object(extra) = extra {
            body.extend(extra);
        }
        Value::Object(body)
    }

    fn limit(&self) -> Value {
        json!({"limit": self.chunk, "start": 0})
    }

    fn paginate(&self) -> Value {
        json!({"page": 1, "per_page": self.chunk})
    }
}

fn base(descriptor: &ModelDescriptor, action: &str, summary: String) -> Operation {
    Operation {
        tags: vec![descriptor.title.clone()],
        operation_id: format!("{}_{}", descriptor.singular, action),
        summary,
        ..Operation::default()
    }
}

fn not_found(descriptor: &ModelDescriptor) -> (String, Response) {
    (
        "404".to_string(),
        Response::described(format!("{} not found", descriptor.singular)),
    )
}

fn bad_request(action: &str) -> (String, Response) {
    (
        "400".to_string(),
        Response::described(format!("unable to {} due to bad request", action)),
    )
}

/// Body for the options verbs: nothing to generate, a record to validate
fn options_body(descriptor: &ModelDescriptor, samples: &Samples) -> RequestBody {
    RequestBody::json(
        Schema::reference(&descriptor.singular),
        examples([
            ("generate", json!({})),
            ("validate", json!({ descriptor.singular.as_str(): samples.record() })),
        ]),
    )
}

fn options_response(description: String) -> (String, Response) {
    (
        "200".to_string(),
        Response::json(description, Schema::reference("Options"), IndexMap::new()),
    )
}

/// Retrieval responses: a page of full records, or only a count
fn list_examples(descriptor: &ModelDescriptor, samples: &Samples) -> Examples {
    examples([
        (
            "list retrieve",
            json!({
                descriptor.plural.as_str(): [samples.full()],
                "overflow": false,
                "formats": {}
            }),
        ),
        ("count retrieve", json!({"count": 1})),
    ])
}

/// Query parameter examples for filtering many records
fn filter_params(samples: &Samples) -> Parameter {
    Parameter::query_params(examples([
        ("filter through params", samples.params(json!({}))),
        (
            "filter through params limit",
            samples.params(json!({
                "sort": samples.sort_param,
                "limit": samples.chunk,
                "limit__start": 0
            })),
        ),
        (
            "filter through params paginate",
            samples.params(json!({
                "sort": samples.sort_param,
                "limit__page": 1,
                "limit__per_page": samples.chunk
            })),
        ),
        ("filter through body", json!({})),
    ]))
}

/// OPTIONS on a collection path
pub fn create_options(descriptor: &ModelDescriptor) -> Operation {
    let samples = Samples::new(descriptor);
    let (singular, plural) = (&descriptor.singular, &descriptor.plural);

    Operation {
        description: Some(format!(
            "To generate, send nothing. To validate, send a {}.",
            singular
        )),
        request_body: Some(options_body(descriptor, &samples)),
        responses: IndexMap::from([options_response(format!(
            "fields to create one {} or many {} generated and validated",
            singular, plural
        ))]),
        ..base(
            descriptor,
            "create_options",
            format!(
                "generates and validates fields to create one {} or many {}",
                singular, plural
            ),
        )
    }
}

/// POST on a collection path: creates one or many, or runs a complex retrieve
pub fn create_search(descriptor: &ModelDescriptor) -> Operation {
    let samples = Samples::new(descriptor);
    let (singular, plural) = (descriptor.singular.as_str(), descriptor.plural.as_str());

    let request = Schema::one_of(vec![
        Schema::reference(singular),
        Schema::reference(plural),
        Schema {
            one_of: vec![Schema::reference(&filter_name(descriptor))],
            any_of: vec![
                Schema::reference(&sort_name(descriptor)),
                Schema::reference(&limit_name(descriptor)),
                Schema::reference(&count_name(descriptor)),
            ],
            ..Schema::default()
        },
    ]);

    let request_examples = examples([
        ("create one", json!({ singular: samples.record() })),
        ("create many", json!({ plural: [samples.record()] })),
        ("complex retrieve", samples.filtered(json!({"sort": samples.sort}))),
        (
            "limit retrieve",
            samples.filtered(json!({"sort": samples.sort, "limit": samples.limit()})),
        ),
        (
            "paginate retrieve",
            samples.filtered(json!({"sort": samples.sort, "limit": samples.paginate()})),
        ),
        ("count retrieve", samples.filtered(json!({"count": true}))),
    ]);

    Operation {
        description: Some(format!(
            "To create one, send {}. To create many, send {}. To retrieve send filter (sort, limit, count optional).",
            singular, plural
        )),
        request_body: Some(RequestBody::json(request, request_examples)),
        responses: IndexMap::from([
            (
                "200".to_string(),
                Response::json(
                    format!("many {} retrieved", plural),
                    Schema::one_of(vec![
                        Schema::reference(plural),
                        Schema::reference("Retrieved"),
                    ]),
                    list_examples(descriptor, &samples),
                ),
            ),
            (
                "201".to_string(),
                Response::json(
                    format!("one {} or many {} created", singular, plural),
                    Schema::one_of(vec![Schema::reference(singular), Schema::reference(plural)]),
                    examples([
                        ("create one", json!({ singular: samples.full() })),
                        ("create many", json!({ plural: [samples.full()] })),
                    ]),
                ),
            ),
            bad_request("create"),
        ]),
        ..base(
            descriptor,
            "create_search",
            format!(
                "creates one {} or many {} or a complex retrieve",
                singular, plural
            ),
        )
    }
}

/// GET on a collection path
pub fn retrieve_many(descriptor: &ModelDescriptor) -> Operation {
    let samples = Samples::new(descriptor);
    let plural = descriptor.plural.as_str();

    Operation {
        parameters: vec![Parameter::query_params(examples([
            ("retrieve", samples.params(json!({"sort": samples.sort_param}))),
            (
                "limit",
                samples.params(json!({
                    "sort": samples.sort_param,
                    "limit": samples.chunk,
                    "limit__start": 0
                })),
            ),
            (
                "paginate",
                samples.params(json!({
                    "sort": samples.sort_param,
                    "limit__page": 1,
                    "limit__per_page": samples.chunk
                })),
            ),
            ("count", samples.params(json!({"count": 1}))),
        ]))],
        responses: IndexMap::from([(
            "200".to_string(),
            Response::json(
                format!("many {} retrieved", plural),
                Schema::reference(plural),
                list_examples(descriptor, &samples),
            ),
        )]),
        ..base(descriptor, "retrieve_many", format!("retrieves many {}", plural))
    }
}

/// PATCH on a collection path; updating everything needs an explicit empty filter
pub fn update_many(descriptor: &ModelDescriptor) -> Operation {
    let samples = Samples::new(descriptor);
    let plural = descriptor.plural.as_str();

    let request_examples = examples([
        ("filter through params", json!({ plural: samples.record() })),
        (
            "filter through body",
            samples.filtered(json!({ plural: samples.record() })),
        ),
        (
            "filter through body limit",
            samples.filtered(json!({
                "sort": samples.sort,
                "limit": samples.limit(),
                plural: samples.record()
            })),
        ),
        (
            "filter through body paginate",
            samples.filtered(json!({
                "sort": samples.sort,
                "limit": samples.paginate(),
                plural: samples.record()
            })),
        ),
        ("update all", json!({"filter": {}, plural: samples.record()})),
    ]);

    Operation {
        parameters: vec![filter_params(&samples)],
        request_body: Some(RequestBody::json(
            Schema::any_of(vec![
                Schema::reference(&descriptor.singular),
                Schema::reference(&filter_name(descriptor)),
            ]),
            request_examples,
        )),
        responses: IndexMap::from([
            (
                "202".to_string(),
                Response::json(
                    format!("many {} updated", plural),
                    Schema::reference("Updated"),
                    IndexMap::new(),
                ),
            ),
            bad_request("update"),
        ]),
        ..base(descriptor, "update_many", format!("updates many {}", plural))
    }
}

/// DELETE on a collection path; deleting everything needs an explicit empty filter
pub fn delete_many(descriptor: &ModelDescriptor) -> Operation {
    let samples = Samples::new(descriptor);
    let plural = descriptor.plural.as_str();

    let request_examples = examples([
        ("filter through params", json!({})),
        ("filter through body", samples.filtered(json!({}))),
        (
            "filter through body limit",
            samples.filtered(json!({"sort": samples.sort, "limit": samples.limit()})),
        ),
        (
            "filter through body paginate",
            samples.filtered(json!({"sort": samples.sort, "limit": samples.paginate()})),
        ),
        ("delete all", json!({"filter": {}})),
    ]);

    Operation {
        parameters: vec![filter_params(&samples)],
        request_body: Some(RequestBody::json(
            Schema::any_of(vec![Schema::reference(&filter_name(descriptor))]),
            request_examples,
        )),
        responses: IndexMap::from([
            (
                "202".to_string(),
                Response::json(
                    format!("many {} deleted", plural),
                    Schema::reference("Deleted"),
                    IndexMap::new(),
                ),
            ),
            bad_request("delete"),
        ]),
        ..base(descriptor, "delete_many", format!("deletes many {}", plural))
    }
}

/// OPTIONS on an item path
pub fn update_options(descriptor: &ModelDescriptor) -> Operation {
    let samples = Samples::new(descriptor);
    let singular = &descriptor.singular;

    Operation {
        request_body: Some(options_body(descriptor, &samples)),
        responses: IndexMap::from([
            options_response(format!(
                "fields to update one {} generated and validated",
                singular
            )),
            not_found(descriptor),
        ]),
        ..base(
            descriptor,
            "update_options",
            format!("generates and validates fields to update one {}", singular),
        )
    }
}

/// GET on an item path
pub fn retrieve_one(descriptor: &ModelDescriptor) -> Operation {
    let samples = Samples::new(descriptor);
    let singular = descriptor.singular.as_str();

    Operation {
        responses: IndexMap::from([
            (
                "200".to_string(),
                Response::json(
                    format!("one {} retrieved", singular),
                    Schema::reference(singular),
                    examples([(
                        "retrieve",
                        json!({
                            singular: samples.full(),
                            "overflow": false,
                            "formats": {}
                        }),
                    )]),
                ),
            ),
            not_found(descriptor),
        ]),
        ..base(descriptor, "retrieve_one", format!("retrieves one {}", singular))
    }
}

/// PATCH on an item path
pub fn update_one(descriptor: &ModelDescriptor) -> Operation {
    let samples = Samples::new(descriptor);
    let singular = descriptor.singular.as_str();

    Operation {
        request_body: Some(RequestBody::json(
            Schema::reference(singular),
            examples([("update", json!({ singular: samples.record() }))]),
        )),
        responses: IndexMap::from([
            (
                "202".to_string(),
                Response::json(
                    format!("one {} updated", singular),
                    Schema::reference("Updated"),
                    IndexMap::new(),
                ),
            ),
            bad_request("update"),
            not_found(descriptor),
        ]),
        ..base(descriptor, "update_one", format!("updates one {}", singular))
    }
}

/// DELETE on an item path
pub fn delete_one(descriptor: &ModelDescriptor) -> Operation {
    let singular = descriptor.singular.as_str();

    Operation {
        responses: IndexMap::from([
            (
                "202".to_string(),
                Response::json(
                    format!("one {} deleted", singular),
                    Schema::reference("Deleted"),
                    IndexMap::new(),
                ),
            ),
            not_found(descriptor),
        ]),
        ..base(descriptor, "delete_one", format!("deletes one {}", singular))
    }
}

/// Every operation a model's collection and item paths produce
pub fn all(descriptor: &ModelDescriptor) -> Vec<(PathShape, Verb, Operation)> {
    TABLE
        .iter()
        .filter_map(|(shape, verb, builder)| {
            (*builder).map(|build| (*shape, *verb, build(descriptor)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::simple;
    use std::collections::HashSet;

    fn rendered(operation: &Operation) -> Value {
        serde_json::to_value(operation).unwrap()
    }

    #[test]
    fn test_table_lookup() {
        assert!(operation_for(PathShape::Item, Verb::Post).is_none());
        for verb in Verb::ORDER {
            assert!(operation_for(PathShape::Collection, verb).is_some());
        }

        let build = operation_for(PathShape::Collection, Verb::Options).unwrap();
        assert_eq!(build(&simple()).operation_id, "simple_create_options");

        let build = operation_for(PathShape::Item, Verb::Delete).unwrap();
        assert_eq!(build(&simple()).operation_id, "simple_delete_one");
    }

    #[test]
    fn test_operation_ids_unique() {
        let operations = all(&simple());
        assert_eq!(operations.len(), 9);

        let ids: HashSet<String> = operations
            .iter()
            .map(|(_, _, operation)| operation.operation_id.clone())
            .collect();
        assert_eq!(ids.len(), 9);

        for (_, _, operation) in &operations {
            assert_eq!(operation.tags, vec!["Simple".to_string()]);
            assert!(operation.operation_id.starts_with("simple_"));
        }
    }

    #[test]
    fn test_create_options() {
        assert_eq!(
            rendered(&create_options(&simple())),
            json!({
                "tags": ["Simple"],
                "operationId": "simple_create_options",
                "summary": "generates and validates fields to create one simple or many simples",
                "description": "To generate, send nothing. To validate, send a simple.",
                "requestBody": {
                    "content": {
                        "application/json": {
                            "schema": {"$ref": "#/components/schemas/simple"},
                            "examples": {
                                "generate": {"value": {}},
                                "validate": {"value": {"simple": {"name": ""}}}
                            }
                        }
                    }
                },
                "responses": {
                    "200": {
                        "description": "fields to create one simple or many simples generated and validated",
                        "content": {
                            "application/json": {
                                "schema": {"$ref": "#/components/schemas/Options"}
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_create_search_request() {
        let operation = rendered(&create_search(&simple()));
        assert_eq!(operation["operationId"], "simple_create_search");

        let body = &operation["requestBody"]["content"]["application/json"];
        assert_eq!(
            body["schema"],
            json!({
                "oneOf": [
                    {"$ref": "#/components/schemas/simple"},
                    {"$ref": "#/components/schemas/simples"},
                    {
                        "oneOf": [{"$ref": "#/components/schemas/simple_filter"}],
                        "anyOf": [
                            {"$ref": "#/components/schemas/simple_sort"},
                            {"$ref": "#/components/schemas/simple_limit"},
                            {"$ref": "#/components/schemas/simple_count"}
                        ]
                    }
                ]
            })
        );
        assert_eq!(
            body["examples"],
            json!({
                "create one": {"value": {"simple": {"name": ""}}},
                "create many": {"value": {"simples": [{"name": ""}]}},
                "complex retrieve": {"value": {"filter": {"name": ""}, "sort": ["+name"]}},
                "limit retrieve": {"value": {
                    "filter": {"name": ""},
                    "sort": ["+name"],
                    "limit": {"limit": 2, "start": 0}
                }},
                "paginate retrieve": {"value": {
                    "filter": {"name": ""},
                    "sort": ["+name"],
                    "limit": {"page": 1, "per_page": 2}
                }},
                "count retrieve": {"value": {"filter": {"name": ""}, "count": true}}
            })
        );
    }

    #[test]
    fn test_create_search_responses() {
        let operation = rendered(&create_search(&simple()));
        let responses = &operation["responses"];

        assert_eq!(
            responses["200"]["content"]["application/json"]["schema"],
            json!({"oneOf": [
                {"$ref": "#/components/schemas/simples"},
                {"$ref": "#/components/schemas/Retrieved"}
            ]})
        );
        assert_eq!(
            responses["200"]["content"]["application/json"]["examples"]["list retrieve"]["value"],
            json!({"simples": [{"id": 0, "name": ""}], "overflow": false, "formats": {}})
        );
        assert_eq!(
            responses["201"]["content"]["application/json"]["schema"],
            json!({"oneOf": [
                {"$ref": "#/components/schemas/simple"},
                {"$ref": "#/components/schemas/simples"}
            ]})
        );
        assert_eq!(
            responses["201"]["content"]["application/json"]["examples"]["create many"]["value"],
            json!({"simples": [{"id": 0, "name": ""}]})
        );
        assert_eq!(
            responses["400"],
            json!({"description": "unable to create due to bad request"})
        );
    }

    #[test]
    fn test_retrieve_many_params() {
        let operation = rendered(&retrieve_many(&simple()));
        let param = &operation["parameters"][0];

        assert_eq!(param["in"], "query");
        assert_eq!(param["name"], "params");
        assert_eq!(param["style"], "form");
        assert_eq!(param["explode"], true);
        assert_eq!(
            param["examples"],
            json!({
                "retrieve": {"value": {"name": "", "sort": "+name"}},
                "limit": {"value": {"name": "", "sort": "+name", "limit": 2, "limit__start": 0}},
                "paginate": {"value": {"name": "", "sort": "+name", "limit__page": 1, "limit__per_page": 2}},
                "count": {"value": {"name": "", "count": 1}}
            })
        );
        assert_eq!(
            operation["responses"]["200"]["content"]["application/json"]["schema"],
            json!({"$ref": "#/components/schemas/simples"})
        );
        assert!(operation.get("requestBody").is_none());
    }

    #[test]
    fn test_update_many() {
        let operation = rendered(&update_many(&simple()));
        let body = &operation["requestBody"]["content"]["application/json"];

        assert_eq!(
            body["schema"],
            json!({"anyOf": [
                {"$ref": "#/components/schemas/simple"},
                {"$ref": "#/components/schemas/simple_filter"}
            ]})
        );
        assert_eq!(
            body["examples"]["update all"]["value"],
            json!({"filter": {}, "simples": {"name": ""}})
        );
        assert_eq!(
            body["examples"]["filter through body limit"]["value"],
            json!({
                "filter": {"name": ""},
                "sort": ["+name"],
                "limit": {"limit": 2, "start": 0},
                "simples": {"name": ""}
            })
        );
        assert_eq!(
            operation["parameters"][0]["examples"]["filter through body"]["value"],
            json!({})
        );
        assert_eq!(
            operation["responses"]["202"]["content"]["application/json"]["schema"],
            json!({"$ref": "#/components/schemas/Updated"})
        );
        assert_eq!(
            operation["responses"]["400"]["description"],
            "unable to update due to bad request"
        );
    }

    #[test]
    fn test_delete_many() {
        let operation = rendered(&delete_many(&simple()));
        let body = &operation["requestBody"]["content"]["application/json"];

        assert_eq!(
            body["schema"],
            json!({"anyOf": [{"$ref": "#/components/schemas/simple_filter"}]})
        );
        assert_eq!(body["examples"]["delete all"]["value"], json!({"filter": {}}));
        assert_eq!(
            body["examples"]["filter through body"]["value"],
            json!({"filter": {"name": ""}})
        );
        assert_eq!(
            operation["parameters"][0]["examples"]["filter through params paginate"]["value"],
            json!({"name": "", "sort": "+name", "limit__page": 1, "limit__per_page": 2})
        );
        assert_eq!(
            operation["responses"]["202"]["content"]["application/json"]["schema"],
            json!({"$ref": "#/components/schemas/Deleted"})
        );
    }

    #[test]
    fn test_update_options() {
        let operation = rendered(&update_options(&simple()));
        assert_eq!(operation["operationId"], "simple_update_options");
        assert_eq!(
            operation["summary"],
            "generates and validates fields to update one simple"
        );
        assert_eq!(
            operation["responses"]["404"],
            json!({"description": "simple not found"})
        );
        assert_eq!(
            operation["requestBody"]["content"]["application/json"]["examples"]["validate"]["value"],
            json!({"simple": {"name": ""}})
        );
    }

    #[test]
    fn test_retrieve_one() {
        assert_eq!(
            rendered(&retrieve_one(&simple())),
            json!({
                "tags": ["Simple"],
                "operationId": "simple_retrieve_one",
                "summary": "retrieves one simple",
                "responses": {
                    "200": {
                        "description": "one simple retrieved",
                        "content": {
                            "application/json": {
                                "schema": {"$ref": "#/components/schemas/simple"},
                                "examples": {
                                    "retrieve": {"value": {
                                        "simple": {"id": 0, "name": ""},
                                        "overflow": false,
                                        "formats": {}
                                    }}
                                }
                            }
                        }
                    },
                    "404": {"description": "simple not found"}
                }
            })
        );
    }

    #[test]
    fn test_update_one() {
        let operation = rendered(&update_one(&simple()));
        assert_eq!(
            operation["requestBody"]["content"]["application/json"],
            json!({
                "schema": {"$ref": "#/components/schemas/simple"},
                "examples": {"update": {"value": {"simple": {"name": ""}}}}
            })
        );
        let codes: Vec<&String> = operation["responses"].as_object().unwrap().keys().collect();
        assert_eq!(codes, vec!["202", "400", "404"]);
    }

    #[test]
    fn test_delete_one() {
        assert_eq!(
            rendered(&delete_one(&simple())),
            json!({
                "tags": ["Simple"],
                "operationId": "simple_delete_one",
                "summary": "deletes one simple",
                "responses": {
                    "202": {
                        "description": "one simple deleted",
                        "content": {
                            "application/json": {
                                "schema": {"$ref": "#/components/schemas/Deleted"}
                            }
                        }
                    },
                    "404": {"description": "simple not found"}
                }
            })
        );
    }
}
