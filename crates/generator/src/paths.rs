//! Path router
//!
//! Merges generated operations into a framework-seeded `paths` map.

use crate::openapi::Operation;
use crate::operations::operation_for;
use relations_openapi_common::{extract_path, ModelDescriptor, PathShape, Result, Verb};
use serde_json::{Map, Value};

/// Shallow-merge a generated operation into a seeded operation object
///
/// Generated keys replace seeded keys of the same name; seeded keys the
/// operation does not produce are kept.
pub fn merge_operation(seeded: &mut Map<String, Value>, operation: &Operation) -> Result<()> {
    if let Value::Object(generated) = serde_json::to_value(operation)? {
        seeded.extend(generated);
    }
    Ok(())
}

/// Move the object out of `slot`; a missing or non-object value yields an empty map
fn take_object(slot: &mut Value) -> Map<String, Value> {
    match slot.take() {
        Value::Object(object) => object,
        _ => Map::new(),
    }
}

/// Merge the operations for one router URL into `paths`
///
/// Verbs that do not apply to the path's shape are removed from the path
/// item. Missing path items and operation seeds are created.
pub fn merge(
    paths: &mut Map<String, Value>,
    url: &str,
    descriptor: &ModelDescriptor,
) -> Result<()> {
    let path = extract_path(url);
    let shape = PathShape::of(&path);

    let slot = paths.entry(path).or_insert(Value::Null);
    let mut item = take_object(slot);

    for verb in Verb::ORDER {
        match operation_for(shape, verb) {
            None => {
                item.shift_remove(verb.as_str());
            }
            Some(build) => {
                let operation = build(descriptor);
                let seeded = item.entry(verb.as_str()).or_insert(Value::Null);
                let mut merged = take_object(seeded);
                merge_operation(&mut merged, &operation)?;
                *seeded = Value::Object(merged);
            }
        }
    }

    *slot = Value::Object(item);
    Ok(())
}
