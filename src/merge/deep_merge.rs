use serde_json::{Map, Value};

use crate::error::FormError;
use crate::merge::merge_model::MergeOptions;

/// Objects and arrays are merged recursively; everything else is a leaf.
///
/// Dates and patterns only exist as strings in JSON, so they are leaves too.
pub fn is_mergeable(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

fn empty_target(value: &Value) -> Value {
    match value {
        Value::Array(_) => Value::Array(Vec::new()),
        _ => Value::Object(Map::new()),
    }
}

/// Copy of `value`. With `options.clone`, objects and arrays are rebuilt by
/// merging them into an empty container.
pub fn clone_if_necessary(value: &Value, options: &MergeOptions) -> Value {
    if options.clone && is_mergeable(value) {
        merge(&empty_target(value), value, options)
    } else {
        value.clone()
    }
}

/// Merge `source` into `target`, producing a new value. Neither input is
/// modified.
///
/// - array onto array: the configured array strategy
/// - array onto anything else: the source array
/// - object onto anything: index-like keys in ascending order, then target
///   keys, then source keys; a source
///   object or array is merged into the target field when that field is
///   truthy, otherwise the source value wins
/// - scalar: the source value
pub fn merge(target: &Value, source: &Value, options: &MergeOptions) -> Value {
    match source {
        Value::Array(src) => match target {
            Value::Array(tgt) => Value::Array(options.array_merge.merge_arrays(tgt, src, options)),
            _ => clone_if_necessary(source, options),
        },
        Value::Object(src) => merge_object(target, src, options),
        _ => source.clone(),
    }
}

fn merge_object(target: &Value, source: &Map<String, Value>, options: &MergeOptions) -> Value {
    let mut destination = Map::new();

    match target {
        Value::Object(fields) => {
            for (key, value) in fields {
                destination.insert(key.clone(), clone_if_necessary(value, options));
            }
        }
        Value::Array(items) => {
            for (i, value) in items.iter().enumerate() {
                destination.insert(i.to_string(), clone_if_necessary(value, options));
            }
        }
        _ => {}
    }

    for (key, value) in source {
        // A falsy target field (0, "", false, null) counts as absent. Falsy
        // values are never mergeable, so this only picks the branch; the
        // result is the source value either way.
        let merged = match lookup(target, key) {
            Some(existing) if is_mergeable(value) && is_truthy(existing) => {
                merge(existing, value, options)
            }
            _ => clone_if_necessary(value, options),
        };
        destination.insert(key.clone(), merged);
    }

    Value::Object(index_keys_first(destination))
}

/// Property order of a script object: array-index keys ascending, then every
/// other key in insertion order.
fn index_keys_first(fields: Map<String, Value>) -> Map<String, Value> {
    let (mut indexed, named): (Vec<_>, Vec<_>) = fields
        .into_iter()
        .partition(|(key, _)| array_index(key).is_some());
    indexed.sort_by_key(|(key, _)| array_index(key));
    indexed.into_iter().chain(named).collect()
}

/// `key` as an array index, if it is one in canonical form ("7", not "07").
fn array_index(key: &str) -> Option<u32> {
    key.parse::<u32>()
        .ok()
        .filter(|i| *i != u32::MAX && i.to_string() == key)
}

/// Fold `merge` left to right over at least two values.
pub fn merge_all(values: &[Value], options: &MergeOptions) -> Result<Value, FormError> {
    match values {
        [first, second, rest @ ..] => {
            let merged = merge(first, second, options);
            Ok(rest.iter().fold(merged, |acc, next| merge(&acc, next, options)))
        }
        _ => Err(FormError::InsufficientInput {
            count: values.len(),
        }),
    }
}

fn lookup<'a>(target: &'a Value, key: &str) -> Option<&'a Value> {
    match target {
        Value::Object(fields) => fields.get(key),
        Value::Array(items) => key
            .parse::<usize>()
            .ok()
            .filter(|i| i.to_string() == key)
            .and_then(|i| items.get(i)),
        _ => None,
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Scalar equality where `1` and `1.0` are the same number.
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}
