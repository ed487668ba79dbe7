//! Record flattening.
//!
//! Walks a nested query record along a dotted path and collects every value
//! the path reaches. Arrays (realized child relationships) fan out: the rest
//! of the path is applied to each element in order and the results are
//! concatenated, so one record can yield zero, one or many values.
//!
//! Flattening never fails. Missing keys, nulls and scalars in the middle of a
//! path all resolve to a single `null` for that branch, because query results
//! are routinely sparse.
//!
//! # Examples
//!
//! ```text
//! { "Contacts": [{ "Email": "a@x" }, { "Email": "b@x" }] }
//!     Contacts.Email  => ["a@x", "b@x"]
//!
//! { "Owner": null }
//!     Owner.Name      => [null]
//! ```

use serde_json::{Map, Value};

use crate::path::DottedPath;

/// Flatten `record` along `path`.
pub fn flatten(record: &Value, path: &DottedPath) -> Vec<Value> {
    flatten_str(record, path.as_str())
}

/// Flatten `record` along an unvalidated dotted string.
///
/// An empty string resolves to the record itself.
pub fn flatten_str(record: &Value, path: &str) -> Vec<Value> {
    let segments: Vec<&str> = if path.is_empty() {
        vec![]
    } else {
        path.split('.').collect()
    };

    let mut out = Vec::new();
    walk(record, &segments, &mut out);
    out
}

/// Flatten every record in order; one result list per record.
pub fn flatten_many(records: &[Value], path: &DottedPath) -> Vec<Vec<Value>> {
    records.iter().map(|r| flatten(r, path)).collect()
}

fn walk(current: &Value, segments: &[&str], out: &mut Vec<Value>) {
    let Some((head, rest)) = segments.split_first() else {
        out.push(current.clone());
        return;
    };

    match current {
        Value::Array(items) => {
            for item in items {
                walk(item, segments, out);
            }
        }
        Value::Object(map) => match lookup(map, head) {
            Some(next) => walk(next, rest, out),
            None => out.push(Value::Null),
        },
        _ => out.push(Value::Null),
    }
}

/// Exact key match first, then ASCII case-insensitive.
///
/// Lookup segments are lower-cased when paths are built (`owner`) while
/// query results keep the declared relationship name (`Owner`).
fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).or_else(|| {
        map.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}
