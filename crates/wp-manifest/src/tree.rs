//! Generic helpers over the manifest tree
//!
//! The manifest is a `serde_json::Value` whose objects keep insertion order.
//! Paths in this module use dotted notation with `[n]` for list indices,
//! e.g. `repositories[1].url`.

use std::ops::ControlFlow;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Whether a value counts as "set".
///
/// Null, `false`, numeric zero, `""`, `"0"` and empty lists or objects are
/// unset; everything else is set.
pub fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Whether `map[key]` is set.
pub fn is_key_set(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).is_some_and(is_set)
}

/// Depth-first traversal over every scalar leaf of `value`.
///
/// The visitor receives the leaf's dotted path and the leaf itself. Returning
/// `ControlFlow::Break` stops the walk and the break value is handed back.
pub fn walk<B, F>(value: &Value, mut visit: F) -> ControlFlow<B>
where
    F: FnMut(&str, &Value) -> ControlFlow<B>,
{
    let mut path = String::new();
    walk_inner(value, &mut path, &mut visit)
}

fn walk_inner<B, F>(value: &Value, path: &mut String, visit: &mut F) -> ControlFlow<B>
where
    F: FnMut(&str, &Value) -> ControlFlow<B>,
{
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let len = path.len();
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(key);
                walk_inner(child, path, visit)?;
                path.truncate(len);
            }
            ControlFlow::Continue(())
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{}]", idx));
                walk_inner(child, path, visit)?;
                path.truncate(len);
            }
            ControlFlow::Continue(())
        }
        leaf => visit(path, leaf),
    }
}

/// Does any string leaf in `value` match `pattern`?
///
/// Stops at the first match.
pub fn any_leaf_matches(value: &Value, pattern: &Regex) -> bool {
    walk(value, |_, leaf| match leaf.as_str() {
        Some(s) if pattern.is_match(s) => ControlFlow::Break(()),
        _ => ControlFlow::Continue(()),
    })
    .is_break()
}

/// Paths of every string leaf in `value` that matches `pattern`.
pub fn grep(value: &Value, pattern: &Regex) -> Vec<String> {
    let mut matches = Vec::new();
    let _ = walk::<(), _>(value, |path, leaf| {
        if leaf.as_str().is_some_and(|s| pattern.is_match(s)) {
            matches.push(path.to_string());
        }
        ControlFlow::Continue(())
    });
    matches
}

/// Whether `value` stands in for an absent object.
///
/// Composer writes an empty object as `[]`, so an empty list counts the
/// same as null.
pub fn is_vacant(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Get the object at `map[key]`, creating it when missing or vacant.
///
/// `path` is the dotted path of `map[key]`, used for error reporting.
pub fn object_entry<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a mut Map<String, Value>> {
    let entry = map.entry(key.to_string()).or_insert(Value::Null);
    if is_vacant(entry) {
        *entry = Value::Object(Map::new());
    }
    entry
        .as_object_mut()
        .ok_or_else(|| Error::malformed(path, "an object"))
}

/// Get the object at `map[key]` without creating it.
///
/// Missing and vacant entries read as `None`.
pub fn object_at<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a Map<String, Value>>> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(inner)),
        Some(value) if is_vacant(value) => Ok(None),
        Some(_) => Err(Error::malformed(path, "an object")),
    }
}
