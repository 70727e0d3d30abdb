//! Canonical key ordering for composer.json

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::tree;

/// Order of the well-known top-level manifest properties.
pub const TOP_LEVEL_ORDER: &[&str] = &[
    "name",
    "type",
    "description",
    "keywords",
    "version",
    "license",
    "homepage",
    "time",
    "authors",
    "repositories",
    "minimum-stability",
    "prefer-stable",
    "support",
    "require",
    "require-dev",
    "conflict",
    "replace",
    "provide",
    "suggest",
    "autoload",
    "autoload-dev",
    "bin",
    "archive",
    "non-feature-branches",
    "config",
    "extra",
    "scripts",
];

/// Order of the strategies inside `autoload` and `autoload-dev`.
pub const AUTOLOAD_ORDER: &[&str] = &[
    "psr-4",
    "psr-0",
    "classmap",
    "exclude-from-classmap",
    "files",
];

/// Properties whose immediate children are sorted alphabetically by key.
pub const ALPHABETICAL_KEYS: &[&str] = &[
    "support",
    "require",
    "require-dev",
    "conflict",
    "replace",
    "provide",
    "suggest",
];

const AUTOLOAD_KEYS: &[&str] = &["autoload", "autoload-dev"];

/// Reorder `map` so that keys named in `order` come first, in that order,
/// followed by every other key in its original relative order.
///
/// Names in `order` that are not in `map` are skipped. Values are moved, not
/// touched.
pub fn order_keys(map: &mut Map<String, Value>, order: &[&str]) {
    let mut entries: Vec<Option<(String, Value)>> =
        std::mem::take(map).into_iter().map(Some).collect();

    for name in order {
        let slot = entries
            .iter_mut()
            .find(|entry| matches!(entry, Some((key, _)) if key.as_str() == *name));
        if let Some((key, value)) = slot.and_then(Option::take) {
            map.insert(key, value);
        }
    }

    for (key, value) in entries.into_iter().flatten() {
        map.insert(key, value);
    }
}

/// Sort the immediate children of `map` by key, byte-wise.
pub fn sort_keys(map: &mut Map<String, Value>) {
    let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    map.extend(entries);
}

/// Apply the full canonical ordering pass to a manifest root.
///
/// Returns `true` when any key moved.
pub fn canonicalize(root: &mut Map<String, Value>) -> Result<bool> {
    let before = key_layout(root);

    order_keys(root, TOP_LEVEL_ORDER);

    for name in AUTOLOAD_KEYS {
        match root.get_mut(*name) {
            Some(Value::Object(autoload)) => order_keys(autoload, AUTOLOAD_ORDER),
            Some(value) if !tree::is_vacant(value) => {
                return Err(Error::malformed(*name, "an object"));
            }
            _ => {}
        }
    }

    for name in ALPHABETICAL_KEYS {
        match root.get_mut(*name) {
            Some(Value::Object(links)) => sort_keys(links),
            Some(value) if !tree::is_vacant(value) => {
                return Err(Error::malformed(*name, "an object"));
            }
            _ => {}
        }
    }

    Ok(key_layout(root) != before)
}

/// Key order of the root and of every sub-tree the ordering pass touches.
fn key_layout(root: &Map<String, Value>) -> Vec<Vec<String>> {
    let mut layout = vec![root.keys().cloned().collect()];
    for name in AUTOLOAD_KEYS.iter().chain(ALPHABETICAL_KEYS) {
        if let Some(Value::Object(inner)) = root.get(*name) {
            layout.push(inner.keys().cloned().collect());
        }
    }
    layout
}
