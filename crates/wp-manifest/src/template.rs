//! `{{ KEY }}` placeholder substitution for skeleton templates

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_-]+)\s*\}\}").expect("Invalid placeholder regex")
});

/// Replace every `{{ KEY }}` in `source` with `data[KEY]`.
///
/// Placeholders without a value are left as they are.
pub fn compile_template(source: &str, data: &HashMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(source, |caps: &Captures<'_>| match data.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
