//! Reading and writing composer.json on disk

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use similar::TextDiff;
use wp_fs::{FileLock, NormalizedPath, io};

use crate::error::{Error, Result};
use crate::reconcile::{Change, Reconciler};

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "composer.json";

/// A manifest file at a fixed path.
#[derive(Debug, Clone)]
pub struct ManifestFile {
    path: NormalizedPath,
}

/// Result of reconciling a manifest file.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Manifest text as read from disk
    pub before: String,
    /// Rendered manifest after reconciliation
    pub after: String,
    pub changes: Vec<Change>,
    /// Whether `after` was written to disk
    pub written: bool,
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Unified diff between the old and new manifest text.
    pub fn unified_diff(&self, name: &str) -> String {
        TextDiff::from_lines(&self.before, &self.after)
            .unified_diff()
            .context_radius(3)
            .header(&format!("a/{}", name), &format!("b/{}", name))
            .to_string()
    }
}

impl ManifestFile {
    pub fn new(path: impl Into<NormalizedPath>) -> Self {
        Self { path: path.into() }
    }

    /// `composer.json` inside `root`.
    pub fn in_dir(root: impl Into<NormalizedPath>) -> Self {
        Self::new(root.into().join(MANIFEST_FILE))
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load and parse the manifest. The root must be an object.
    pub fn load(&self) -> Result<Value> {
        let content = io::read_text(&self.path)?;
        self.parse(&content)
    }

    fn parse(&self, content: &str) -> Result<Value> {
        let value: Value = serde_json::from_str(content).map_err(|source| Error::Parse {
            path: self.path.to_native(),
            source,
        })?;
        if !value.is_object() {
            return Err(Error::malformed("<root>", "an object"));
        }
        Ok(value)
    }

    /// Render a manifest the way Composer writes it: four-space indent,
    /// unescaped slashes and unicode, trailing newline.
    pub fn render(value: &Value) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        let mut text = String::from_utf8_lossy(&buf).into_owned();
        text.push('\n');
        Ok(text)
    }

    /// Write the manifest atomically.
    pub fn save(&self, value: &Value) -> Result<()> {
        let text = Self::render(value)?;
        io::write_text(&self.path, &text)?;
        Ok(())
    }

    /// Hold the manifest's exclusive lock.
    pub fn lock(&self) -> Result<FileLock> {
        Ok(FileLock::acquire(&self.path)?)
    }

    /// Lock, load, reconcile and write back if anything changed.
    ///
    /// With `dry_run` the file is never written and no lock file is created.
    pub fn reconcile_in_place(&self, reconciler: &Reconciler, dry_run: bool) -> Result<Outcome> {
        let _lock = if dry_run { None } else { Some(self.lock()?) };

        let content = io::read_text(&self.path)?;
        let manifest = self.parse(&content)?;

        let result = reconciler.reconcile(manifest)?;
        let after = if result.is_changed() {
            Self::render(&result.manifest)?
        } else {
            content.clone()
        };

        let written = result.is_changed() && !dry_run;
        if written {
            io::write_text(&self.path, &after)?;
            tracing::info!(path = %self.path, changes = result.changes.len(), "manifest written");
        } else {
            tracing::debug!(path = %self.path, dry_run, "manifest not written");
        }

        Ok(Outcome {
            before: content,
            after,
            changes: result.changes,
            written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_matches_composer_style() {
        let value = json!({"name": "acme/site", "extra": {"installer-paths": {"public/themes/{$name}/": ["type:wordpress-theme"]}}});
        let text = ManifestFile::render(&value).unwrap();
        assert_eq!(
            text,
            "{\n    \"name\": \"acme/site\",\n    \"extra\": {\n        \"installer-paths\": {\n            \"public/themes/{$name}/\": [\n                \"type:wordpress-theme\"\n            ]\n        }\n    }\n}\n"
        );
    }

    #[test]
    fn test_unified_diff_headers() {
        let outcome = Outcome {
            before: "{\n}\n".into(),
            after: "{\n    \"a\": 1\n}\n".into(),
            changes: vec![Change::SortingEnabled],
            written: false,
        };
        let diff = outcome.unified_diff("composer.json");
        assert!(diff.contains("--- a/composer.json"));
        assert!(diff.contains("+++ b/composer.json"));
        assert!(diff.contains("+    \"a\": 1"));
    }
}
