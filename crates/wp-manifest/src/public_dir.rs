//! Resolution of the project's public (web root) directory

use serde_json::Value;
use wp_fs::NormalizedPath;

use crate::error::{Error, Result};
use crate::tree;

/// Directory names probed, in order, when the manifest declares none.
pub const COMMON_PUBLIC_DIRS: &[&str] = &[
    "public",
    "public_html",
    "htdocs",
    "httpdocs",
    "html",
    "web",
    "www",
];

/// Question asked when the directory has to be entered interactively.
pub const PUBLIC_DIR_QUESTION: &str = "What is the public directory (web root) for this project?";

/// Source of interactive answers.
pub trait Prompt {
    /// Ask `question`, offering `default` when there is one.
    fn ask(&self, question: &str, default: Option<&str>) -> Result<String>;
}

/// Works out which public directory a project uses.
///
/// Resolution order: explicit override, `extra.public-dir` in the manifest,
/// the first existing [`COMMON_PUBLIC_DIRS`] entry under the project root,
/// an interactive answer, then the fallback.
#[derive(Debug, Clone)]
pub struct PublicDirResolver {
    root: NormalizedPath,
    explicit: Option<String>,
    fallback: Option<String>,
}

impl PublicDirResolver {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self {
            root: root.into(),
            explicit: None,
            fallback: Some(COMMON_PUBLIC_DIRS[0].to_string()),
        }
    }

    /// Use this directory regardless of what the manifest says.
    pub fn with_explicit(mut self, explicit: Option<String>) -> Self {
        self.explicit = explicit;
        self
    }

    /// Directory used when nothing else applies; `None` makes that an error.
    pub fn with_fallback(mut self, fallback: Option<String>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Resolve the public directory.
    pub fn resolve(&self, manifest: Option<&Value>, prompt: Option<&dyn Prompt>) -> Result<String> {
        if let Some(explicit) = &self.explicit {
            tracing::debug!(public_dir = %explicit, "using explicit public directory");
            return clean(explicit);
        }

        if let Some(declared) = manifest.and_then(declared_public_dir) {
            tracing::debug!(public_dir = %declared, "using declared public directory");
            return clean(declared);
        }

        let probed = self.probe();
        if let Some(prompt) = prompt {
            let default = probed.or(self.fallback.as_deref());
            let answer = prompt.ask(PUBLIC_DIR_QUESTION, default)?;
            return clean(&answer);
        }

        match probed.or(self.fallback.as_deref()) {
            Some(dir) => {
                tracing::debug!(public_dir = %dir, "using detected public directory");
                clean(dir)
            }
            None => Err(Error::PublicDirUndetermined),
        }
    }

    /// First common public directory that exists under the project root.
    pub fn probe(&self) -> Option<&'static str> {
        COMMON_PUBLIC_DIRS
            .iter()
            .copied()
            .find(|dir| self.root.join(dir).is_dir())
    }
}

fn declared_public_dir(manifest: &Value) -> Option<&str> {
    let value = manifest.get("extra")?.get("public-dir")?;
    if tree::is_set(value) { value.as_str() } else { None }
}

fn clean(dir: &str) -> Result<String> {
    let trimmed = dir.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(Error::PublicDirUndetermined);
    }
    Ok(trimmed.to_string())
}
