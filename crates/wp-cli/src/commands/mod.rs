//! Command implementations

mod check;
mod configure;
mod gitignore;
mod hook;

pub use check::run_check;
pub use configure::run_configure;
pub use gitignore::run_gitignore;
pub use hook::{run_events, run_hook};

use std::path::Path;

use wp_fs::NormalizedPath;
use wp_manifest::{Directives, ManifestFile, Prompt, PublicDirResolver, Reconciler};

use crate::cli::PublicDirArgs;
use crate::error::Result;
use crate::interactive::{self, TerminalPrompt};

/// The project a command operates on.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: NormalizedPath,
    pub manifest: ManifestFile,
}

impl Project {
    /// Project rooted at the directory holding `manifest`.
    pub fn from_manifest(manifest: &Path) -> Self {
        let manifest = NormalizedPath::new(manifest);
        let root = manifest
            .parent()
            .unwrap_or_else(|| NormalizedPath::new("."));
        Self {
            root,
            manifest: ManifestFile::new(manifest),
        }
    }

    /// Display name of the manifest file.
    pub fn manifest_name(&self) -> &str {
        self.manifest.path().file_name().unwrap_or("composer.json")
    }

    /// Resolve the public directory for this project.
    pub fn public_dir(&self, args: &PublicDirArgs) -> Result<String> {
        let manifest = if self.manifest.exists() {
            Some(self.manifest.load()?)
        } else {
            None
        };

        let mut resolver =
            PublicDirResolver::new(self.root.clone()).with_explicit(args.public_dir.clone());
        if args.require_public_dir {
            resolver = resolver.with_fallback(None);
        }

        let terminal = TerminalPrompt;
        let prompt: Option<&dyn Prompt> = if interactive::is_interactive(args.no_interaction) {
            Some(&terminal)
        } else {
            None
        };

        Ok(resolver.resolve(manifest.as_ref(), prompt)?)
    }

    /// Reconciler built from the resolved public directory.
    pub fn reconciler(&self, args: &PublicDirArgs) -> Result<Reconciler> {
        let public_dir = self.public_dir(args)?;
        tracing::debug!(%public_dir, "resolved public directory");
        Ok(Reconciler::new(Directives::new(public_dir)?))
    }
}
