//! Manifest reconciliation
//!
//! Brings a manifest into the state described by [`Directives`] with the
//! fewest edits, then applies the canonical key order. A manifest that
//! already passes every presence check is returned untouched.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::directives::{Directives, REPOSITORY_KEY};
use crate::error::{Error, Result};
use crate::order;
use crate::tree::{self, is_key_set, object_at, object_entry};

/// A single edit made during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    PublicDirSet { value: String },
    InstallDirSet { value: String },
    RepositoryAdded { url: String },
    InstallerTagRemoved { path: String, tag: String },
    InstallerPathRemoved { path: String },
    InstallerTagAdded { path: String, tag: String },
    SortingEnabled,
    Reordered,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PublicDirSet { value } => write!(f, "set extra.public-dir to \"{}\"", value),
            Self::InstallDirSet { value } => {
                write!(f, "set extra.wordpress-install-dir to \"{}\"", value)
            }
            Self::RepositoryAdded { url } => write!(f, "add repository {}", url),
            Self::InstallerTagRemoved { path, tag } => {
                write!(f, "remove {} from installer path \"{}\"", tag, path)
            }
            Self::InstallerPathRemoved { path } => {
                write!(f, "remove empty installer path \"{}\"", path)
            }
            Self::InstallerTagAdded { path, tag } => {
                write!(f, "add {} to installer path \"{}\"", tag, path)
            }
            Self::SortingEnabled => write!(f, "enable config.sort-packages"),
            Self::Reordered => write!(f, "reorder properties"),
        }
    }
}

/// Which directives a manifest already satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Presence {
    pub public_dir: bool,
    pub install_dir: bool,
    pub repository: bool,
    pub sorting: bool,
}

impl Presence {
    /// True when reconciliation has nothing to do.
    pub fn is_satisfied(&self) -> bool {
        self.public_dir && self.install_dir && self.repository && self.sorting
    }
}

/// Output of a reconciliation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// The reconciled manifest
    pub manifest: Value,
    /// Edits applied, in order; empty when the input already satisfied every directive
    pub changes: Vec<Change>,
}

impl Reconciliation {
    /// Whether the manifest needs to be written back.
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Applies a [`Directives`] set to manifests.
#[derive(Debug, Clone)]
pub struct Reconciler {
    directives: Directives,
}

impl Reconciler {
    pub fn new(directives: Directives) -> Self {
        Self { directives }
    }

    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    /// Evaluate the presence checks without modifying anything.
    pub fn presence(&self, manifest: &Value) -> Result<Presence> {
        let root = root(manifest)?;
        let extra = object_at(root, "extra", "extra")?;
        let config = object_at(root, "config", "config")?;

        let repository = match root.get("repositories") {
            Some(repos) if tree::is_set(repos) => {
                tree::any_leaf_matches(repos, self.directives.repository_pattern())
            }
            _ => false,
        };

        Ok(Presence {
            public_dir: extra.is_some_and(|e| is_key_set(e, "public-dir")),
            install_dir: extra.is_some_and(|e| is_key_set(e, "wordpress-install-dir")),
            repository,
            sorting: config.is_some_and(|c| is_key_set(c, "sort-packages")),
        })
    }

    /// Reconcile `manifest` against the directives.
    pub fn reconcile(&self, mut manifest: Value) -> Result<Reconciliation> {
        let presence = self.presence(&manifest)?;
        if presence.is_satisfied() {
            tracing::debug!("manifest already configured");
            return Ok(Reconciliation {
                manifest,
                changes: Vec::new(),
            });
        }

        let root = manifest
            .as_object_mut()
            .ok_or_else(|| Error::malformed("<root>", "an object"))?;
        let mut changes = Vec::new();

        if !presence.public_dir {
            let value = self.directives.public_dir().to_string();
            object_entry(root, "extra", "extra")?
                .insert("public-dir".into(), Value::String(value.clone()));
            changes.push(Change::PublicDirSet { value });
        }

        if !presence.install_dir {
            let value = self.directives.install_dir();
            object_entry(root, "extra", "extra")?
                .insert("wordpress-install-dir".into(), Value::String(value.clone()));
            changes.push(Change::InstallDirSet { value });
        }

        if !presence.repository {
            self.add_repository(root)?;
            changes.push(Change::RepositoryAdded {
                url: crate::directives::WPACKAGIST_URL.to_string(),
            });
        }

        self.configure_installer_paths(root, &mut changes)?;

        if !presence.sorting {
            object_entry(root, "config", "config")?.insert("sort-packages".into(), Value::Bool(true));
            changes.push(Change::SortingEnabled);
        }

        if order::canonicalize(root)? {
            changes.push(Change::Reordered);
        }

        for change in &changes {
            tracing::info!(%change, "manifest updated");
        }

        Ok(Reconciliation { manifest, changes })
    }

    fn add_repository(&self, root: &mut Map<String, Value>) -> Result<()> {
        let entry = self.directives.repository();
        match root.get_mut("repositories") {
            Some(Value::Array(repos)) => repos.push(entry),
            Some(Value::Object(repos)) => {
                let key = free_key(repos, REPOSITORY_KEY);
                repos.insert(key, entry);
            }
            None | Some(Value::Null) | Some(Value::Bool(false)) => {
                root.insert("repositories".into(), Value::Array(vec![entry]));
            }
            Some(_) => return Err(Error::malformed("repositories", "a list or an object")),
        }
        Ok(())
    }

    fn configure_installer_paths(
        &self,
        root: &mut Map<String, Value>,
        changes: &mut Vec<Change>,
    ) -> Result<()> {
        let extra = object_entry(root, "extra", "extra")?;
        let paths = object_entry(extra, "installer-paths", "extra.installer-paths")?;
        let rules = self.directives.installer_rules();

        let mut stripped = Vec::new();
        for (path, tags) in paths.iter_mut() {
            let tags = tags_of(path, tags)?;
            for (canonical, tag) in &rules {
                if path == canonical {
                    continue;
                }
                let before = tags.len();
                tags.retain(|t| t.as_str() != Some(*tag));
                if tags.len() != before {
                    changes.push(Change::InstallerTagRemoved {
                        path: path.clone(),
                        tag: tag.to_string(),
                    });
                    stripped.push(path.clone());
                }
            }
        }

        paths.retain(|path, tags| {
            let empty = tags.as_array().is_some_and(Vec::is_empty);
            if empty && stripped.contains(path) {
                changes.push(Change::InstallerPathRemoved { path: path.clone() });
                false
            } else {
                true
            }
        });

        for (canonical, tag) in rules {
            let tags = paths
                .entry(canonical.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            let tags = tags_of(&canonical, tags)?;
            if !tags.iter().any(|t| t.as_str() == Some(tag)) {
                tags.push(Value::String(tag.to_string()));
                changes.push(Change::InstallerTagAdded {
                    path: canonical,
                    tag: tag.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Reconcile `manifest` against `directives`.
pub fn reconcile(manifest: Value, directives: &Directives) -> Result<Reconciliation> {
    Reconciler::new(directives.clone()).reconcile(manifest)
}

fn root(manifest: &Value) -> Result<&Map<String, Value>> {
    manifest
        .as_object()
        .ok_or_else(|| Error::malformed("<root>", "an object"))
}

fn tags_of<'a>(path: &str, tags: &'a mut Value) -> Result<&'a mut Vec<Value>> {
    tags.as_array_mut()
        .ok_or_else(|| Error::malformed(format!("extra.installer-paths.{}", path), "a list of tags"))
}

fn free_key(map: &Map<String, Value>, base: &str) -> String {
    if !map.contains_key(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|key| !map.contains_key(key))
        .unwrap_or_else(|| base.to_string())
}
