//! Package-manager lifecycle events and the handlers they trigger
//!
//! The table is built once and looked up by event; there is no name-based
//! dispatch at call time.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use wp_fs::{NormalizedPath, io};

use crate::directives::{Directives, WORDPRESS_PACKAGE};
use crate::error::{Error, Result};
use crate::file::{ManifestFile, Outcome};
use crate::reconcile::Reconciler;
use crate::tree;

/// Lifecycle events emitted by the package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleEvent {
    PreInstallCmd,
    PreUpdateCmd,
    PrePackageInstall,
    PostPackageInstall,
    PostPackageUpdate,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 5] = [
        Self::PreInstallCmd,
        Self::PreUpdateCmd,
        Self::PrePackageInstall,
        Self::PostPackageInstall,
        Self::PostPackageUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreInstallCmd => "pre-install-cmd",
            Self::PreUpdateCmd => "pre-update-cmd",
            Self::PrePackageInstall => "pre-package-install",
            Self::PostPackageInstall => "post-package-install",
            Self::PostPackageUpdate => "post-package-update",
        }
    }

    /// Whether the event concerns a single package operation.
    pub fn is_package_event(&self) -> bool {
        matches!(
            self,
            Self::PrePackageInstall | Self::PostPackageInstall | Self::PostPackageUpdate
        )
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| Error::UnknownEvent { name: s.to_string() })
    }
}

/// Work done in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handler {
    /// Reconcile composer.json
    ConfigureManifest,
    /// Work out where the WordPress core package goes
    SetInstallDirectory,
    /// Drop the bundled wp-content after WordPress core is installed
    CleanInstallation,
}

/// Event-to-handler table.
#[derive(Debug, Clone)]
pub struct EventMap {
    entries: Vec<(LifecycleEvent, Vec<Handler>)>,
}

impl EventMap {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The table used by the WordPress integration.
    pub fn standard() -> Self {
        let mut map = Self::new();
        map.register(LifecycleEvent::PreInstallCmd, Handler::ConfigureManifest);
        map.register(LifecycleEvent::PreUpdateCmd, Handler::ConfigureManifest);
        map.register(LifecycleEvent::PrePackageInstall, Handler::SetInstallDirectory);
        map.register(LifecycleEvent::PostPackageInstall, Handler::CleanInstallation);
        map.register(LifecycleEvent::PostPackageUpdate, Handler::CleanInstallation);
        map
    }

    /// Append `handler` to the handlers run for `event`.
    pub fn register(&mut self, event: LifecycleEvent, handler: Handler) {
        match self.entries.iter_mut().find(|(e, _)| *e == event) {
            Some((_, handlers)) => handlers.push(handler),
            None => self.entries.push((event, vec![handler])),
        }
    }

    /// Handlers for `event`, in registration order.
    pub fn handlers_for(&self, event: LifecycleEvent) -> &[Handler] {
        self.entries
            .iter()
            .find(|(e, _)| *e == event)
            .map(|(_, handlers)| handlers.as_slice())
            .unwrap_or(&[])
    }

    /// Events with at least one handler.
    pub fn events(&self) -> impl Iterator<Item = LifecycleEvent> + '_ {
        self.entries.iter().map(|(event, _)| *event)
    }
}

impl Default for EventMap {
    fn default() -> Self {
        Self::standard()
    }
}

/// What a handler did.
#[derive(Debug, Clone)]
pub enum HandlerReport {
    Configured(Outcome),
    InstallDirectory(String),
    Cleaned { path: NormalizedPath, removed: bool },
    Skipped { reason: String },
}

/// Runs handlers against a project on disk.
#[derive(Debug)]
pub struct EventRunner<'a> {
    root: NormalizedPath,
    manifest: ManifestFile,
    reconciler: &'a Reconciler,
    map: EventMap,
}

impl<'a> EventRunner<'a> {
    pub fn new(root: impl Into<NormalizedPath>, manifest: ManifestFile, reconciler: &'a Reconciler) -> Self {
        Self {
            root: root.into(),
            manifest,
            reconciler,
            map: EventMap::standard(),
        }
    }

    pub fn with_map(mut self, map: EventMap) -> Self {
        self.map = map;
        self
    }

    /// Run every handler registered for `event`.
    ///
    /// `package` names the package for package events.
    pub fn dispatch(&self, event: LifecycleEvent, package: Option<&str>) -> Result<Vec<HandlerReport>> {
        let handlers = self.map.handlers_for(event);
        tracing::debug!(%event, ?package, handlers = handlers.len(), "dispatching event");

        let package = if event.is_package_event() {
            if package.is_none() {
                tracing::warn!(%event, "package event dispatched without a package name");
            }
            package
        } else {
            if let Some(name) = package {
                tracing::debug!(%event, package = name, "ignoring package name for command event");
            }
            None
        };

        handlers
            .iter()
            .map(|handler| self.run(*handler, package))
            .collect()
    }

    fn run(&self, handler: Handler, package: Option<&str>) -> Result<HandlerReport> {
        match handler {
            Handler::ConfigureManifest => Ok(HandlerReport::Configured(
                self.manifest.reconcile_in_place(self.reconciler, false)?,
            )),
            Handler::SetInstallDirectory => {
                let manifest = self.manifest.load()?;
                Ok(HandlerReport::InstallDirectory(install_directory(
                    &manifest,
                    self.reconciler.directives(),
                )))
            }
            Handler::CleanInstallation => self.clean_installation(package),
        }
    }

    fn clean_installation(&self, package: Option<&str>) -> Result<HandlerReport> {
        if package != Some(WORDPRESS_PACKAGE) {
            return Ok(HandlerReport::Skipped {
                reason: format!("{} is not {}", package.unwrap_or("<none>"), WORDPRESS_PACKAGE),
            });
        }

        let manifest = self.manifest.load()?;
        let Some(install_dir) = manifest
            .get("extra")
            .and_then(|extra| extra.get("wordpress-install-dir"))
            .filter(|value| tree::is_set(value))
            .and_then(Value::as_str)
        else {
            return Ok(HandlerReport::Skipped {
                reason: "extra.wordpress-install-dir is not set".to_string(),
            });
        };

        let path = self.root.join(install_dir).join("wp-content");
        let removed = io::remove_dir_if_exists(&path)?;
        Ok(HandlerReport::Cleaned { path, removed })
    }
}

/// Install directory the WordPress core package will use.
pub fn install_directory(manifest: &Value, directives: &Directives) -> String {
    manifest
        .get("extra")
        .and_then(|extra| extra.get("wordpress-install-dir"))
        .filter(|value| tree::is_set(value))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| directives.install_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("pre-install-cmd", LifecycleEvent::PreInstallCmd)]
    #[case("pre-update-cmd", LifecycleEvent::PreUpdateCmd)]
    #[case("pre-package-install", LifecycleEvent::PrePackageInstall)]
    #[case("post-package-install", LifecycleEvent::PostPackageInstall)]
    #[case("post-package-update", LifecycleEvent::PostPackageUpdate)]
    fn test_event_names_round_trip(#[case] name: &str, #[case] event: LifecycleEvent) {
        assert_eq!(name.parse::<LifecycleEvent>().unwrap(), event);
        assert_eq!(event.to_string(), name);
    }

    #[test]
    fn test_unknown_event() {
        let err = "post-autoload-dump".parse::<LifecycleEvent>().unwrap_err();
        assert!(matches!(err, Error::UnknownEvent { .. }));
    }

    #[test]
    fn test_standard_table() {
        let map = EventMap::standard();
        assert_eq!(
            map.handlers_for(LifecycleEvent::PreInstallCmd),
            &[Handler::ConfigureManifest]
        );
        assert_eq!(
            map.handlers_for(LifecycleEvent::PrePackageInstall),
            &[Handler::SetInstallDirectory]
        );
        assert_eq!(
            map.handlers_for(LifecycleEvent::PostPackageUpdate),
            &[Handler::CleanInstallation]
        );
        assert_eq!(map.events().count(), 5);
    }

    #[test]
    fn test_register_appends() {
        let mut map = EventMap::new();
        assert!(map.handlers_for(LifecycleEvent::PreUpdateCmd).is_empty());
        map.register(LifecycleEvent::PreUpdateCmd, Handler::ConfigureManifest);
        map.register(LifecycleEvent::PreUpdateCmd, Handler::SetInstallDirectory);
        assert_eq!(
            map.handlers_for(LifecycleEvent::PreUpdateCmd),
            &[Handler::ConfigureManifest, Handler::SetInstallDirectory]
        );
    }

    #[test]
    fn test_package_events() {
        let package_events: Vec<_> = LifecycleEvent::ALL
            .into_iter()
            .filter(LifecycleEvent::is_package_event)
            .collect();
        assert_eq!(
            package_events,
            vec![
                LifecycleEvent::PrePackageInstall,
                LifecycleEvent::PostPackageInstall,
                LifecycleEvent::PostPackageUpdate,
            ]
        );
    }

    #[test]
    fn test_install_directory_prefers_manifest() {
        let directives = Directives::new("public").unwrap();
        let manifest = json!({"extra": {"wordpress-install-dir": "web/core"}});
        assert_eq!(install_directory(&manifest, &directives), "web/core");
        assert_eq!(install_directory(&json!({}), &directives), "public/wp");
    }
}
