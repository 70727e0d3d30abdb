//! Manifest reconciliation for WordPress Composer projects
//!
//! Keeps `composer.json` configured for WordPress: public and install
//! directories, the wpackagist repository, installer paths for plugins and
//! themes, package sorting, and a canonical property order.
//!
//! ```
//! use serde_json::json;
//! use wp_manifest::{Directives, reconcile};
//!
//! let directives = Directives::new("public").unwrap();
//! let result = reconcile(json!({"name": "acme/site"}), &directives).unwrap();
//!
//! assert_eq!(result.manifest["extra"]["wordpress-install-dir"], "public/wp");
//! assert_eq!(result.manifest["config"]["sort-packages"], true);
//! ```

pub mod directives;
pub mod error;
pub mod events;
pub mod file;
pub mod gitignore;
pub mod order;
pub mod public_dir;
pub mod reconcile;
pub mod template;
pub mod tree;

pub use directives::{Directives, PLUGIN_TAG, THEME_TAG, WPACKAGIST_URL};
pub use error::{Error, Result};
pub use events::{EventMap, EventRunner, Handler, HandlerReport, LifecycleEvent};
pub use file::{MANIFEST_FILE, ManifestFile, Outcome};
pub use gitignore::merge_gitignore;
pub use public_dir::{Prompt, PublicDirResolver};
pub use reconcile::{Change, Presence, Reconciler, Reconciliation, reconcile};
pub use template::compile_template;
