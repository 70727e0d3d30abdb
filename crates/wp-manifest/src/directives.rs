//! The settings a WordPress project manifest must carry

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};

use crate::error::{Error, Result};

/// Tag that routes WordPress plugin packages through an installer path.
pub const PLUGIN_TAG: &str = "type:wordpress-plugin";

/// Tag that routes WordPress theme packages through an installer path.
pub const THEME_TAG: &str = "type:wordpress-theme";

/// URL of the WordPress package index.
pub const WPACKAGIST_URL: &str = "https://wpackagist.org";

/// Install directory of the WordPress core payload, relative to the public directory.
pub const INSTALL_DIR_SUFFIX: &str = "wp";

/// Name of the WordPress core package.
pub const WORDPRESS_PACKAGE: &str = "johnpbloch/wordpress";

/// Key under which the package index is added when `repositories` is a mapping.
pub const REPOSITORY_KEY: &str = "wpackagist";

/// Matches the package index URL with or without TLS and a trailing slash.
pub static WPACKAGIST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://wpackagist\.org/?$").expect("Invalid wpackagist pattern")
});

/// Target state of a manifest, derived from the project's public directory.
///
/// ```
/// use wp_manifest::Directives;
///
/// let directives = Directives::new("public").unwrap();
/// assert_eq!(directives.install_dir(), "public/wp");
/// assert_eq!(directives.plugin_path(), "public/wp/wp-content/plugins/{$name}/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directives {
    public_dir: String,
}

impl Directives {
    /// Build the directive set for a public directory.
    ///
    /// Surrounding slashes are trimmed; an empty directory is rejected.
    pub fn new(public_dir: impl AsRef<str>) -> Result<Self> {
        let public_dir = public_dir.as_ref().trim().trim_matches('/');
        if public_dir.is_empty() {
            return Err(Error::MissingPublicDir);
        }
        Ok(Self {
            public_dir: public_dir.to_string(),
        })
    }

    /// The public (web root) directory.
    pub fn public_dir(&self) -> &str {
        &self.public_dir
    }

    /// Where the WordPress core package is installed.
    pub fn install_dir(&self) -> String {
        format!("{}/{}", self.public_dir, INSTALL_DIR_SUFFIX)
    }

    /// Installer path template for plugins.
    pub fn plugin_path(&self) -> String {
        format!("{}/wp/wp-content/plugins/{{$name}}/", self.public_dir)
    }

    /// Installer path template for themes.
    pub fn theme_path(&self) -> String {
        format!("{}/themes/{{$name}}/", self.public_dir)
    }

    /// The repository entry appended when the package index is missing.
    pub fn repository(&self) -> Value {
        json!({
            "type": "composer",
            "url": WPACKAGIST_URL,
        })
    }

    /// Pattern that recognises an existing package index entry.
    pub fn repository_pattern(&self) -> &Regex {
        &WPACKAGIST_PATTERN
    }

    /// `(template, tag)` pairs that must own their tag exclusively.
    pub fn installer_rules(&self) -> [(String, &'static str); 2] {
        [
            (self.plugin_path(), PLUGIN_TAG),
            (self.theme_path(), THEME_TAG),
        ]
    }
}
