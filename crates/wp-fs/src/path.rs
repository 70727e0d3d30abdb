//! Forward-slash paths for project-relative locations

use std::fmt;
use std::path::{Path, PathBuf};

/// A path stored with forward slashes.
///
/// Manifest values such as `extra.wordpress-install-dir` are joined onto the
/// project root as text and only become native paths at the I/O boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(path.as_ref().to_string_lossy().replace('\\', "/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Native path for I/O.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Append a relative segment, which may itself contain slashes.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        match self.0.as_str() {
            "" => Self(segment),
            base if base.ends_with('/') => Self(format!("{base}{segment}")),
            base => Self(format!("{base}/{segment}")),
        }
    }

    /// Everything before the last component; `None` for a bare name.
    pub fn parent(&self) -> Option<Self> {
        match self.trimmed().rsplit_once('/')? {
            ("", _) => Some(Self("/".to_string())),
            (head, _) => Some(Self(head.to_string())),
        }
    }

    /// Last component, ignoring a trailing slash.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.trimmed();
        let name = trimmed.rsplit_once('/').map_or(trimmed, |(_, tail)| tail);
        (!name.is_empty()).then_some(name)
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    fn trimmed(&self) -> &str {
        self.0.trim_end_matches('/')
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslashes_are_normalized() {
        let path = NormalizedPath::new("public\\wp\\wp-content");
        assert_eq!(path.as_str(), "public/wp/wp-content");
    }

    #[test]
    fn test_join_onto_empty_path() {
        let path = NormalizedPath::new("").join("composer.json");
        assert_eq!(path.as_str(), "composer.json");
    }

    #[test]
    fn test_join_onto_trailing_slash() {
        let path = NormalizedPath::new("public/").join("wp/wp-content");
        assert_eq!(path.as_str(), "public/wp/wp-content");
    }

    #[test]
    fn test_parent() {
        assert_eq!(
            NormalizedPath::new("site/composer.json").parent(),
            Some(NormalizedPath::new("site"))
        );
        assert_eq!(
            NormalizedPath::new("/composer.json").parent(),
            Some(NormalizedPath::new("/"))
        );
        assert_eq!(NormalizedPath::new("composer.json").parent(), None);
    }

    #[test]
    fn test_file_name_of_trailing_slash_dir() {
        let path = NormalizedPath::new("public/wp/");
        assert_eq!(path.file_name(), Some("wp"));
        assert_eq!(NormalizedPath::new("/").file_name(), None);
    }
}
