//! Error types for wp-manifest

use std::path::PathBuf;

/// Result type for wp-manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or reconciling a manifest
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A node has the wrong shape for the operation that needs it
    #[error("Malformed manifest at {path}: expected {expected}")]
    Malformed { path: String, expected: &'static str },

    /// The manifest file is not valid JSON
    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The directive set carries an empty public directory
    #[error("Public directory must not be empty")]
    MissingPublicDir,

    /// No public directory was declared, found or entered
    #[error(
        "Could not determine the public directory: set extra.public-dir, pass --public-dir or run interactively"
    )]
    PublicDirUndetermined,

    /// The interactive prompt failed
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    /// Unknown lifecycle event name
    #[error("Unknown lifecycle event: {name}")]
    UnknownEvent { name: String },

    #[error(transparent)]
    Fs(#[from] wp_fs::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn malformed(path: impl Into<String>, expected: &'static str) -> Self {
        Self::Malformed {
            path: path.into(),
            expected,
        }
    }

    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }
}
