//! Atomic I/O operations with file locking

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Replace `path` with `content` in one step.
///
/// The bytes go to a staging file next to the target, written and synced
/// under an exclusive lock, which is then renamed over the target. On
/// failure the staging file is removed and the target is left as it was.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();
    if let Some(dir) = target.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }

    let staging = staging_path(&target);
    let result = fill(&staging, content)
        .and_then(|()| fs::rename(&staging, &target).map_err(|e| Error::io(&target, e)));

    if result.is_err() {
        if let Err(e) = fs::remove_file(&staging) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %staging.display(), error = %e, "failed to remove staging file");
            }
        }
    } else {
        tracing::debug!(path = %path, bytes = content.len(), "wrote file atomically");
    }
    result
}

/// `.<name>.<pid>.tmp` beside `target`, on the same filesystem.
fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

fn fill(staging: &Path, content: &[u8]) -> Result<()> {
    let locked = || Error::LockFailed {
        path: staging.to_path_buf(),
    };

    let mut file = File::create(staging).map_err(|e| Error::io(staging, e))?;
    file.lock_exclusive().map_err(|_| locked())?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| Error::io(staging, e))?;
    FileExt::unlock(&file).map_err(|_| locked())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content, returning `None` when the file does not exist.
pub fn read_text_if_exists(path: &NormalizedPath) -> Result<Option<String>> {
    let native_path = path.to_native();
    match fs::read_to_string(&native_path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Recursively remove a directory.
///
/// Returns `false` when there was nothing to remove.
pub fn remove_dir_if_exists(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();
    match fs::remove_dir_all(&native_path) {
        Ok(()) => {
            tracing::debug!(path = %path, "removed directory");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}
