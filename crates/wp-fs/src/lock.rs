//! Advisory lock guarding a read-modify-write cycle on a single file

use std::fs::{File, OpenOptions};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Exclusive advisory lock tied to a target file.
///
/// The lock lives on a sidecar `.<name>.lock` file next to the target, as
/// the target itself is replaced by rename on every write. The lock is
/// released when the guard is dropped. The sidecar file is never removed.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: NormalizedPath,
}

impl FileLock {
    /// Block until the exclusive lock for `target` is acquired.
    pub fn acquire(target: &NormalizedPath) -> Result<Self> {
        let path = Self::lock_path(target);
        let native = path.to_native();

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&native)
            .map_err(|e| Error::io(&native, e))?;

        file.lock_exclusive()
            .map_err(|_| Error::LockFailed { path: native.clone() })?;

        tracing::debug!(lock = %path, "acquired manifest lock");
        Ok(Self { file, path })
    }

    /// Try to acquire the lock without blocking.
    ///
    /// Returns `Ok(None)` when another holder has it.
    pub fn try_acquire(target: &NormalizedPath) -> Result<Option<Self>> {
        let path = Self::lock_path(target);
        let native = path.to_native();

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&native)
            .map_err(|e| Error::io(&native, e))?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { file, path })),
            Err(_) => Ok(None),
        }
    }

    /// Path of the sidecar lock file.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    fn lock_path(target: &NormalizedPath) -> NormalizedPath {
        let name = format!(".{}.lock", target.file_name().unwrap_or("manifest"));
        match target.parent() {
            Some(parent) => parent.join(&name),
            None => NormalizedPath::new(name),
        }
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(lock = %self.path, error = %e, "failed to release lock");
        }
    }
}
