// src/store/fs.rs
//! Filesystem object store: one directory per bucket, keys as relative paths

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;
use tracing::warn;
use walkdir::WalkDir;

use super::{relative_key_path, ObjectStore};
use crate::error::BackendError;

/// Reserved file-name prefix for half-written objects
///
/// Staging files are never listed, and keys whose last segment starts with
/// this prefix are rejected.
pub const STAGING_PREFIX: &str = ".decrypt-relocate-staging-";

#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn bucket_dir(&self, bucket: &str) -> Result<PathBuf, BackendError> {
        if bucket.contains('/') {
            return Err(BackendError::InvalidKey(bucket.to_owned()));
        }
        Ok(self.root.join(relative_key_path(bucket)?))
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, BackendError> {
        let relative = relative_key_path(key)?;
        if relative
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with(STAGING_PREFIX))
        {
            return Err(BackendError::InvalidKey(key.to_owned()));
        }
        Ok(self.bucket_dir(bucket)?.join(relative))
    }

    /// Every object key in `bucket`, sorted, `/`-separated
    pub fn list_keys(&self, bucket: &str) -> Result<Vec<String>, BackendError> {
        let dir = self.bucket_dir(bucket)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = entry.map_err(|e| BackendError::Unavailable(e.to_string()))?;
            if !entry.file_type().is_file()
                || entry.file_name().to_string_lossy().starts_with(STAGING_PREFIX)
            {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&dir)
                .map_err(|e| BackendError::Unavailable(e.to_string()))?;
            let segments: Option<Vec<&str>> =
                relative.components().map(|c| c.as_os_str().to_str()).collect();
            let Some(segments) = segments else {
                warn!("Skipping non-UTF-8 object name {}", entry.path().display());
                continue;
            };
            keys.push(segments.join("/"));
        }
        Ok(keys)
    }
}

impl ObjectStore for FsObjectStore {
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BackendError> {
        let path = self.object_path(bucket, key)?;
        match std::fs::read(&path) {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(BackendError::NotFound),
            Err(e) => Err(BackendError::Io(e)),
        }
    }

    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), BackendError> {
        let path = self.object_path(bucket, key)?;
        let parent = path
            .parent()
            .ok_or_else(|| BackendError::InvalidKey(key.to_owned()))?;
        std::fs::create_dir_all(parent)?;

        // Write next to the target, then rename over it
        let mut staged = Builder::new().prefix(STAGING_PREFIX).tempfile_in(parent)?;
        staged.write_all(body)?;
        staged.as_file().sync_all()?;
        staged.persist(&path).map_err(|e| BackendError::Io(e.error))?;
        Ok(())
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), BackendError> {
        let path = self.object_path(bucket, key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BackendError::Io(e)),
        }
    }
}
