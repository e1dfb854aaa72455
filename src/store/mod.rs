// src/store/mod.rs
//! Object store access — the thin get/put/delete surface the pipeline needs

use std::path::{Component, Path, PathBuf};

use crate::error::BackendError;

mod fs;
mod memory;

pub use fs::{FsObjectStore, STAGING_PREFIX};
pub use memory::{InMemoryObjectStore, StoreCall};

/// Key-addressed object storage
pub trait ObjectStore: Send + Sync {
    /// Full object body; `BackendError::NotFound` when absent
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BackendError>;

    /// Create or overwrite
    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), BackendError>;

    /// Idempotent: deleting an absent key succeeds
    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), BackendError>;
}

/// Map a `/`-separated key onto a relative path that cannot escape its root
pub(crate) fn relative_key_path(key: &str) -> Result<PathBuf, BackendError> {
    let invalid = || BackendError::InvalidKey(key.to_owned());

    if key.is_empty() || key.contains('\0') {
        return Err(invalid());
    }

    let mut path = PathBuf::new();
    for segment in key.split('/') {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => path.push(part),
            _ => return Err(invalid()),
        }
    }
    Ok(path)
}
