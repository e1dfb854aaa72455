// src/secret/fs.rs
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::SecretStore;
use crate::aliases::SecretString;
use crate::error::BackendError;
use crate::store::relative_key_path;

/// Secrets as files: the identifier is a relative path under `dir`
#[derive(Debug, Clone)]
pub struct FsSecretStore {
    dir: PathBuf,
}

impl FsSecretStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SecretStore for FsSecretStore {
    fn get_secret_value(&self, secret_id: &str) -> Result<Option<SecretString>, BackendError> {
        let path = self.dir.join(relative_key_path(secret_id)?);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(SecretString::new(value))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BackendError::Io(e)),
        }
    }
}
