// src/secret/memory.rs
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use super::SecretStore;
use crate::aliases::SecretString;
use crate::error::BackendError;

/// In-process secret store that counts retrievals
#[derive(Debug, Default)]
pub struct InMemorySecretStore {
    secrets: Mutex<HashMap<String, String>>,
    outage: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(self, secret_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(secret_id, value);
        self
    }

    pub fn insert(&self, secret_id: impl Into<String>, value: impl Into<String>) {
        self.secrets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(secret_id.into(), value.into());
    }

    /// Make every following call fail with `reason`
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.outage.lock().unwrap_or_else(PoisonError::into_inner) = Some(reason.into());
    }

    /// Number of `get_secret_value` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SecretStore for InMemorySecretStore {
    fn get_secret_value(&self, secret_id: &str) -> Result<Option<SecretString>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = self
            .outage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(BackendError::Unavailable(reason));
        }

        Ok(self
            .secrets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(secret_id)
            .cloned()
            .map(SecretString::new))
    }
}
