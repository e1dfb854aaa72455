// src/store/memory.rs
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, PoisonError};

use super::ObjectStore;
use crate::enums::StoreOp;
use crate::error::BackendError;

/// One recorded call against an `InMemoryObjectStore`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreCall {
    pub op: StoreOp,
    pub bucket: String,
    pub key: String,
}

impl StoreCall {
    pub fn new(op: StoreOp, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            op,
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// In-process object store with a call log and per-call failure injection
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<BTreeMap<(String, String), Vec<u8>>>,
    calls: Mutex<Vec<StoreCall>>,
    failures: Mutex<HashSet<StoreCall>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, bucket: impl Into<String>, key: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((bucket.into(), key.into()), body.into());
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned()
    }

    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.object(bucket, key).is_some()
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make `op` on `bucket/key` fail as unavailable from now on
    pub fn fail_on(&self, op: StoreOp, bucket: impl Into<String>, key: impl Into<String>) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(StoreCall::new(op, bucket, key));
    }

    fn record(&self, op: StoreOp, bucket: &str, key: &str) -> Result<(), BackendError> {
        let call = StoreCall::new(op, bucket, key);
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call.clone());

        if self
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&call)
        {
            return Err(BackendError::Unavailable(format!("injected {op} failure")));
        }
        Ok(())
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, BackendError> {
        self.record(StoreOp::Get, bucket, key)?;
        self.object(bucket, key).ok_or(BackendError::NotFound)
    }

    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), BackendError> {
        self.record(StoreOp::Put, bucket, key)?;
        self.insert(bucket, key, body.to_vec());
        Ok(())
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), BackendError> {
        self.record(StoreOp::Delete, bucket, key)?;
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&(bucket.to_owned(), key.to_owned()));
        Ok(())
    }
}
