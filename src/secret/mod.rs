// src/secret/mod.rs
//! Secret store access and the per-invocation private key cache

use once_cell::unsync::OnceCell;
use tracing::{error, info};

use crate::aliases::SecretString;
use crate::crypto::KeyMaterial;
use crate::error::{BackendError, RelayError};

mod fs;
mod memory;

pub use fs::FsSecretStore;
pub use memory::InMemorySecretStore;

pub type Result<T> = std::result::Result<T, RelayError>;

/// A store of sensitive values addressed by identifier
pub trait SecretStore: Send + Sync {
    /// `Ok(None)` when the secret exists nowhere or carries no value
    fn get_secret_value(&self, secret_id: &str)
        -> std::result::Result<Option<SecretString>, BackendError>;
}

/// Fetches and parses the private key at most once
///
/// One provider lives for one invocation; every record of that invocation
/// borrows the same `KeyMaterial`.
pub struct SecretKeyProvider<'a, S: SecretStore + ?Sized> {
    store: &'a S,
    secret_id: &'a str,
    cached: OnceCell<KeyMaterial>,
}

impl<'a, S: SecretStore + ?Sized> SecretKeyProvider<'a, S> {
    pub fn new(store: &'a S, secret_id: &'a str) -> Self {
        Self {
            store,
            secret_id,
            cached: OnceCell::new(),
        }
    }

    pub fn secret_id(&self) -> &str {
        self.secret_id
    }

    /// Key material for this invocation, retrieved on first call
    ///
    /// A failed retrieval is not cached; every error here is fatal to the batch.
    pub fn fetch(&self) -> Result<&KeyMaterial> {
        self.cached.get_or_try_init(|| {
            self.retrieve().inspect_err(|e| error!("cannot obtain private key: {e}"))
        })
    }

    fn retrieve(&self) -> Result<KeyMaterial> {
        info!("Fetching private key from secret '{}'", self.secret_id);

        let secret = self
            .store
            .get_secret_value(self.secret_id)
            .map_err(|e| RelayError::SecretUnavailable {
                secret_id: self.secret_id.to_owned(),
                reason: e.to_string(),
            })?
            .filter(|s| !s.expose_secret().trim().is_empty())
            .ok_or_else(|| RelayError::EmptySecret {
                secret_id: self.secret_id.to_owned(),
            })?;

        let key = KeyMaterial::parse(&secret)?;
        info!("Private key loaded ({} bit)", key.modulus_len() * 8);
        Ok(key)
    }
}
