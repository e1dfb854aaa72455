// src/error.rs
//! Public error types for the entire crate

use thiserror::Error;

use crate::enums::StoreOp;

/// Pipeline error taxonomy
///
/// Secret and configuration errors are fatal to an invocation; everything
/// raised while moving one object only abandons that record.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("secret '{secret_id}' unavailable: {reason}")]
    SecretUnavailable { secret_id: String, reason: String },

    #[error("secret '{secret_id}' is empty")]
    EmptySecret { secret_id: String },

    #[error("malformed private key: {0}")]
    MalformedKey(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid notification: {0}")]
    InvalidNotification(String),

    #[error("object {bucket}/{key} not found")]
    ObjectNotFound { bucket: String, key: String },

    #[error("object {bucket}/{key} is empty")]
    EmptyObject { bucket: String, key: String },

    #[error("object store {op} on {bucket}/{key} failed: {reason}")]
    StoreUnavailable {
        op: StoreOp,
        bucket: String,
        key: String,
        reason: String,
    },

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("malformed event: {0}")]
    Event(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelayError {
    /// True for errors that must abort the whole invocation
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RelayError::SecretUnavailable { .. }
                | RelayError::EmptySecret { .. }
                | RelayError::MalformedKey(_)
                | RelayError::Config(_)
        )
    }
}

/// Failure reported by a store backend, before it is tied to a record
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("not found")]
    NotFound,

    #[error("invalid key '{0}'")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}
