// src/lib.rs
//! decrypt-relocate — decrypt sealed objects and move the plaintext
//!
//! Features:
//! - RSA private key fetched once per invocation from a secret store
//! - Explicit padding mode (OAEP-SHA1 by default)
//! - Write-then-delete relocation with per-record failure isolation
//! - Filesystem and in-memory store backends

pub mod aliases;
pub mod batch;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod enums;
pub mod event;
pub mod secret;
pub mod store;
pub mod transfer;

pub mod error;

// Re-export everything users need at the crate root
pub use aliases::{PlainText, SecretString};
pub use batch::{BatchProcessor, BatchReport};
pub use config::{load as load_config, Config, PipelineSettings};
pub use crypto::{KeyMaterial, ObjectDecryptor};
pub use enums::{PaddingMode, RecordStage, StoreOp};
pub use error::{BackendError, RelayError};
pub use event::{Batch, ChangeNotification};
pub use secret::{SecretKeyProvider, SecretStore};
pub use store::ObjectStore;
pub use transfer::{RecordOutcome, RecordStatus, TransferCoordinator};

pub type Result<T> = std::result::Result<T, RelayError>;
