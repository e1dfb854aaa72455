// src/crypto/mod.rs
//! Pure cryptographic operations — no I/O, no stores
//!
//! All functions work exclusively on in-memory buffers.
mod decrypt;
mod encrypt;
mod key;

pub use decrypt::ObjectDecryptor;
pub use encrypt::{load_public_key, seal};
pub use key::KeyMaterial;
