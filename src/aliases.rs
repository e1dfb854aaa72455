// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! Key text and decrypted payloads are wrapped so they zeroize on drop.

pub use secure_gate::dynamic_alias;

// Dynamic secrets
dynamic_alias!(SecretString, String); // Raw secret-store value (PEM or base64 DER)
dynamic_alias!(PlainText, Vec<u8>); // Decrypted object body
