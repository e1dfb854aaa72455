// src/crypto/encrypt.rs
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::rand_core::OsRng;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPublicKey};
use sha1::Sha1;
use sha2::Sha256;

use crate::crypto::KeyMaterial;
use crate::enums::PaddingMode;
use crate::error::RelayError;

pub type Result<T> = std::result::Result<T, RelayError>;

/// Seal plaintext for the pipeline → RSA ciphertext of exactly the modulus size
///
/// Oversized plaintext is rejected, never truncated.
pub fn seal(public_key: &RsaPublicKey, padding: PaddingMode, plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut rng = OsRng;
    match padding {
        PaddingMode::OaepSha1 => public_key.encrypt(&mut rng, Oaep::new::<Sha1>(), plaintext),
        PaddingMode::OaepSha256 => public_key.encrypt(&mut rng, Oaep::new::<Sha256>(), plaintext),
        PaddingMode::Pkcs1v15 => public_key.encrypt(&mut rng, Pkcs1v15Encrypt, plaintext),
    }
    .map_err(|e| RelayError::EncryptionFailed(format!("{padding}: {e}")))
}

/// Load a public key from SPKI PEM, PKCS#1 PEM, or derive it from a private key
pub fn load_public_key(text: &str) -> Result<RsaPublicKey> {
    let text = text.trim();
    if text.contains("-----BEGIN PUBLIC KEY-----") {
        RsaPublicKey::from_public_key_pem(text)
            .map_err(|e| RelayError::MalformedKey(format!("SPKI PEM: {e}")))
    } else if text.contains("-----BEGIN RSA PUBLIC KEY-----") {
        RsaPublicKey::from_pkcs1_pem(text)
            .map_err(|e| RelayError::MalformedKey(format!("PKCS#1 PEM: {e}")))
    } else {
        Ok(KeyMaterial::from_text(text)?.public_key())
    }
}
