// src/crypto/decrypt.rs
use rsa::rand_core::OsRng;
use rsa::{Oaep, Pkcs1v15Encrypt};
use sha1::Sha1;
use sha2::Sha256;

use crate::aliases::PlainText;
use crate::crypto::KeyMaterial;
use crate::enums::PaddingMode;
use crate::error::RelayError;

pub type Result<T> = std::result::Result<T, RelayError>;

/// Pure RSA decryption with one fixed padding mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectDecryptor {
    padding: PaddingMode,
}

impl ObjectDecryptor {
    pub fn new(padding: PaddingMode) -> Self {
        Self { padding }
    }

    pub fn padding(&self) -> PaddingMode {
        self.padding
    }

    /// Decrypt ciphertext → plaintext (in-memory, blinded)
    pub fn decrypt(&self, key: &KeyMaterial, ciphertext: &[u8]) -> Result<PlainText> {
        let max_len = key.modulus_len();
        if ciphertext.len() > max_len {
            return Err(RelayError::DecryptionFailed(format!(
                "ciphertext is {} bytes, key accepts at most {max_len}",
                ciphertext.len()
            )));
        }

        let private_key = key.private_key();
        let plaintext = match self.padding {
            PaddingMode::OaepSha1 => {
                private_key.decrypt_blinded(&mut OsRng, Oaep::new::<Sha1>(), ciphertext)
            }
            PaddingMode::OaepSha256 => {
                private_key.decrypt_blinded(&mut OsRng, Oaep::new::<Sha256>(), ciphertext)
            }
            PaddingMode::Pkcs1v15 => {
                private_key.decrypt_blinded(&mut OsRng, Pkcs1v15Encrypt, ciphertext)
            }
        }
        .map_err(|e| RelayError::DecryptionFailed(format!("{} rejected input: {e}", self.padding)))?;

        Ok(PlainText::new(plaintext))
    }
}
