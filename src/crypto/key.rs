// src/crypto/key.rs
//! Private key parsing — PEM (PKCS#8 / PKCS#1) or base64 DER

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::aliases::SecretString;
use crate::consts::{ENCRYPTED_PEM_HEADER, PKCS1_PEM_HEADER, PKCS8_PEM_HEADER};
use crate::error::RelayError;

pub type Result<T> = std::result::Result<T, RelayError>;

/// Parsed RSA private key, only ever used for decryption
///
/// The wrapped key zeroizes its components on drop.
pub struct KeyMaterial {
    key: RsaPrivateKey,
}

impl KeyMaterial {
    /// Parse the raw value of a secret
    pub fn parse(secret: &SecretString) -> Result<Self> {
        Self::from_text(secret.expose_secret())
    }

    /// Parse PEM (PKCS#8 or PKCS#1) or base64-encoded DER key text
    pub fn from_text(text: &str) -> Result<Self> {
        let text = text.trim();

        if text.contains(ENCRYPTED_PEM_HEADER) {
            return Err(RelayError::MalformedKey(
                "password-protected keys are not supported".into(),
            ));
        }

        let key = if text.contains(PKCS8_PEM_HEADER) {
            RsaPrivateKey::from_pkcs8_pem(text)
                .map_err(|e| RelayError::MalformedKey(format!("PKCS#8 PEM: {e}")))?
        } else if text.contains(PKCS1_PEM_HEADER) {
            RsaPrivateKey::from_pkcs1_pem(text)
                .map_err(|e| RelayError::MalformedKey(format!("PKCS#1 PEM: {e}")))?
        } else {
            Self::from_base64_der(text)?
        };

        Ok(Self { key })
    }

    fn from_base64_der(text: &str) -> Result<RsaPrivateKey> {
        let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let der = STANDARD
            .decode(compact.as_bytes())
            .map_err(|_| RelayError::MalformedKey("neither PEM nor base64 DER".into()))?;

        RsaPrivateKey::from_pkcs8_der(&der)
            .or_else(|_| RsaPrivateKey::from_pkcs1_der(&der))
            .map_err(|e| RelayError::MalformedKey(format!("DER: {e}")))
    }

    pub fn from_private_key(key: RsaPrivateKey) -> Self {
        Self { key }
    }

    /// Modulus size in bytes — also the largest ciphertext this key accepts
    pub fn modulus_len(&self) -> usize {
        self.key.size()
    }

    pub fn public_key(&self) -> RsaPublicKey {
        self.key.to_public_key()
    }

    pub(crate) fn private_key(&self) -> &RsaPrivateKey {
        &self.key
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("modulus_bits", &(self.modulus_len() * 8))
            .finish_non_exhaustive()
    }
}
