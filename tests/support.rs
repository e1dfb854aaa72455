// tests/support.rs
//! Test fixtures — one RSA key pair per test binary, store setups

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use decrypt_relocate::crypto::seal;
use decrypt_relocate::secret::InMemorySecretStore;
use decrypt_relocate::store::InMemoryObjectStore;
use decrypt_relocate::{PaddingMode, PipelineSettings};
use once_cell::sync::Lazy;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::rand_core::OsRng;
use rsa::{RsaPrivateKey, RsaPublicKey};

#[allow(dead_code)]
pub const SECRET_ID: &str = "prod/decryptor/private-key";
#[allow(dead_code)]
pub const SRC: &str = "src";
#[allow(dead_code)]
pub const DEST: &str = "dest";

// 1024-bit keeps key generation fast in debug builds
pub static TEST_KEY: Lazy<RsaPrivateKey> =
    Lazy::new(|| RsaPrivateKey::new(&mut OsRng, 1024).expect("generate test key"));

#[allow(dead_code)]
pub static OTHER_KEY: Lazy<RsaPrivateKey> =
    Lazy::new(|| RsaPrivateKey::new(&mut OsRng, 1024).expect("generate second test key"));

#[allow(dead_code)]
pub fn public_key() -> RsaPublicKey {
    TEST_KEY.to_public_key()
}

#[allow(dead_code)]
pub fn pkcs8_pem() -> String {
    TEST_KEY
        .to_pkcs8_pem(LineEnding::LF)
        .expect("encode PKCS#8 PEM")
        .as_str()
        .to_owned()
}

#[allow(dead_code)]
pub fn pkcs1_pem() -> String {
    TEST_KEY
        .to_pkcs1_pem(LineEnding::LF)
        .expect("encode PKCS#1 PEM")
        .as_str()
        .to_owned()
}

#[allow(dead_code)]
pub fn pkcs8_der_base64() -> String {
    let der = TEST_KEY.to_pkcs8_der().expect("encode PKCS#8 DER");
    STANDARD.encode(der.as_bytes())
}

#[allow(dead_code)]
pub fn public_pem() -> String {
    public_key()
        .to_public_key_pem(LineEnding::LF)
        .expect("encode SPKI PEM")
}

/// Ciphertext for the test key, OAEP-SHA1
#[allow(dead_code)]
pub fn sealed(plaintext: &[u8]) -> Vec<u8> {
    seal(&public_key(), PaddingMode::OaepSha1, plaintext).expect("seal test payload")
}

/// Valid-length ciphertext that no padding check accepts
#[allow(dead_code)]
pub fn corrupted(plaintext: &[u8]) -> Vec<u8> {
    let mut ciphertext = sealed(plaintext);
    for byte in ciphertext.iter_mut().skip(8).take(16) {
        *byte ^= 0xA5;
    }
    ciphertext
}

#[allow(dead_code)]
pub fn secrets() -> InMemorySecretStore {
    InMemorySecretStore::new().with_secret(SECRET_ID, pkcs8_pem())
}

#[allow(dead_code)]
pub fn settings() -> PipelineSettings {
    PipelineSettings::new(SECRET_ID, DEST)
}

/// Source bucket pre-filled with sealed objects
#[allow(dead_code)]
pub fn objects_with(entries: &[(&str, &str)]) -> InMemoryObjectStore {
    let store = InMemoryObjectStore::new();
    for (key, plaintext) in entries {
        store.insert(SRC, *key, sealed(plaintext.as_bytes()));
    }
    store
}
