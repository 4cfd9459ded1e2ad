//! At-rest sealing for session records.
//!
//! A sealed value is `nonce || ciphertext` under XChaCha20-Poly1305. The
//! record's key name is bound in as associated data, so a row copied under a
//! different key fails to open.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    XChaCha20Poly1305, XNonce,
};
use rand::RngCore;

use crate::constants::{KDF_CONTEXT_SESSION_STORE, NONCE_SIZE, SYMMETRIC_KEY_SIZE};
use crate::error::CryptoError;

pub type SymmetricKey = [u8; SYMMETRIC_KEY_SIZE];

/// 32 random bytes from the OS; used as the per-device secret.
pub fn random_secret() -> SymmetricKey {
    let mut secret = [0u8; SYMMETRIC_KEY_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut secret);
    secret
}

pub fn key_from_slice(bytes: &[u8]) -> Result<SymmetricKey, CryptoError> {
    <SymmetricKey>::try_from(bytes).map_err(|_| CryptoError::InvalidKeyLength {
        expected: SYMMETRIC_KEY_SIZE,
        actual: bytes.len(),
    })
}

/// Store key for a device secret (BLAKE3 `derive_key`).
pub fn derive_store_key(device_secret: &[u8]) -> SymmetricKey {
    blake3::derive_key(KDF_CONTEXT_SESSION_STORE, device_secret)
}

pub fn seal(key: &SymmetricKey, record: &str, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce);

    let payload = Payload {
        msg: plaintext,
        aad: record.as_bytes(),
    };
    let ciphertext = XChaCha20Poly1305::new(key.into())
        .encrypt(XNonce::from_slice(&nonce), payload)
        .map_err(|_| CryptoError::EncryptionFailed)?;

    let mut sealed = nonce.to_vec();
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

pub fn open(key: &SymmetricKey, record: &str, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if sealed.len() < NONCE_SIZE {
        return Err(CryptoError::DecryptionFailed);
    }
    let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);

    let payload = Payload {
        msg: ciphertext,
        aad: record.as_bytes(),
    };
    XChaCha20Poly1305::new(key.into())
        .decrypt(XNonce::from_slice(nonce), payload)
        .map_err(|_| CryptoError::DecryptionFailed)
}
