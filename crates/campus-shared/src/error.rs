use thiserror::Error;

/// Failures sealing or opening a stored record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Could not seal record")]
    EncryptionFailed,

    #[error("Could not open record: wrong device key or damaged value")]
    DecryptionFailed,

    #[error("Device secret must be {expected} bytes, found {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
}
