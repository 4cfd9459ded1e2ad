use campus_shared::CryptoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// No home / app-data directory on this platform; pass an explicit
    /// directory instead.
    #[error("Could not determine application data directory")]
    NoDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    /// Sealing failed, or `device.key` holds the wrong number of bytes.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// `device.key` is not hex.
    #[error("Device key is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Could not encode session value: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The row exists but does not open under this device's key, or its
    /// JSON no longer matches the expected record.
    #[error("Stored record '{key}' is corrupt or from an incompatible version")]
    CorruptRecord { key: String },

    #[error("Session database lock poisoned")]
    LockPoisoned,

    /// The blocking task running the query was cancelled or panicked.
    #[error("Storage task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
