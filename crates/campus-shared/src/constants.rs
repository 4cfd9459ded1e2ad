/// `ProjectDirs` qualifier / organisation / application triple
pub const PROJECT_QUALIFIER: &str = "com";
pub const PROJECT_ORGANIZATION: &str = "campus";
pub const PROJECT_APPLICATION: &str = "campus";

/// File name of the encrypted session database
pub const SESSION_DB_FILE: &str = "session.db";

/// File name of the hex-encoded device secret
pub const DEVICE_KEY_FILE: &str = "device.key";

/// XChaCha20-Poly1305 nonce size in bytes
pub const NONCE_SIZE: usize = 24;

/// Symmetric key size in bytes (for XChaCha20-Poly1305)
pub const SYMMETRIC_KEY_SIZE: usize = 32;

/// Key derivation context (BLAKE3) for the session store key
pub const KDF_CONTEXT_SESSION_STORE: &str = "campus-session-store-v1";

/// Default REST API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default page size for paginated list endpoints
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Default currency code for fee amounts
pub const DEFAULT_CURRENCY: &str = "INR";
