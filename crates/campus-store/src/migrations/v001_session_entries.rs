//! v001 -- Initial schema creation.
//!
//! A single key/value table. Each session field is its own row so that
//! fields are written and deleted independently of each other.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS session_entries (
    key        TEXT PRIMARY KEY NOT NULL,   -- SessionKey::as_str()
    value      BLOB NOT NULL,               -- nonce || XChaCha20-Poly1305 ciphertext
    updated_at TEXT NOT NULL                -- ISO-8601 / RFC-3339
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
