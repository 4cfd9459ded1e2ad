//! Sealed key/value rows in `session_entries`.

use campus_shared::crypto;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::{Result, StoreError};

impl Database {
    /// Seal `plaintext` (bound to `key`) and insert or overwrite its row.
    pub fn put_entry(&self, key: &str, plaintext: &[u8]) -> Result<()> {
        let sealed = crypto::seal(self.key(), key, plaintext)?;
        self.conn().execute(
            "INSERT INTO session_entries (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                            updated_at = excluded.updated_at",
            params![key, sealed, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Fetch and open the row for `key`. A row that fails to open is
    /// reported as [`StoreError::CorruptRecord`].
    pub fn get_entry(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let sealed: Option<Vec<u8>> = self
            .conn()
            .query_row(
                "SELECT value FROM session_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        let Some(sealed) = sealed else {
            return Ok(None);
        };

        crypto::open(self.key(), key, &sealed)
            .map(Some)
            .map_err(|_| StoreError::CorruptRecord {
                key: key.to_string(),
            })
    }

    /// Delete the row for `key`.  Returns `true` if a row was deleted.
    pub fn delete_entry(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM session_entries WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }

    // one statement per key, no surrounding transaction
    pub fn delete_entries(&self, keys: &[&str]) -> Result<usize> {
        let mut deleted = 0;
        for key in keys {
            if self.delete_entry(key)? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
