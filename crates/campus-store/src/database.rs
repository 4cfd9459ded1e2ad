//! The SQLite file behind the session store.
//!
//! A [`Database`] pairs the connection with the key every row is sealed
//! under; [`crate::entries`] adds the row operations. Opening always brings
//! the schema up to date first.
//!
//! The default build writes a plain SQLite file whose values are sealed
//! individually. Building with the `sqlcipher` feature (needs OpenSSL)
//! encrypts the whole file as well.

use std::path::{Path, PathBuf};
use std::time::Duration;

use campus_shared::constants::{
    DEVICE_KEY_FILE, PROJECT_APPLICATION, PROJECT_ORGANIZATION, PROJECT_QUALIFIER,
    SESSION_DB_FILE,
};
use campus_shared::crypto::SymmetricKey;
use directories::ProjectDirs;
use rusqlite::Connection;

use crate::device_key;
use crate::error::{Result, StoreError};
use crate::migrations::run_migrations;

pub struct Database {
    conn: Connection,
    key: SymmetricKey,
}

impl Database {
    /// Open the session database in the platform data directory
    /// (`~/.local/share/campus` on Linux,
    /// `~/Library/Application Support/com.campus.campus` on macOS).
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION)
            .ok_or(StoreError::NoDataDir)?;
        Self::open_in(dirs.data_dir())
    }

    /// Open `session.db` in `dir`, creating the directory and the device
    /// key on first use.
    pub fn open_in(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        let key = device_key::load_or_create(&dir.join(DEVICE_KEY_FILE))?;
        Self::open_at(&dir.join(SESSION_DB_FILE), key)
    }

    pub fn open_at(path: &Path, key: SymmetricKey) -> Result<Self> {
        tracing::info!(path = %path.display(), "opening session database");
        let conn = Connection::open(path)?;

        #[cfg(feature = "sqlcipher")]
        conn.execute_batch(&format!("PRAGMA key = \"x'{}'\";", hex::encode(key)))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        // logout should not leave old token pages behind in the file
        conn.pragma_update(None, "secure_delete", "ON")?;
        conn.busy_timeout(Duration::from_secs(5))?;

        run_migrations(&conn)?;
        Ok(Self { conn, key })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn key(&self) -> &SymmetricKey {
        &self.key
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}
