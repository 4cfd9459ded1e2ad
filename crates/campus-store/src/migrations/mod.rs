//! Schema versioning through `PRAGMA user_version`.
//!
//! Every open walks the numbered steps above the stored version, each in its
//! own transaction. A file written by a newer build is refused rather than
//! read with the wrong layout.

pub mod v001_session_entries;

use rusqlite::Connection;

use crate::error::{Result, StoreError};

type Step = fn(&Connection) -> std::result::Result<(), rusqlite::Error>;

const STEPS: &[(u32, &str, Step)] = &[(1, "session_entries", v001_session_entries::up)];

pub const CURRENT_VERSION: u32 = 1;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if found > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "session database is at schema v{found}, this build knows v{CURRENT_VERSION}"
        )));
    }

    for &(version, name, step) in STEPS.iter().filter(|(v, _, _)| *v > found) {
        tracing::info!(version, name, "migrating session database");
        let tx = conn.unchecked_transaction()?;
        step(&tx).map_err(|e| StoreError::Migration(format!("v{version} {name}: {e}")))?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
    }

    Ok(())
}
