//! The persisted client session.
//!
//! [`SessionStore`] is a cheaply clonable async handle. Each operation takes
//! the database handle for the duration of that call only and runs the
//! SQLite work on Tokio's blocking pool.
//!
//! Fields are independent: every setter writes exactly one row, and
//! [`SessionStore::clear_all`] issues one delete per field without a
//! surrounding transaction. Concurrent writers to the same field resolve as
//! last-write-wins.

use std::path::Path;
use std::sync::{Arc, Mutex};

use campus_shared::models::UserProfile;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::database::Database;
use crate::error::{Result, StoreError};

/// The four persisted session fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    AuthToken,
    UserInfo,
    NotificationToken,
    ClassInfo,
}

impl SessionKey {
    pub const ALL: [SessionKey; 4] = [
        SessionKey::AuthToken,
        SessionKey::UserInfo,
        SessionKey::NotificationToken,
        SessionKey::ClassInfo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::AuthToken => "auth_token",
            SessionKey::UserInfo => "user_info",
            SessionKey::NotificationToken => "notification_token",
            SessionKey::ClassInfo => "class_info",
        }
    }
}

/// Snapshot of everything the store holds. No token means logged out.
///
/// `class_info` is whatever JSON the app last cached there. `user_info` is
/// typed; a stored profile of another shape shows up here as `None` but
/// stays on disk for [`SessionStore::get_user_info`] to read.
#[derive(Clone, Default, PartialEq)]
pub struct Session {
    pub auth_token: Option<String>,
    pub user_info: Option<UserProfile>,
    pub notification_token: Option<String>,
    pub class_info: Option<Value>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.auth_token.is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("user_info", &self.user_info)
            .field(
                "notification_token",
                &self.notification_token.as_ref().map(|_| "<redacted>"),
            )
            .field("class_info", &self.class_info)
            .finish()
    }
}

#[derive(Clone)]
pub struct SessionStore {
    db: Arc<Mutex<Database>>,
}

impl SessionStore {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Open the store in the platform data directory.
    pub async fn open_default() -> Result<Self> {
        let db = tokio::task::spawn_blocking(Database::new)
            .await
            .map_err(|e| StoreError::Task(e.to_string()))??;
        Ok(Self::new(db))
    }

    /// Open the store inside an explicit directory.
    pub async fn open_in(dir: &Path) -> Result<Self> {
        let dir = dir.to_path_buf();
        let db = tokio::task::spawn_blocking(move || Database::open_in(&dir))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))??;
        Ok(Self::new(db))
    }

    async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let guard = db.lock().map_err(|_| StoreError::LockPoisoned)?;
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }

    // ------------------------------------------------------------------
    // Plain string fields
    // ------------------------------------------------------------------

    // Ok(false) when the value was blank and nothing was written.
    async fn set_string(&self, key: SessionKey, value: &str) -> Result<bool> {
        if value.trim().is_empty() {
            tracing::debug!(key = key.as_str(), "ignoring empty session value");
            return Ok(false);
        }
        let value = value.to_string();
        self.with_db(move |db| db.put_entry(key.as_str(), value.as_bytes()))
            .await?;
        Ok(true)
    }

    async fn get_string(&self, key: SessionKey) -> Result<Option<String>> {
        let raw = self.with_db(move |db| db.get_entry(key.as_str())).await?;
        raw.map(|bytes| {
            String::from_utf8(bytes).map_err(|_| StoreError::CorruptRecord {
                key: key.as_str().to_string(),
            })
        })
        .transpose()
    }

    /// Persist the bearer token. An empty token is ignored and reported
    /// as `false`.
    pub async fn set_token(&self, token: &str) -> Result<bool> {
        self.set_string(SessionKey::AuthToken, token).await
    }

    pub async fn get_token(&self) -> Result<Option<String>> {
        self.get_string(SessionKey::AuthToken).await
    }

    /// Persist the push-notification device token. An empty token is ignored.
    pub async fn set_notification_token(&self, token: &str) -> Result<bool> {
        self.set_string(SessionKey::NotificationToken, token).await
    }

    pub async fn get_notification_token(&self) -> Result<Option<String>> {
        self.get_string(SessionKey::NotificationToken).await
    }

    // ------------------------------------------------------------------
    // JSON fields
    // ------------------------------------------------------------------

    async fn set_json<T: Serialize>(&self, key: SessionKey, value: &T) -> Result<bool> {
        let json = serde_json::to_value(value)?;
        if is_blank(&json) {
            tracing::debug!(key = key.as_str(), "ignoring empty session value");
            return Ok(false);
        }
        let bytes = serde_json::to_vec(&json)?;
        self.with_db(move |db| db.put_entry(key.as_str(), &bytes))
            .await?;
        Ok(true)
    }

    async fn get_json<T: DeserializeOwned>(&self, key: SessionKey) -> Result<Option<T>> {
        let raw = self.with_db(move |db| db.get_entry(key.as_str())).await?;
        raw.map(|bytes| {
            serde_json::from_slice(&bytes).map_err(|e| {
                tracing::warn!(key = key.as_str(), error = %e, "stored record does not decode");
                StoreError::CorruptRecord {
                    key: key.as_str().to_string(),
                }
            })
        })
        .transpose()
    }

    /// Persist the cached profile as JSON. `null`, `{}`, `[]` and `""` are
    /// ignored.
    pub async fn set_user_info<T: Serialize>(&self, profile: &T) -> Result<bool> {
        self.set_json(SessionKey::UserInfo, profile).await
    }

    /// The cached profile, or `None` if never set.
    ///
    /// A stored profile that no longer decodes as `T` is an error
    /// ([`StoreError::CorruptRecord`]) rather than a silent "absent";
    /// [`SessionStore::load`] is the lenient variant.
    pub async fn get_user_info<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        self.get_json(SessionKey::UserInfo).await
    }

    /// Persist the cached classroom context as JSON.
    pub async fn set_class_info<T: Serialize>(&self, info: &T) -> Result<bool> {
        self.set_json(SessionKey::ClassInfo, info).await
    }

    pub async fn get_class_info<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        self.get_json(SessionKey::ClassInfo).await
    }

    // ------------------------------------------------------------------
    // Whole-session operations
    // ------------------------------------------------------------------

    /// Delete every session field. Idempotent.
    pub async fn clear_all(&self) -> Result<()> {
        let keys: Vec<&'static str> = SessionKey::ALL.iter().map(SessionKey::as_str).collect();
        let deleted = self.with_db(move |db| db.delete_entries(&keys)).await?;
        tracing::info!(deleted, "session cleared");
        Ok(())
    }

    /// Read all four fields into a [`Session`].
    ///
    /// Rows that do not open under this device's key, or that are not JSON
    /// where JSON is expected, are logged, deleted and reported as absent.
    /// A well-formed profile that does not match [`UserProfile`] is
    /// reported as absent but left in place.
    pub async fn load(&self) -> Result<Session> {
        let profile: Option<Value> = self
            .lenient(SessionKey::UserInfo, self.get_user_info().await)
            .await?;
        let user_info = profile.and_then(|raw| match serde_json::from_value(raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(error = %e, "cached profile has an unexpected shape");
                None
            }
        });

        Ok(Session {
            auth_token: self
                .lenient(SessionKey::AuthToken, self.get_token().await)
                .await?,
            user_info,
            notification_token: self
                .lenient(
                    SessionKey::NotificationToken,
                    self.get_notification_token().await,
                )
                .await?,
            class_info: self
                .lenient(SessionKey::ClassInfo, self.get_class_info().await)
                .await?,
        })
    }

    async fn lenient<T>(&self, key: SessionKey, read: Result<Option<T>>) -> Result<Option<T>> {
        match read {
            Err(StoreError::CorruptRecord { .. }) => {
                tracing::warn!(key = key.as_str(), "discarding corrupt session record");
                self.with_db(move |db| db.delete_entry(key.as_str())).await?;
                Ok(None)
            }
            other => other,
        }
    }
}

// `null`, `""`, `{}` and `[]`: values the JSON setters skip.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
