//! # campus-store
//!
//! Encrypted on-device persistence for the Campus client session.
//!
//! Four independent records live here: the bearer token, the cached user
//! profile, the push-notification token and the cached classroom context.
//! Every value is sealed with XChaCha20-Poly1305 under a key derived from a
//! per-device secret before it touches SQLite. The async [`SessionStore`]
//! handle is what the rest of the application talks to; [`Database`] is the
//! synchronous layer underneath it.

pub mod database;
pub mod device_key;
pub mod entries;
pub mod migrations;
pub mod session;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use session::{Session, SessionKey, SessionStore};
