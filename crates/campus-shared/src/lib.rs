//! # campus-shared
//!
//! Types shared by every Campus crate: the server-owned domain records,
//! error enums, constants and the at-rest encryption helpers used by the
//! session store.

pub mod constants;
pub mod crypto;
pub mod error;
pub mod format;
pub mod models;
pub mod types;

pub use error::CryptoError;
