//! Per-device secret from which the store encryption key is derived.
//!
//! The secret is 32 random bytes kept hex-encoded in `device.key` next to
//! the database. Losing the file makes every stored record unreadable, which
//! the session layer treats as "logged out".

use std::path::Path;

use campus_shared::crypto::{self, SymmetricKey};

use crate::error::Result;

/// Read the device secret at `path`, creating it on first use, and return
/// the derived store key.
pub fn load_or_create(path: &Path) -> Result<SymmetricKey> {
    let secret = if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        let bytes = hex::decode(raw.trim())?;
        crypto::key_from_slice(&bytes)?
    } else {
        let secret = crypto::random_secret();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, hex::encode(secret))?;
        restrict_permissions(path)?;
        tracing::info!(path = %path.display(), "created device key");
        secret
    };

    Ok(crypto::derive_store_key(&secret))
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn key_is_stable_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("device.key");

        let first = load_or_create(&path).unwrap();
        let second = load_or_create(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&path).unwrap().len(), 64);
    }

    #[test]
    fn malformed_key_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device.key");
        std::fs::write(&path, "abcd").unwrap();

        assert!(matches!(load_or_create(&path), Err(StoreError::Crypto(_))));

        std::fs::write(&path, "not hex at all").unwrap();
        assert!(matches!(load_or_create(&path), Err(StoreError::Hex(_))));
    }
}
