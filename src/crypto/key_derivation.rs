//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives the store encryption key from the user passphrase and the salt
//! persisted next to the ciphertext. The iteration count is part of the
//! on-disk format: stores saved with one value cannot be opened with another.

use std::fmt;

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// PBKDF2 iteration count used for every store
pub const PBKDF2_ITERATIONS: u32 = 500_000;

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// A derived encryption key, zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }
}

// Never print key material
impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Generate a fresh random salt
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive an encryption key from a passphrase and salt
///
/// Every call runs the full derivation; nothing is cached.
pub fn derive_key(passphrase: &str, salt: &[u8]) -> DerivedKey {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    let derived = DerivedKey { key };
    key.zeroize();
    derived
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key() {
        let salt = generate_salt();
        let key = derive_key("test_passphrase", &salt);
        assert_eq!(key.as_bytes().len(), KEY_LEN);
    }

    #[test]
    fn test_same_passphrase_same_key() {
        let salt = generate_salt();
        let key1 = derive_key("test_passphrase", &salt);
        let key2 = derive_key("test_passphrase", &salt);
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let salt = generate_salt();
        let key1 = derive_key("passphrase1", &salt);
        let key2 = derive_key("passphrase2", &salt);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("same_passphrase", &generate_salt());
        let key2 = derive_key("same_passphrase", &generate_salt());
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_salts_are_random() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = derive_key("secret", &generate_salt());
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
    }
}
