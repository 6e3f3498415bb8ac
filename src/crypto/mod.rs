//! Cryptographic functions for twofa
//!
//! Provides AES-256-GCM encryption with PBKDF2-HMAC-SHA256 key derivation
//! for optional at-rest encryption of the secret store.

pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{open, seal, OpenFailure};
pub use key_derivation::{derive_key, generate_salt, DerivedKey, PBKDF2_ITERATIONS, SALT_LEN};
pub use secure_memory::SecureString;
