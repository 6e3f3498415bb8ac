//! Business logic layer for twofa
//!
//! The secret store lifecycle and the passphrase seam it prompts through.

pub mod passphrase;
pub mod secret_store;

pub use passphrase::{confirm_passphrase, PassphraseSource, StaticPassphrase};
pub use secret_store::{LoadedStore, SecretStore};
