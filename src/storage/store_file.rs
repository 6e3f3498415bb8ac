//! On-disk store document
//!
//! The store is a single YAML file:
//!
//! ```yaml
//! encrypted: true
//! salt: <base64 of 16 bytes, empty when not encrypted>
//! secrets: <label -> seed mapping, or the sealed envelope string>
//! ```
//!
//! A bare `label: seed` mapping without the wrapper keys is read as an
//! unencrypted store from older versions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TwofaResult;
use crate::models::SecretMap;

use super::file_io::{read_yaml, write_yaml_atomic};

/// The `secrets` field: a plain mapping or a sealed envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecretsField {
    Plain(SecretMap),
    Sealed(String),
}

/// The wrapped document as persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStoreFile {
    pub encrypted: bool,
    #[serde(default)]
    pub salt: String,
    pub secrets: SecretsField,
}

impl RawStoreFile {
    /// An unencrypted document holding `secrets`
    pub fn plain(secrets: SecretMap) -> Self {
        Self {
            encrypted: false,
            salt: String::new(),
            secrets: SecretsField::Plain(secrets),
        }
    }

    /// An encrypted document
    pub fn sealed(sealed: SealedSecrets) -> Self {
        Self {
            encrypted: true,
            salt: sealed.salt,
            secrets: SecretsField::Sealed(sealed.ciphertext),
        }
    }
}

/// Ciphertext and the salt its key was derived with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedSecrets {
    /// Base64 salt
    pub salt: String,
    /// Sealed envelope string
    pub ciphertext: String,
}

/// Either layout the store file may use
#[derive(Deserialize)]
#[serde(untagged)]
enum StoreDocument {
    Wrapped(RawStoreFile),
    Legacy(SecretMap),
}

/// What was found on disk
#[derive(Debug, Clone)]
pub enum StoreContents {
    /// No usable store: first run, or the file could not be read
    Empty,
    /// Wrapped, unencrypted store
    Plain(SecretMap),
    /// Bare mapping from the older format
    Legacy(SecretMap),
    /// Encrypted store awaiting a passphrase
    Locked(SealedSecrets),
}

/// Handle on the store file at a configured path
#[derive(Debug, Clone)]
pub struct StoreFile {
    path: PathBuf,
}

impl StoreFile {
    /// Create a handle for the store at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the store
    ///
    /// Never fails: a missing, unreadable, or malformed file reads as
    /// [`StoreContents::Empty`].
    pub fn read(&self) -> StoreContents {
        let document = match read_yaml::<StoreDocument, _>(&self.path) {
            Ok(Some(document)) => document,
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "no store file, starting empty");
                return StoreContents::Empty;
            }
            Err(e) => {
                tracing::warn!(error = %e, "treating store as empty");
                return StoreContents::Empty;
            }
        };

        match document {
            StoreDocument::Legacy(secrets) => {
                tracing::debug!(count = secrets.len(), "read legacy store");
                StoreContents::Legacy(secrets)
            }
            StoreDocument::Wrapped(raw) => match (raw.encrypted, raw.secrets) {
                (false, SecretsField::Plain(secrets)) => StoreContents::Plain(secrets),
                (true, SecretsField::Sealed(ciphertext)) => StoreContents::Locked(SealedSecrets {
                    salt: raw.salt,
                    ciphertext,
                }),
                (encrypted, _) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        encrypted,
                        "encryption flag does not match secrets, treating store as empty"
                    );
                    StoreContents::Empty
                }
            },
        }
    }

    /// Replace the store with `raw`
    pub fn write(&self, raw: &RawStoreFile) -> TwofaResult<()> {
        write_yaml_atomic(&self.path, raw)?;
        tracing::debug!(path = %self.path.display(), encrypted = raw.encrypted, "store written");
        Ok(())
    }
}
