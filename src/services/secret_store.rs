//! Secret store service
//!
//! Holds the label to seed map for the length of one invocation and owns the
//! load/mutate/save lifecycle:
//!
//! ```text
//! StoreFile::read ──► Empty | Plain | Legacy ─────────────► SecretStore
//!                 └─► Locked ── unlock(passphrase) ───────► SecretStore (encrypted)
//! SecretStore ── add/rename/remove/set_password ──► save(passphrase) ──► StoreFile::write
//! ```
//!
//! The passphrase is never kept inside the store. `load` hands it back to
//! the caller, who passes it to `save` and drops it when the command ends.

use base64::{engine::general_purpose::STANDARD, Engine};
use regex::{Regex, RegexBuilder};
use zeroize::Zeroizing;

use crate::crypto::{self, SecureString};
use crate::error::{TwofaError, TwofaResult};
use crate::models::{Label, SecretMap, Seed};
use crate::storage::{RawStoreFile, SealedSecrets, StoreContents, StoreFile};

use super::passphrase::PassphraseSource;

/// In-memory store of labeled seeds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretStore {
    secrets: SecretMap,
    encrypted: bool,
}

/// A loaded store plus the passphrase that unlocked it, if any
#[derive(Debug)]
pub struct LoadedStore {
    pub store: SecretStore,
    pub passphrase: Option<SecureString>,
}

impl SecretStore {
    /// An empty, unencrypted store
    pub fn new() -> Self {
        Self::default()
    }

    /// An unencrypted store holding `secrets`
    pub fn from_map(secrets: SecretMap) -> Self {
        Self {
            secrets,
            encrypted: false,
        }
    }

    /// Load the store from disk
    ///
    /// Encrypted stores ask `source` for the passphrase. A wrong passphrase
    /// or corrupted ciphertext aborts with [`TwofaError::Authentication`].
    pub fn load(file: &StoreFile, source: &mut dyn PassphraseSource) -> TwofaResult<LoadedStore> {
        match file.read() {
            StoreContents::Empty => Ok(LoadedStore {
                store: Self::new(),
                passphrase: None,
            }),
            StoreContents::Plain(secrets) | StoreContents::Legacy(secrets) => Ok(LoadedStore {
                store: Self::from_map(secrets),
                passphrase: None,
            }),
            StoreContents::Locked(sealed) => {
                let passphrase = source.current_passphrase()?;
                let secrets = unlock(&sealed, &passphrase)?;
                tracing::debug!(count = secrets.len(), "store unlocked");
                Ok(LoadedStore {
                    store: Self {
                        secrets,
                        encrypted: true,
                    },
                    passphrase: Some(passphrase),
                })
            }
        }
    }

    /// Persist the whole store
    ///
    /// Encrypted stores are sealed under a key derived with a fresh salt.
    /// The document is built completely before the file is touched.
    pub fn save(&self, file: &StoreFile, passphrase: Option<&SecureString>) -> TwofaResult<()> {
        let raw = if self.encrypted {
            let passphrase = passphrase
                .filter(|p| !p.is_empty())
                .ok_or(TwofaError::MissingPassphrase)?;
            RawStoreFile::sealed(seal(&self.secrets, passphrase)?)
        } else {
            RawStoreFile::plain(self.secrets.clone())
        };

        file.write(&raw)
    }

    /// Add a new seed under `label`
    pub fn add(&mut self, label: &str, seed: &str) -> TwofaResult<Seed> {
        let label = Label::new(label)?;
        if self.secrets.contains_key(label.as_str()) {
            return Err(TwofaError::DuplicateLabel(label.to_string()));
        }

        let seed = Seed::parse(seed)?;
        tracing::debug!(%label, "secret added");
        self.secrets.insert(label, seed.clone());
        Ok(seed)
    }

    /// Move the seed stored under `label` to `new_label`
    ///
    /// All checks run before the map changes, so a failed rename leaves both
    /// labels as they were.
    pub fn rename(&mut self, label: &str, new_label: &str) -> TwofaResult<()> {
        if !self.secrets.contains_key(label) {
            return Err(TwofaError::LabelNotFound(label.to_string()));
        }
        if self.secrets.contains_key(new_label) {
            return Err(TwofaError::LabelExists(new_label.to_string()));
        }
        let new_label = Label::new(new_label)?;

        let (_, seed) = self
            .secrets
            .remove_entry(label)
            .ok_or_else(|| TwofaError::LabelNotFound(label.to_string()))?;
        tracing::debug!(from = label, to = %new_label, "secret renamed");
        self.secrets.insert(new_label, seed);
        Ok(())
    }

    /// Remove the seed stored under `label`
    ///
    /// Refuses unless `confirmed` is set.
    pub fn remove(&mut self, label: &str, confirmed: bool) -> TwofaResult<Seed> {
        if !self.secrets.contains_key(label) {
            return Err(TwofaError::LabelNotFound(label.to_string()));
        }
        if !confirmed {
            return Err(TwofaError::ConfirmationRequired);
        }

        let seed = self
            .secrets
            .remove(label)
            .ok_or_else(|| TwofaError::LabelNotFound(label.to_string()))?;
        tracing::debug!(label, "secret removed");
        Ok(seed)
    }

    /// Change encryption for the next save
    ///
    /// An empty passphrase turns encryption off.
    pub fn set_password(&mut self, new_passphrase: &SecureString) {
        self.encrypted = !new_passphrase.is_empty();
        tracing::debug!(encrypted = self.encrypted, "password changed");
    }

    /// Look up the seed for `label`
    pub fn get(&self, label: &str) -> Option<&Seed> {
        self.secrets.get(label)
    }

    /// Entries whose label matches `pattern`, case-insensitively
    ///
    /// The pattern is a regex searched anywhere in the label. Patterns that
    /// are not valid regexes match as plain substrings.
    pub fn query(&self, pattern: &str) -> Vec<(&Label, &Seed)> {
        let matcher = LabelMatcher::new(pattern);
        self.secrets
            .iter()
            .filter(|(label, _)| matcher.matches(label.as_str()))
            .collect()
    }

    /// All secrets
    pub fn secrets(&self) -> &SecretMap {
        &self.secrets
    }

    /// Whether the next save encrypts
    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Number of stored seeds
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

/// Seal the serialized map under a key derived with a fresh salt
fn seal(secrets: &SecretMap, passphrase: &SecureString) -> TwofaResult<SealedSecrets> {
    let salt = crypto::generate_salt();
    let key = crypto::derive_key(passphrase, &salt);
    let plaintext = SecureString::new(serde_yaml::to_string(secrets)?);
    let ciphertext = crypto::seal(plaintext.as_bytes(), &key)?;

    Ok(SealedSecrets {
        salt: STANDARD.encode(salt),
        ciphertext,
    })
}

/// Open a sealed map with `passphrase`
fn unlock(sealed: &SealedSecrets, passphrase: &SecureString) -> TwofaResult<SecretMap> {
    let salt = match STANDARD.decode(sealed.salt.trim()) {
        Ok(salt) => salt,
        Err(_) => {
            tracing::debug!("salt is not valid base64");
            // Same derivation cost as a wrong passphrase
            crypto::derive_key(passphrase, &[0u8; crypto::SALT_LEN]);
            return Err(TwofaError::Authentication);
        }
    };

    let key = crypto::derive_key(passphrase, &salt);
    let plaintext = Zeroizing::new(crypto::open(&sealed.ciphertext, &key)?);

    serde_yaml::from_slice(plaintext.as_slice()).map_err(|_| {
        tracing::debug!("decrypted payload is not a secret map");
        TwofaError::Authentication
    })
}

enum LabelMatcher {
    All,
    Pattern(Regex),
    Substring(String),
}

impl LabelMatcher {
    fn new(pattern: &str) -> Self {
        if pattern.is_empty() {
            return Self::All;
        }
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) => Self::Pattern(regex),
            Err(_) => Self::Substring(pattern.to_lowercase()),
        }
    }

    fn matches(&self, label: &str) -> bool {
        match self {
            Self::All => true,
            Self::Pattern(regex) => regex.is_match(label),
            Self::Substring(needle) => label.to_lowercase().contains(needle.as_str()),
        }
    }
}
