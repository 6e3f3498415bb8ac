//! Passphrase sources
//!
//! The store asks for passphrases through this trait so the terminal prompt
//! stays out of the library and tests can supply fixed values.

use crate::crypto::SecureString;
use crate::error::{TwofaError, TwofaResult};

/// Something that can hand out passphrases on demand
pub trait PassphraseSource {
    /// The passphrase protecting the existing store
    fn current_passphrase(&mut self) -> TwofaResult<SecureString>;

    /// A new passphrase, entered twice. Empty means no encryption.
    fn new_passphrase(&mut self) -> TwofaResult<SecureString>;
}

/// Check that two interactively entered copies agree
pub fn confirm_passphrase(first: SecureString, second: &SecureString) -> TwofaResult<SecureString> {
    if first != *second {
        return Err(TwofaError::PassphraseMismatch);
    }
    Ok(first)
}

/// Fixed passphrases, for tests and non-interactive callers
#[derive(Debug, Clone, Default)]
pub struct StaticPassphrase {
    current: Option<SecureString>,
    new: Option<SecureString>,
}

impl StaticPassphrase {
    /// Supply `passphrase` whenever the current one is asked for
    pub fn current(passphrase: impl Into<SecureString>) -> Self {
        Self {
            current: Some(passphrase.into()),
            new: None,
        }
    }

    /// Supply `passphrase` as the new one
    pub fn with_new(mut self, passphrase: impl Into<SecureString>) -> Self {
        self.new = Some(passphrase.into());
        self
    }
}

impl PassphraseSource for StaticPassphrase {
    fn current_passphrase(&mut self) -> TwofaResult<SecureString> {
        self.current.clone().ok_or(TwofaError::MissingPassphrase)
    }

    fn new_passphrase(&mut self) -> TwofaResult<SecureString> {
        self.new.clone().ok_or(TwofaError::MissingPassphrase)
    }
}
