//! Terminal prompts
//!
//! Hidden-input prompting for passphrases and secrets via rpassword.

use crate::crypto::SecureString;
use crate::error::{TwofaError, TwofaResult};
use crate::services::passphrase::{confirm_passphrase, PassphraseSource};

/// Reads passphrases from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }

    /// Read a seed without echoing it
    pub fn read_secret(&mut self) -> TwofaResult<SecureString> {
        read_hidden("Enter secret: ")
    }
}

impl PassphraseSource for TerminalPrompt {
    fn current_passphrase(&mut self) -> TwofaResult<SecureString> {
        read_hidden("Enter store password: ")
    }

    fn new_passphrase(&mut self) -> TwofaResult<SecureString> {
        let first = read_hidden("Enter new store password: ")?;
        let second = read_hidden("Confirm new store password: ")?;
        confirm_passphrase(first, &second)
    }
}

/// Prompt for a line of hidden input
fn read_hidden(prompt: &str) -> TwofaResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| TwofaError::Io(format!("Failed to read input: {}", e)))
}
