//! Custom error types for twofa
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for twofa operations
#[derive(Error, Debug)]
pub enum TwofaError {
    /// Store file exists but could not be read or parsed
    #[error("Store unreadable: {0}")]
    StoreUnreadable(String),

    /// Wrong passphrase or corrupted ciphertext. The message never says which.
    #[error("Invalid password or corrupted store")]
    Authentication,

    /// Seed is not valid base32 or does not produce a code
    #[error("Invalid secret! Only A-Z and 2-7 allowed, and no spaces, aborting")]
    InvalidSecret,

    /// Label is empty
    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    /// Label is already present
    #[error("Label '{0}' already present, aborting")]
    DuplicateLabel(String),

    /// Label is not present
    #[error("Label '{0}' not present, aborting")]
    LabelNotFound(String),

    /// Rename target is already taken
    #[error("Label '{0}' already exists, aborting")]
    LabelExists(String),

    /// Destructive action attempted without confirmation
    #[error("The --confirm option is required, aborting")]
    ConfirmationRequired,

    /// The two interactively entered passphrases differ
    #[error("New store passwords not matching, aborting")]
    PassphraseMismatch,

    /// An encrypted save was attempted without a passphrase
    #[error("A password is required to save an encrypted store")]
    MissingPassphrase,

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// YAML/JSON serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// QR code rendering errors
    #[error("QR error: {0}")]
    Qr(String),
}

impl TwofaError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::LabelNotFound(_))
    }

    /// Check if this is an authentication failure
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }
}

impl From<std::io::Error> for TwofaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for TwofaError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for TwofaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for twofa operations
pub type TwofaResult<T> = Result<T, TwofaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TwofaError::DuplicateLabel("github".into());
        assert_eq!(err.to_string(), "Label 'github' already present, aborting");
    }

    #[test]
    fn test_authentication_message_is_generic() {
        let err = TwofaError::Authentication;
        assert_eq!(err.to_string(), "Invalid password or corrupted store");
        assert!(err.is_authentication());
    }

    #[test]
    fn test_not_found_error() {
        let err = TwofaError::LabelNotFound("gitlab".into());
        assert_eq!(err.to_string(), "Label 'gitlab' not present, aborting");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TwofaError = io_err.into();
        assert!(matches!(err, TwofaError::Io(_)));
    }
}
