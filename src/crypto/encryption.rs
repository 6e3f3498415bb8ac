//! AES-256-GCM envelope
//!
//! Seals the serialized secret map into a single text-safe string:
//! `base64(nonce || ciphertext || tag)`. Each seal uses a fresh nonce.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{TwofaError, TwofaResult};

use super::DerivedKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes
const TAG_SIZE: usize = 16;

/// Why an envelope failed to open. Only ever logged, never shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenFailure {
    /// Payload is not valid base64
    Encoding,
    /// Payload is shorter than nonce plus tag
    Truncated,
    /// Tag check failed: wrong key or tampered ciphertext
    Rejected,
}

/// Encrypt plaintext into a sealed envelope string
pub fn seal(plaintext: &[u8], key: &DerivedKey) -> TwofaResult<String> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| TwofaError::Serialization(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| TwofaError::Serialization(format!("Encryption failed: {}", e)))?;

    let mut payload = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    payload.extend_from_slice(&nonce_bytes);
    payload.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(payload))
}

/// Decrypt a sealed envelope string
///
/// Every failure maps to [`TwofaError::Authentication`].
pub fn open(sealed: &str, key: &DerivedKey) -> TwofaResult<Vec<u8>> {
    open_detailed(sealed, key).map_err(|failure| {
        tracing::debug!(?failure, "envelope rejected");
        TwofaError::Authentication
    })
}

fn open_detailed(sealed: &str, key: &DerivedKey) -> Result<Vec<u8>, OpenFailure> {
    let payload = STANDARD
        .decode(sealed.trim())
        .map_err(|_| OpenFailure::Encoding)?;

    if payload.len() < NONCE_SIZE + TAG_SIZE {
        return Err(OpenFailure::Truncated);
    }

    let (nonce_bytes, ciphertext) = payload.split_at(NONCE_SIZE);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| OpenFailure::Rejected)?;

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| OpenFailure::Rejected)
}
