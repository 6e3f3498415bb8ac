//! Time-based one-time passwords (RFC 6238)
//!
//! HMAC-SHA1, 6 digits, 30 second steps: the parameters every mainstream
//! authenticator app assumes for a bare base32 seed.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{TwofaError, TwofaResult};

/// Number of digits in a generated code
pub const DIGITS: u32 = 6;

/// Length of one time step in seconds
pub const PERIOD: u64 = 30;

/// Decode a base32 seed into raw key bytes
///
/// Whitespace and trailing `=` padding are ignored; case does not matter.
/// Lengths no byte string encodes to (1, 3 or 6 mod 8) are rejected.
pub fn decode_seed(seed: &str) -> TwofaResult<Vec<u8>> {
    let cleaned: String = seed
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .trim_end_matches('=')
        .to_ascii_uppercase();

    if cleaned.is_empty() || !cleaned.chars().all(|c| matches!(c, 'A'..='Z' | '2'..='7')) {
        return Err(TwofaError::InvalidSecret);
    }
    if matches!(cleaned.len() % 8, 1 | 3 | 6) {
        return Err(TwofaError::InvalidSecret);
    }

    match base32::decode(base32::Alphabet::Rfc4648 { padding: false }, &cleaned) {
        Some(bytes) if !bytes.is_empty() => Ok(bytes),
        _ => Err(TwofaError::InvalidSecret),
    }
}

/// Compute the HOTP value for raw key bytes and a counter (RFC 4226)
fn hotp(key: &[u8], counter: u64) -> TwofaResult<String> {
    let mut mac = Hmac::<Sha1>::new_from_slice(key).map_err(|_| TwofaError::InvalidSecret)?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // Dynamic truncation
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = ((digest[offset] as u32 & 0x7f) << 24)
        | ((digest[offset + 1] as u32) << 16)
        | ((digest[offset + 2] as u32) << 8)
        | (digest[offset + 3] as u32);

    let code = binary % 10u32.pow(DIGITS);
    Ok(format!("{:0>width$}", code, width = DIGITS as usize))
}

/// Generate the code for a seed at an explicit unix timestamp
pub fn totp_at(seed: &str, unix_seconds: u64) -> TwofaResult<String> {
    let key = decode_seed(seed)?;
    hotp(&key, unix_seconds / PERIOD)
}

/// Generate the code for a seed at the current time
pub fn totp_now(seed: &str) -> TwofaResult<String> {
    totp_at(seed, current_unix_time())
}

/// Seconds until the code valid at `unix_seconds` expires
pub fn seconds_remaining_at(unix_seconds: u64) -> u64 {
    PERIOD - (unix_seconds % PERIOD)
}

/// Current unix time in seconds
pub fn current_unix_time() -> u64 {
    Utc::now().timestamp().max(0) as u64
}
