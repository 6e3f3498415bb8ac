//! Seed model
//!
//! A base32 TOTP shared secret as stored in the map.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::TwofaResult;
use crate::otp;

/// A validated base32 seed with all whitespace removed
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Seed(String);

impl Seed {
    /// Strip whitespace and validate the seed
    ///
    /// The seed must decode as base32 and produce a code.
    pub fn parse(raw: &str) -> TwofaResult<Self> {
        let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        otp::totp_now(&cleaned)?;
        Ok(Self(cleaned))
    }

    /// Get the seed text as stored
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The code for this seed at a given unix timestamp
    pub fn code_at(&self, unix_seconds: u64) -> TwofaResult<String> {
        otp::totp_at(&self.0, unix_seconds)
    }
}

// Stored seeds are taken as written; validation happens on `parse`
impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        super::deserialize_scalar_text(deserializer).map(Self)
    }
}

// Keep seeds out of debug logs
impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed([REDACTED {} chars])", self.0.len())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TwofaError;

    #[test]
    fn test_valid_seed() {
        let seed = Seed::parse("JBSWY3DPEHPK3PXP").unwrap();
        assert_eq!(seed.as_str(), "JBSWY3DPEHPK3PXP");
    }

    #[test]
    fn test_whitespace_stripped() {
        let seed = Seed::parse(" jbsw y3dp\tehpk 3pxp\n").unwrap();
        assert_eq!(seed.as_str(), "jbswy3dpehpk3pxp");
    }

    #[test]
    fn test_invalid_seed() {
        assert!(matches!(Seed::parse("not-base32!!"), Err(TwofaError::InvalidSecret)));
        assert!(matches!(Seed::parse(""), Err(TwofaError::InvalidSecret)));
    }

    #[test]
    fn test_impossible_length_rejected() {
        assert!(matches!(Seed::parse("ABC"), Err(TwofaError::InvalidSecret)));
        assert!(matches!(Seed::parse("ABCDEFGHI"), Err(TwofaError::InvalidSecret)));
        assert!(matches!(Seed::parse("A"), Err(TwofaError::InvalidSecret)));
        assert!(Seed::parse("AB").is_ok());
    }

    #[test]
    fn test_numeric_yaml_seed() {
        let seed: Seed = serde_yaml::from_str("234567").unwrap();
        assert_eq!(seed.as_str(), "234567");
        let seed: Seed = serde_yaml::from_str("'JBSWY3DPEHPK3PXP'").unwrap();
        assert_eq!(seed.as_str(), "JBSWY3DPEHPK3PXP");
    }

    #[test]
    fn test_code_at() {
        let seed = Seed::parse("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();
        assert_eq!(seed.code_at(59).unwrap(), "287082");
    }

    #[test]
    fn test_debug_redacts() {
        let seed = Seed::parse("JBSWY3DPEHPK3PXP").unwrap();
        assert!(!format!("{:?}", seed).contains("JBSW"));
    }
}
