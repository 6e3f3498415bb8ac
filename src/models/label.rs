//! Label model
//!
//! The user-chosen name a seed is stored under.

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::{TwofaError, TwofaResult};

/// A non-empty, case-sensitive key in the secret map
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Create a label, rejecting empty names
    ///
    /// Surrounding whitespace is kept as part of the label.
    pub fn new(name: impl Into<String>) -> TwofaResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(TwofaError::InvalidLabel("label cannot be empty".into()));
        }
        Ok(Self(name))
    }

    /// Get the label text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        super::deserialize_scalar_text(deserializer).map(Self)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
