//! Path management for twofa
//!
//! ## Path Resolution Order
//!
//! 1. An explicit path (the `--store` flag)
//! 2. `TWOFA_STORE` environment variable (if set and non-empty)
//! 3. `~/.twofa.yaml` in the user's home directory

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::TwofaError;

/// Environment variable overriding the store location
pub const STORE_ENV_VAR: &str = "TWOFA_STORE";

/// Default store file name inside the home directory
const STORE_FILE_NAME: &str = ".twofa.yaml";

/// Manages all paths used by twofa
#[derive(Debug, Clone)]
pub struct TwofaPaths {
    store_file: PathBuf,
}

impl TwofaPaths {
    /// Resolve the store location
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the home directory
    /// cannot be determined.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, TwofaError> {
        if let Some(path) = explicit {
            return Ok(Self::with_store_file(path));
        }

        match std::env::var_os(STORE_ENV_VAR) {
            Some(custom) if !custom.is_empty() => Ok(Self::with_store_file(PathBuf::from(custom))),
            _ => Ok(Self::with_store_file(default_store_file()?)),
        }
    }

    /// Create TwofaPaths pointing at a specific file (useful for testing)
    pub fn with_store_file(store_file: PathBuf) -> Self {
        Self { store_file }
    }

    /// Get the path to the store file
    pub fn store_file(&self) -> &Path {
        &self.store_file
    }
}

/// `~/.twofa.yaml`
fn default_store_file() -> Result<PathBuf, TwofaError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| TwofaError::Config("Could not determine home directory".into()))?;
    Ok(dirs.home_dir().join(STORE_FILE_NAME))
}
