//! Storage layer for twofa
//!
//! Provides the YAML store file with atomic writes and tolerant reads.

pub mod file_io;
pub mod store_file;

pub use file_io::{read_yaml, write_yaml_atomic};
pub use store_file::{RawStoreFile, SealedSecrets, SecretsField, StoreContents, StoreFile};
