//! twofa - command-line two-factor authentication token manager
//!
//! Keeps labeled TOTP seeds in a single YAML file, optionally encrypted under
//! a passphrase, and prints the current codes on demand.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Store path resolution
//! - `error`: Custom error types
//! - `crypto`: PBKDF2 key derivation and the AES-256-GCM envelope
//! - `models`: Labels, seeds and the secret map
//! - `otp`: TOTP code generation
//! - `storage`: The on-disk store document
//! - `services`: The secret store lifecycle
//! - `cli`: Command handlers, prompts and QR output
//!
//! # Example
//!
//! ```rust,ignore
//! use twofa::config::TwofaPaths;
//! use twofa::services::{SecretStore, StaticPassphrase};
//! use twofa::storage::StoreFile;
//!
//! let paths = TwofaPaths::resolve(None)?;
//! let file = StoreFile::new(paths.store_file());
//! let mut loaded = SecretStore::load(&file, &mut StaticPassphrase::current("hunter2"))?;
//! loaded.store.add("github", "JBSWY3DPEHPK3PXP")?;
//! loaded.store.save(&file, loaded.passphrase.as_ref())?;
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod models;
pub mod otp;
pub mod services;
pub mod storage;

pub use error::{TwofaError, TwofaResult};
