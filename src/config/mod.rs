//! Configuration module for twofa
//!
//! The only configuration is where the store file lives.

pub mod paths;

pub use paths::{TwofaPaths, STORE_ENV_VAR};
