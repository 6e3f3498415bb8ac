//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod commands;
pub mod prompt;
pub mod qr;

pub use commands::{handle_command, Commands};
pub use prompt::TerminalPrompt;
