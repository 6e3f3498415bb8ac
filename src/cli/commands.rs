//! Store CLI commands
//!
//! Each command loads the store, performs one read or mutation, and saves
//! when something changed.

use clap::Subcommand;
use serde::Serialize;

use crate::config::TwofaPaths;
use crate::error::{TwofaError, TwofaResult};
use crate::otp;
use crate::services::{LoadedStore, PassphraseSource, SecretStore};
use crate::storage::StoreFile;

use super::prompt::TerminalPrompt;
use super::qr;

/// Store subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show codes for labels matching a regex pattern
    #[command(alias = "list")]
    Show {
        /// Case-insensitive pattern searched in labels
        #[arg(default_value = "")]
        pattern: String,
        /// Print codes as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a secret to the store
    Add {
        /// Label to store the secret under
        label: String,
        /// Base32 secret (prompted for when omitted)
        secret: Option<String>,
    },
    /// Rename a label
    Rename {
        /// Current label
        label: String,
        /// New label
        new_label: String,
    },
    /// Remove a secret: --confirm required
    #[command(alias = "rm")]
    Remove {
        /// Label to remove
        label: String,
        /// Confirm the removal
        #[arg(long)]
        confirm: bool,
    },
    /// Print the stored secret for a label
    Secret {
        /// Label to look up
        label: String,
    },
    /// Print a QR code for a label
    Qr {
        /// Label to encode
        label: String,
        /// Dark modules on a light background
        #[arg(long)]
        invert: bool,
    },
    /// Set the store password: empty disables encryption
    #[command(alias = "passwd")]
    Password,
}

#[derive(Serialize)]
struct CodeListing<'a> {
    expires_in: u64,
    codes: Vec<CodeEntry<'a>>,
}

#[derive(Serialize)]
struct CodeEntry<'a> {
    label: &'a str,
    code: Option<String>,
}

/// Handle a store command
pub fn handle_command(paths: &TwofaPaths, cmd: Commands) -> TwofaResult<()> {
    let file = StoreFile::new(paths.store_file());
    let mut prompt = TerminalPrompt::new();

    match cmd {
        Commands::Show { pattern, json } => show(&file, &mut prompt, &pattern, json),
        Commands::Add { label, secret } => add(&file, &mut prompt, &label, secret),
        Commands::Rename { label, new_label } => {
            let LoadedStore { mut store, passphrase } = SecretStore::load(&file, &mut prompt)?;
            store.rename(&label, &new_label)?;
            store.save(&file, passphrase.as_ref())?;
            println!("Label '{}' renamed to '{}'", label, new_label);
            Ok(())
        }
        Commands::Remove { label, confirm } => {
            let LoadedStore { mut store, passphrase } = SecretStore::load(&file, &mut prompt)?;
            store.remove(&label, confirm)?;
            store.save(&file, passphrase.as_ref())?;
            println!("Label '{}' removed with secret", label);
            Ok(())
        }
        Commands::Secret { label } => {
            let LoadedStore { store, .. } = SecretStore::load(&file, &mut prompt)?;
            let seed = store
                .get(&label)
                .ok_or_else(|| TwofaError::LabelNotFound(label.clone()))?;
            println!("{}", seed);
            Ok(())
        }
        Commands::Qr { label, invert } => {
            let LoadedStore { store, .. } = SecretStore::load(&file, &mut prompt)?;
            let (label, seed) = store
                .secrets()
                .get_key_value(label.as_str())
                .ok_or_else(|| TwofaError::LabelNotFound(label.clone()))?;
            println!("{}", qr::render(label, seed, invert)?);
            Ok(())
        }
        Commands::Password => password(&file, &mut prompt),
    }
}

/// Print the current code for every matching label
fn show(
    file: &StoreFile,
    source: &mut dyn PassphraseSource,
    pattern: &str,
    json: bool,
) -> TwofaResult<()> {
    let LoadedStore { store, .. } = SecretStore::load(file, source)?;
    let now = otp::current_unix_time();
    let matches = store.query(pattern);

    if json {
        let listing = CodeListing {
            expires_in: otp::seconds_remaining_at(now),
            codes: matches
                .iter()
                .map(|(label, seed)| CodeEntry {
                    label: label.as_str(),
                    code: seed.code_at(now).ok(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("Nothing found matching pattern '{}'", pattern);
        return Ok(());
    }

    for (label, seed) in &matches {
        match seed.code_at(now) {
            Ok(code) => println!("{}  {}", code, label),
            Err(_) => {
                tracing::warn!(%label, "stored secret does not produce a code");
                println!("{:6}  {} (invalid secret)", "------", label);
            }
        }
    }
    println!();
    println!("Expiration in {} seconds", otp::seconds_remaining_at(now));

    Ok(())
}

fn add(
    file: &StoreFile,
    prompt: &mut TerminalPrompt,
    label: &str,
    secret: Option<String>,
) -> TwofaResult<()> {
    let LoadedStore { mut store, passphrase } = SecretStore::load(file, prompt)?;

    // Fail on a taken label before asking for the secret
    if store.get(label).is_some() {
        return Err(TwofaError::DuplicateLabel(label.to_string()));
    }

    let secret = match secret {
        Some(secret) => secret.into(),
        None => prompt.read_secret()?,
    };

    store.add(label, &secret)?;
    store.save(file, passphrase.as_ref())?;
    println!("Secret stored with label '{}'", label);
    Ok(())
}

fn password(file: &StoreFile, prompt: &mut TerminalPrompt) -> TwofaResult<()> {
    let LoadedStore { mut store, .. } = SecretStore::load(file, prompt)?;
    let new_passphrase = prompt.new_passphrase()?;

    store.set_password(&new_passphrase);
    store.save(file, Some(&new_passphrase))?;

    if store.is_encrypted() {
        println!("New password set");
    } else {
        println!("Password removed, store is no longer encrypted");
    }
    Ok(())
}
