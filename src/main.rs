use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use twofa::cli::{handle_command, Commands};
use twofa::config::TwofaPaths;

/// Environment variable holding the log filter
const LOG_ENV_VAR: &str = "TWOFA_LOG";

#[derive(Parser)]
#[command(
    name = "twofa",
    version,
    about = "Manage two-factor authentication store",
    long_about = "twofa keeps your TOTP secrets in a single file, optionally \
                  encrypted with a password, and prints the current codes."
)]
struct Cli {
    /// Path to the store file
    #[arg(long, global = true, env = "TWOFA_STORE", value_name = "PATH")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let paths = TwofaPaths::resolve(cli.store)?;

    let command = cli.command.unwrap_or(Commands::Show {
        pattern: String::new(),
        json: false,
    });
    handle_command(&paths, command)?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
