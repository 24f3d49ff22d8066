//! `paas-integration key`: register and remove SSH public keys.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::infra::config::expand_home;

/// Key subcommands.
#[derive(Subcommand)]
pub enum KeyCommand {
    /// Register a public key for the token's user
    Add(KeyArgs),
    /// Remove a public key from the token's user
    Remove(KeyArgs),
}

/// Which key to send.
#[derive(Args)]
pub struct KeyArgs {
    /// Public key file (defaults to scenario.public_key_path)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Run the key command.
///
/// # Errors
///
/// Returns an error if the key file cannot be read, no token is available,
/// or the request cannot be sent.
pub async fn run(app: &AppContext, cmd: KeyCommand) -> Result<ExitCode> {
    let client = app.api_client();
    let token = app.token()?;
    let reply = match cmd {
        KeyCommand::Add(args) => client.add_key_reply(&read_key(app, args)?, token).await?,
        KeyCommand::Remove(args) => client.remove_key_reply(&read_key(app, args)?, token).await?,
    };
    Ok(super::finish(app, &reply))
}

/// Read a public key file, falling back to the configured scenario key.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_key(app: &AppContext, args: KeyArgs) -> Result<String> {
    let path = match args.file {
        Some(path) => path,
        None => expand_home(&app.config.scenario.public_key_path)?,
    };
    let key = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read public key {}", path.display()))?;
    Ok(key.trim().to_string())
}
