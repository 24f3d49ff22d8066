//! `paas-integration team`: create and remove teams.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;

/// Team subcommands.
#[derive(Subcommand)]
pub enum TeamCommand {
    /// Create a team
    Create {
        /// Team name
        name: String,
    },
    /// Remove a team
    Remove {
        /// Team name
        name: String,
    },
}

/// Run the team command.
///
/// # Errors
///
/// Returns an error if the request cannot be sent or no token is available.
pub async fn run(app: &AppContext, cmd: TeamCommand) -> Result<ExitCode> {
    let client = app.api_client();
    let token = app.token()?;
    let reply = match cmd {
        TeamCommand::Create { name } => client.create_team_reply(&name, token).await?,
        TeamCommand::Remove { name } => client.remove_team_reply(&name, token).await?,
    };
    Ok(super::finish(app, &reply))
}
