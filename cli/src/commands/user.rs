//! `paas-integration user`: register and remove users.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;

/// User subcommands.
#[derive(Subcommand)]
pub enum UserCommand {
    /// Register a user (no token needed)
    Create {
        /// Email address
        email: String,
        /// Password
        #[arg(long, env = "PAAS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Remove the user owning the token
    Remove,
}

/// Run the user command.
///
/// # Errors
///
/// Returns an error if the request cannot be sent or no token is available.
pub async fn run(app: &AppContext, cmd: UserCommand) -> Result<ExitCode> {
    let client = app.api_client();
    match cmd {
        UserCommand::Create { email, password } => {
            if client.create_user(&email, &password).await? {
                app.output.success(&format!("Created user {email}"));
                Ok(ExitCode::SUCCESS)
            } else {
                app.output.error(&format!("User {email} was not created"));
                Ok(ExitCode::FAILURE)
            }
        }
        UserCommand::Remove => {
            let reply = client.remove_user_reply(app.token()?).await?;
            Ok(super::finish(app, &reply))
        }
    }
}
