//! `paas-integration app`: create, remove and inspect the configured app.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;

/// App subcommands. The app name and platform come from configuration.
#[derive(Subcommand)]
pub enum AppCommand {
    /// Create the app
    Create,
    /// Remove the app
    Remove,
    /// Show the app, including its git repository
    Info,
}

/// Run the app command.
///
/// # Errors
///
/// Returns an error if no token is available or the request cannot be sent.
/// A non-2xx answer to create or remove exits non-zero.
pub async fn run(app: &AppContext, cmd: AppCommand) -> Result<ExitCode> {
    let client = app.api_client();
    let token = app.token()?;
    match cmd {
        AppCommand::Create => Ok(super::finish(app, &client.create_app_reply(token).await?)),
        AppCommand::Remove => Ok(super::finish(app, &client.remove_app_reply(token).await?)),
        AppCommand::Info => {
            let info = client.app_info(token).await?;
            if app.is_json() {
                app.output.json_value(&serde_json::to_value(&info)?)?;
            } else {
                app.output.header(&info.name);
                app.output
                    .kv("platform  ", info.platform.as_deref().unwrap_or("-"));
                app.output.kv("repository", &info.repository);
                app.output.kv("teams     ", &info.teams.join(", "));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
