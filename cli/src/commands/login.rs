//! `paas-integration login`: exchange credentials for a token.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Email address
    pub email: String,
    /// Password
    #[arg(long, env = "PAAS_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Run the login command. Prints the bare token so it can be captured with
/// `export PAAS_TOKEN=$(paas-integration login ...)`.
///
/// # Errors
///
/// Returns an error if the server rejects the credentials or is unreachable.
pub async fn run(app: &AppContext, args: LoginArgs) -> Result<ExitCode> {
    let token = app.api_client().login(&args.email, &args.password).await?;
    if app.is_json() {
        app.output
            .json_value(&serde_json::json!({ "token": token }))?;
    } else {
        println!("{token}");
    }
    Ok(ExitCode::SUCCESS)
}
