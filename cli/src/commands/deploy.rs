//! `paas-integration deploy`: clone the source repository and push it.

use std::process::{ExitCode, Output};

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::deploy::{DeployOutcome, deploy};

/// Arguments for the deploy command.
#[derive(Args)]
pub struct DeployArgs {
    /// Git remote to push to (defaults to the app's repository; needs a token)
    pub remote: Option<String>,
}

/// Run the deploy command. Exits non-zero when either git step did.
///
/// # Errors
///
/// Returns an error if the remote cannot be resolved or git cannot be run.
pub async fn run(app: &AppContext, args: DeployArgs) -> Result<ExitCode> {
    let remote = match args.remote {
        Some(remote) => remote,
        None => app.api_client().app_info(app.token()?).await?.repository,
    };

    let settings = app.config.deploy_settings();
    app.output.header(&format!(
        "Deploying {} → {remote}",
        app.config.deploy.source_repository
    ));
    let outcome = deploy(&app.runner(), &settings, &remote).await?;

    if app.is_json() {
        app.output.json_value(&outcome_json(&outcome))?;
    } else {
        report_step(app, "clone", &outcome.clone);
        report_step(app, "push", &outcome.push);
    }

    Ok(if outcome.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn report_step(app: &AppContext, name: &str, output: &Output) {
    if output.status.success() {
        app.output.success(name);
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        app.output.error(&format!(
            "{name} exited with {}: {}",
            exit_code(output),
            stderr.trim()
        ));
    }
}

fn exit_code(output: &Output) -> String {
    output
        .status
        .code()
        .map_or_else(|| "signal".to_string(), |c| c.to_string())
}

fn outcome_json(outcome: &DeployOutcome) -> serde_json::Value {
    let step = |output: &Output| {
        serde_json::json!({
            "code": output.status.code(),
            "stdout": String::from_utf8_lossy(&output.stdout),
            "stderr": String::from_utf8_lossy(&output.stderr),
        })
    };
    serde_json::json!({
        "clone": step(&outcome.clone),
        "push": step(&outcome.push),
        "stage": outcome.stage.as_str(),
        "succeeded": outcome.succeeded(),
    })
}
