//! `paas-integration run`: the full end-to-end scenario.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::scenario::{ScenarioReport, StepResult, run_scenario};
use crate::commands::key::{KeyArgs, read_key};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Public key file (defaults to scenario.public_key_path)
    #[arg(long)]
    pub key_file: Option<PathBuf>,
}

/// Run the scenario. Exits non-zero when any main step failed.
///
/// # Errors
///
/// Returns an error if the key cannot be read or login fails.
pub async fn run(app: &AppContext, args: RunArgs) -> Result<ExitCode> {
    let key = read_key(app, KeyArgs {
        file: args.key_file,
    })?;

    app.output.header(&format!(
        "Integration run against {} (app {})",
        app.config.api.url, app.config.app.name
    ));
    let report = run_scenario(
        &app.api_client(),
        &app.runner(),
        &app.config.deploy_settings(),
        &app.config.scenario,
        &key,
        &app.reporter(),
    )
    .await?;

    if app.is_json() {
        app.output.json_value(&report_json(&report))?;
    } else if report.passed() {
        app.output.success("Integration run passed");
    } else {
        app.output.error("Integration run failed");
    }

    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn report_json(report: &ScenarioReport) -> serde_json::Value {
    let steps = |steps: &[StepResult]| {
        steps
            .iter()
            .map(|s| serde_json::json!({ "name": s.name, "ok": s.ok, "detail": s.detail }))
            .collect::<Vec<_>>()
    };
    serde_json::json!({
        "passed": report.passed(),
        "steps": steps(&report.steps),
        "cleanup": steps(&report.cleanup),
    })
}
