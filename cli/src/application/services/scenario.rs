//! Application service: end-to-end integration scenario.
//!
//! Creates a user, team, key and app on a live control API, deploys to the
//! app's repository, then removes everything it created. A non-2xx answer
//! fails its step, so a resource the server refused is never removed. Cleanup is
//! best-effort: it runs after any failure past login and its own failures
//! are reported as warnings.

use std::fmt::Display;

use anyhow::Result;

use crate::application::ports::{CommandRunner, HttpTransport, ProgressReporter};
use crate::application::services::deploy::deploy;
use crate::application::services::resources::ApiClient;
use crate::domain::config::{DeploySettings, ScenarioConfig};

/// Outcome of one scenario step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub name: &'static str,
    pub ok: bool,
    pub detail: String,
}

/// Everything a scenario run did, in order.
#[derive(Debug, Clone, Default)]
pub struct ScenarioReport {
    pub steps: Vec<StepResult>,
    pub cleanup: Vec<StepResult>,
}

impl ScenarioReport {
    /// `true` when every main step succeeded. Cleanup does not count.
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|s| s.ok)
    }

    fn record<T, E: Display>(
        &mut self,
        reporter: &impl ProgressReporter,
        name: &'static str,
        result: &Result<T, E>,
        detail: impl FnOnce(&T) -> String,
    ) -> bool {
        let step = match result {
            Ok(value) => {
                reporter.success(name);
                StepResult {
                    name,
                    ok: true,
                    detail: detail(value),
                }
            }
            Err(e) => {
                reporter.warn(&format!("{name}: {e}"));
                StepResult {
                    name,
                    ok: false,
                    detail: e.to_string(),
                }
            }
        };
        let ok = step.ok;
        self.steps.push(step);
        ok
    }

    fn record_cleanup(
        &mut self,
        reporter: &impl ProgressReporter,
        name: &'static str,
        result: Result<String>,
    ) {
        let step = match result {
            Ok(text) => StepResult {
                name,
                ok: true,
                detail: text,
            },
            Err(e) => {
                reporter.warn(&format!("cleanup {name}: {e}"));
                StepResult {
                    name,
                    ok: false,
                    detail: e.to_string(),
                }
            }
        };
        self.cleanup.push(step);
    }
}

/// Resources created so far, so cleanup only touches what exists.
#[derive(Default)]
struct Created {
    team: bool,
    key: bool,
    app: bool,
}

/// Run the full scenario.
///
/// # Errors
///
/// Returns an error only when login fails, since nothing can be cleaned up
/// without a token. Every later failure is recorded in the report.
pub async fn run_scenario<T: HttpTransport>(
    client: &ApiClient<T>,
    runner: &impl CommandRunner,
    deploy_settings: &DeploySettings,
    fixtures: &ScenarioConfig,
    public_key: &str,
    reporter: &impl ProgressReporter,
) -> Result<ScenarioReport> {
    let mut report = ScenarioReport::default();

    reporter.step(&format!("creating user {}", fixtures.email));
    let created = client
        .create_user(&fixtures.email, &fixtures.password)
        .await;
    if let Ok(false) = created {
        reporter.warn("user was not created (it may already exist)");
    }
    report.record(reporter, "create user", &created, |c| {
        if *c { "created" } else { "not created" }.to_string()
    });

    reporter.step("logging in");
    let token = client.login(&fixtures.email, &fixtures.password).await;
    report.record(reporter, "login", &token, |_| "token issued".to_string());
    let token = token?;

    let mut made = Created::default();
    run_steps(
        client,
        runner,
        deploy_settings,
        fixtures,
        public_key,
        &token,
        reporter,
        &mut report,
        &mut made,
    )
    .await;

    reporter.step("cleaning up");
    if made.app {
        let r = client
            .remove_app_reply(&token)
            .await
            .and_then(|r| r.into_success("remove app"));
        report.record_cleanup(reporter, "remove app", r);
    }
    if made.key {
        let r = client
            .remove_key_reply(public_key, &token)
            .await
            .and_then(|r| r.into_success("remove key"));
        report.record_cleanup(reporter, "remove key", r);
    }
    if made.team {
        let r = client
            .remove_team_reply(&fixtures.team, &token)
            .await
            .and_then(|r| r.into_success("remove team"));
        report.record_cleanup(reporter, "remove team", r);
    }
    let r = client
        .remove_user_reply(&token)
        .await
        .and_then(|r| r.into_success("remove user"));
    report.record_cleanup(reporter, "remove user", r);

    Ok(report)
}

/// Team → key → app → repository lookup → deploy. Stops at the first failure.
#[allow(clippy::too_many_arguments)]
async fn run_steps<T: HttpTransport>(
    client: &ApiClient<T>,
    runner: &impl CommandRunner,
    deploy_settings: &DeploySettings,
    fixtures: &ScenarioConfig,
    public_key: &str,
    token: &str,
    reporter: &impl ProgressReporter,
    report: &mut ScenarioReport,
    made: &mut Created,
) {
    reporter.step(&format!("creating team {}", fixtures.team));
    let r = client
        .create_team_reply(&fixtures.team, token)
        .await
        .and_then(|r| r.into_success("create team"));
    made.team = report.record(reporter, "create team", &r, String::clone);
    if !made.team {
        return;
    }

    reporter.step("registering public key");
    let r = client
        .add_key_reply(public_key, token)
        .await
        .and_then(|r| r.into_success("add key"));
    made.key = report.record(reporter, "add key", &r, String::clone);
    if !made.key {
        return;
    }

    reporter.step(&format!("creating app {}", client.settings().app_name));
    let r = client
        .create_app_reply(token)
        .await
        .and_then(|r| r.into_success("create app"));
    made.app = report.record(reporter, "create app", &r, String::clone);
    if !made.app {
        return;
    }

    reporter.step("reading app repository");
    let info = client.app_info(token).await;
    if !report.record(reporter, "app info", &info, |i| i.repository.clone()) {
        return;
    }
    let Ok(info) = info else { return };
    let repository = info.repository;

    reporter.step(&format!("deploying to {repository}"));
    let outcome = match deploy(runner, deploy_settings, &repository).await {
        Ok(outcome) if outcome.succeeded() => Ok(outcome),
        Ok(outcome) => Err(anyhow::anyhow!(
            "git exited with clone={:?} push={:?}: {}",
            outcome.clone.status.code(),
            outcome.push.status.code(),
            String::from_utf8_lossy(&outcome.push.stderr).trim()
        )),
        Err(e) => Err(e),
    };
    report.record(reporter, "deploy", &outcome, |o| o.stage.to_string());
}
