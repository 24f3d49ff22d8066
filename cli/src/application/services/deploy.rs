//! Application service: git deploy sequencer.
//!
//! A deploy is a fresh clone of the configured source repository into the
//! working directory followed by a push of that clone's primary branch to the
//! caller's remote. Both steps are always attempted, in order; exit codes are
//! handed back to the caller in [`DeployOutcome`] and never inspected here.
//!
//! Callers must not run two deploys against the same working directory at
//! once. Nothing here cleans the directory between runs.

use std::process::Output;

use anyhow::Result;

use crate::application::ports::CommandRunner;
use crate::domain::config::DeploySettings;
use crate::domain::deploy::{self as git, DeployStage, GIT};

/// Both process outputs from one deploy, uninterpreted.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub clone: Output,
    pub push: Output,
    /// Always [`DeployStage::Done`]; attempted is not the same as succeeded.
    pub stage: DeployStage,
}

impl DeployOutcome {
    /// Caller-side convenience: did both git invocations exit zero?
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.clone.status.success() && self.push.status.success()
    }
}

/// `git clone <source> <destination>`, once.
///
/// # Errors
///
/// Returns the runner's error unchanged (spawn failure or runner timeout).
pub async fn clone_repository(
    runner: &impl CommandRunner,
    source: &str,
    destination: &str,
) -> Result<Output> {
    let args = git::clone_args(source, destination);
    run_git(runner, &args).await
}

/// `git --git-dir=<git_dir> push <remote> master`, once.
///
/// # Errors
///
/// Returns the runner's error unchanged (spawn failure or runner timeout).
pub async fn push_repository(
    runner: &impl CommandRunner,
    remote: &str,
    git_dir: &str,
) -> Result<Output> {
    let args = git::push_args(remote, git_dir);
    run_git(runner, &args).await
}

/// Clone the configured source into the working directory, then push it to
/// `remote`.
///
/// The push runs even when the clone exited non-zero.
///
/// # Errors
///
/// Returns the runner's error unchanged if either process cannot be run at
/// all. A non-zero exit is not an error.
pub async fn deploy(
    runner: &impl CommandRunner,
    settings: &DeploySettings,
    remote: &str,
) -> Result<DeployOutcome> {
    let destination = settings.work_dir.to_string_lossy();
    let git_dir = git::git_dir_for(&settings.work_dir);

    let mut stage = DeployStage::Start;
    tracing::debug!(%stage, source = %settings.source_repository, %destination, "cloning");
    let clone = clone_repository(runner, &settings.source_repository, &destination).await?;
    stage = stage.next();

    tracing::debug!(%stage, code = ?clone.status.code(), remote, %git_dir, "pushing");
    let push = push_repository(runner, remote, &git_dir).await?;
    stage = stage.next();

    tracing::debug!(%stage, code = ?push.status.code(), "pushed");
    stage = stage.next();
    Ok(DeployOutcome { clone, push, stage })
}

async fn run_git(runner: &impl CommandRunner, args: &[String]) -> Result<Output> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    runner.run(GIT, &args).await
}
