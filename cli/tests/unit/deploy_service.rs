//! Tests for the git deploy sequencer.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use paas_integration::application::services::deploy::{
    clone_repository, deploy, push_repository,
};
use paas_integration::domain::DeployStage;
use paas_integration::domain::config::DeploySettings;

use crate::helpers::{argv, err_output, ok_output};
use crate::mocks::{RecordingRunner, SpawnFailingRunner};

fn settings() -> DeploySettings {
    DeploySettings {
        work_dir: PathBuf::from("/tmp/x"),
        source_repository: "git@github.com:example/source.git".to_string(),
    }
}

#[tokio::test]
async fn clone_repository_runs_literal_argv_once() {
    let runner = RecordingRunner::new();
    clone_repository(&runner, "git@host/repo.git", "/tmp/x")
        .await
        .unwrap();
    assert_eq!(
        runner.calls(),
        vec![argv(&["git", "clone", "git@host/repo.git", "/tmp/x"])]
    );
}

#[tokio::test]
async fn push_repository_runs_literal_argv_once() {
    let runner = RecordingRunner::new();
    push_repository(&runner, "git@host/repo.git", "/tmp/x/.git")
        .await
        .unwrap();
    assert_eq!(
        runner.calls(),
        vec![argv(&[
            "git",
            "--git-dir=/tmp/x/.git",
            "push",
            "git@host/repo.git",
            "master"
        ])]
    );
}

#[tokio::test]
async fn clone_returns_runner_output_uninspected() {
    let runner = RecordingRunner::with_outputs([err_output(128, b"fatal: repository not found")]);
    let out = clone_repository(&runner, "git@host/missing.git", "/tmp/x")
        .await
        .unwrap();
    assert_eq!(out.status.code(), Some(128));
    assert_eq!(out.stderr, b"fatal: repository not found");
}

#[tokio::test]
async fn deploy_clones_fixed_source_then_pushes_caller_remote() {
    let runner = RecordingRunner::new();
    let outcome = deploy(&runner, &settings(), "git@localhost:integration.git")
        .await
        .unwrap();

    assert_eq!(
        runner.calls(),
        vec![
            argv(&["git", "clone", "git@github.com:example/source.git", "/tmp/x"]),
            argv(&[
                "git",
                "--git-dir=/tmp/x/.git",
                "push",
                "git@localhost:integration.git",
                "master"
            ]),
        ]
    );
    assert_eq!(outcome.stage, DeployStage::Done);
    assert!(outcome.succeeded());
}

#[tokio::test]
async fn deploy_pushes_even_when_clone_fails() {
    let runner = RecordingRunner::with_outputs([
        err_output(128, b"fatal: destination path already exists"),
        err_output(128, b"fatal: not a git repository"),
    ]);
    let outcome = deploy(&runner, &settings(), "git@localhost:integration.git")
        .await
        .unwrap();

    assert_eq!(runner.calls().len(), 2);
    assert_eq!(outcome.clone.status.code(), Some(128));
    assert_eq!(outcome.push.status.code(), Some(128));
    assert_eq!(outcome.stage, DeployStage::Done);
    assert!(!outcome.succeeded());
}

#[tokio::test]
async fn deploy_outcome_reports_push_failure_alone() {
    let runner = RecordingRunner::with_outputs([ok_output(b""), err_output(1, b"rejected")]);
    let outcome = deploy(&runner, &settings(), "git@localhost:integration.git")
        .await
        .unwrap();
    assert!(outcome.clone.status.success());
    assert!(!outcome.succeeded());
}

/// Deploying twice re-clones into the same directory with no cleanup in
/// between. The second clone is expected to fail against the existing
/// directory; the sequencer does not try to prevent that.
#[tokio::test]
async fn deploy_twice_reclones_same_destination_without_cleanup() {
    let runner = RecordingRunner::with_outputs([
        ok_output(b""),
        ok_output(b""),
        err_output(128, b"fatal: destination path '/tmp/x' already exists"),
        ok_output(b""),
    ]);
    let first = deploy(&runner, &settings(), "git@localhost:integration.git")
        .await
        .unwrap();
    let second = deploy(&runner, &settings(), "git@localhost:integration.git")
        .await
        .unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0], calls[2], "same clone argv both times");
    assert_eq!(calls[1], calls[3], "same push argv both times");
    assert!(first.succeeded());
    assert!(!second.succeeded());
}

#[tokio::test]
async fn spawn_failure_on_clone_propagates_and_skips_push() {
    let runner = SpawnFailingRunner::new(0);
    let err = deploy(&runner, &settings(), "git@localhost:integration.git")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("failed to spawn git"), "got: {err}");
    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test]
async fn spawn_failure_on_push_propagates_after_clone() {
    let runner = SpawnFailingRunner::new(1);
    assert!(deploy(&runner, &settings(), "git@localhost:integration.git")
        .await
        .is_err());
    assert_eq!(runner.calls().len(), 2);
}

#[tokio::test]
async fn deploy_uses_default_settings_when_none_overridden() {
    let runner = RecordingRunner::new();
    let defaults = DeploySettings::default();
    deploy(&runner, &defaults, "git@localhost:integration.git")
        .await
        .unwrap();
    let calls = runner.calls();
    assert_eq!(calls[0][3], defaults.work_dir.to_string_lossy());
    assert_eq!(calls[1][1], format!("--git-dir={}/.git", defaults.work_dir.display()));
}
