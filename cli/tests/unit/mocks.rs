//! Shared recording doubles for the application ports.
//!
//! Each double records every call it receives and replays canned results in
//! order, so tests can assert both what was sent and how many times.

#![allow(dead_code, clippy::expect_used)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::Output;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use paas_integration::application::ports::{
    ApiResponse, CommandRunner, ConfigStore, HttpTransport, Method, ProgressReporter,
    RequestOptions,
};
use paas_integration::domain::HarnessConfig;

use crate::helpers::ok_output;

// ── HTTP ──────────────────────────────────────────────────────────────────────

/// Canned response. `id` lets tests check the exact object comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubResponse {
    pub id: u32,
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            id: 0,
            status,
            body: body.to_string(),
        }
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }
}

impl ApiResponse for StubResponse {
    fn status_code(&self) -> u16 {
        self.status
    }

    fn text(&self) -> &str {
        &self.body
    }
}

/// One recorded `send` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: Method,
    pub url: String,
    pub options: RequestOptions,
}

impl Call {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.options.headers.get(name).map(String::as_str)
    }

    pub fn body_json(&self) -> serde_json::Value {
        let body = self.options.body.as_deref().expect("request has a body");
        serde_json::from_str(body).expect("body is JSON")
    }
}

/// Records calls; replays queued responses, then `200 ""`.
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    responses: Mutex<VecDeque<StubResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: impl IntoIterator<Item = StubResponse>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn only_call(&self) -> Call {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls.into_iter().next().expect("one call")
    }
}

impl HttpTransport for RecordingTransport {
    type Response = StubResponse;

    async fn send(&self, method: Method, url: &str, options: RequestOptions) -> Result<StubResponse> {
        self.calls.lock().expect("lock").push(Call {
            method,
            url: url.to_string(),
            options,
        });
        Ok(self
            .responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| StubResponse::new(200, "")))
    }
}

/// Counts calls and always fails as if the network were down.
#[derive(Default)]
pub struct FailingTransport {
    pub calls: Mutex<u32>,
}

impl HttpTransport for FailingTransport {
    type Response = StubResponse;

    async fn send(&self, _: Method, url: &str, _: RequestOptions) -> Result<StubResponse> {
        *self.calls.lock().expect("lock") += 1;
        anyhow::bail!("connection refused: {url}")
    }
}

// ── Processes ─────────────────────────────────────────────────────────────────

/// Records full argv (program first); replays queued outputs, then exit 0.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    outputs: Mutex<VecDeque<Output>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outputs(outputs: impl IntoIterator<Item = Output>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outputs: Mutex::new(outputs.into_iter().collect()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("lock").clone()
    }

    fn record(&self, program: &str, args: &[&str]) -> Output {
        let mut argv = vec![program.to_string()];
        argv.extend(args.iter().map(|a| (*a).to_string()));
        self.calls.lock().expect("lock").push(argv);
        self.outputs
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| ok_output(b""))
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        Ok(self.record(program, args))
    }

    async fn run_with_timeout(&self, program: &str, args: &[&str], _: Duration) -> Result<Output> {
        Ok(self.record(program, args))
    }
}

/// Fails to spawn on call number `fail_on` (0-based); records every attempt.
pub struct SpawnFailingRunner {
    pub fail_on: usize,
    calls: Mutex<Vec<Vec<String>>>,
}

impl SpawnFailingRunner {
    pub fn new(fail_on: usize) -> Self {
        Self {
            fail_on,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("lock").clone()
    }
}

impl CommandRunner for SpawnFailingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        let mut calls = self.calls.lock().expect("lock");
        let mut argv = vec![program.to_string()];
        argv.extend(args.iter().map(|a| (*a).to_string()));
        calls.push(argv);
        if calls.len() - 1 == self.fail_on {
            anyhow::bail!("failed to spawn {program}");
        }
        Ok(ok_output(b""))
    }

    async fn run_with_timeout(&self, program: &str, args: &[&str], _: Duration) -> Result<Output> {
        self.run(program, args).await
    }
}

// ── Reporting ─────────────────────────────────────────────────────────────────

/// Collects reporter messages prefixed with their kind.
#[derive(Default)]
pub struct RecordingReporter {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn warnings(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("lock")
            .iter()
            .filter_map(|m| m.strip_prefix("warn: ").map(String::from))
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.messages.lock().expect("lock").push(format!("step: {message}"));
    }
    fn success(&self, message: &str) {
        self.messages.lock().expect("lock").push(format!("ok: {message}"));
    }
    fn warn(&self, message: &str) {
        self.messages.lock().expect("lock").push(format!("warn: {message}"));
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

/// In-memory config store counting saves.
#[derive(Default)]
pub struct MemoryConfigStore {
    pub config: Mutex<Option<HarnessConfig>>,
    pub saves: Mutex<u32>,
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<HarnessConfig> {
        Ok(self.config.lock().expect("lock").clone().unwrap_or_default())
    }

    fn save(&self, config: &HarnessConfig) -> Result<()> {
        *self.saves.lock().expect("lock") += 1;
        *self.config.lock().expect("lock") = Some(config.clone());
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/memory/config.yaml"))
    }
}
