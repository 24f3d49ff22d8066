//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::domain::HarnessConfig;

// ── Value Types ───────────────────────────────────────────────────────────────

/// HTTP verb handed to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a request carries besides its verb and URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Request headers, name → value.
    pub headers: BTreeMap<String, String>,
    /// Raw request body (JSON text for every call this crate makes).
    pub body: Option<String>,
    /// Query-string pairs, in order.
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    /// Options carrying only a body.
    #[must_use]
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::default()
        }
    }

    /// Options whose body is `value` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn json(value: &impl serde::Serialize) -> Result<Self> {
        let body = serde_json::to_string(value).context("cannot serialize request body")?;
        Ok(Self::with_body(body))
    }
}

// ── HTTP Port Traits ──────────────────────────────────────────────────────────

/// Read access to a completed HTTP response.
pub trait ApiResponse {
    /// Numeric HTTP status.
    fn status_code(&self) -> u16;
    /// Raw response body.
    fn text(&self) -> &str;
    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(self.text()).context("cannot decode response body as JSON")
    }
}

/// Performs exactly one HTTP request per call.
///
/// Implementations must hand back non-2xx responses as `Ok`; `Err` is
/// reserved for failures where no response exists (connect, DNS, timeout).
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    type Response: ApiResponse;

    async fn send(&self, method: Method, url: &str, options: RequestOptions)
    -> Result<Self::Response>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// The returned `Output` is never interpreted by the runner: a non-zero exit
/// is still `Ok`.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts harness configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<HarnessConfig>;
    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &HarnessConfig) -> Result<()>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
