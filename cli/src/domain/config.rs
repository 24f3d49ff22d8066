//! Domain types and validators for harness configuration.
//!
//! Pure functions only: no I/O and no async.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api.url",
    "app.name",
    "app.platform",
    "deploy.work_dir",
    "deploy.source_repository",
    "deploy.timeout_secs",
    "scenario.email",
    "scenario.password",
    "scenario.team",
    "scenario.public_key_path",
];

pub const DEFAULT_API_URL: &str = "http://localhost:8888";
pub const DEFAULT_APP_NAME: &str = "integration";
pub const DEFAULT_PLATFORM: &str = "static";
pub const DEFAULT_WORK_DIR: &str = "/tmp/integration";
pub const DEFAULT_SOURCE_REPOSITORY: &str = "https://github.com/tsuru/static-sample.git";
pub const DEFAULT_DEPLOY_TIMEOUT_SECS: u64 = 600;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.paas-integration/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessConfig {
    pub api: ApiConfig,
    pub app: AppConfig,
    pub deploy: DeployConfig,
    pub scenario: ScenarioConfig,
}

/// Control API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, e.g. `http://localhost:8888`.
    pub url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// The application created and deployed by the harness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub platform: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }
}

/// Git deploy flow settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeployConfig {
    /// Local clone target. Overwritten by every deploy, never cleaned up.
    pub work_dir: String,
    /// Repository cloned into `work_dir` before pushing.
    pub source_repository: String,
    /// Upper bound for each git invocation.
    pub timeout_secs: u64,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            work_dir: DEFAULT_WORK_DIR.to_string(),
            source_repository: DEFAULT_SOURCE_REPOSITORY.to_string(),
            timeout_secs: DEFAULT_DEPLOY_TIMEOUT_SECS,
        }
    }
}

/// Fixtures used by `paas-integration run`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub email: String,
    pub password: String,
    pub team: String,
    /// Path to the SSH public key registered for the scenario user.
    /// A leading `~/` is expanded against the home directory.
    pub public_key_path: String,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            email: "integration@localhost".to_string(),
            password: "integration".to_string(),
            team: "integration".to_string(),
            public_key_path: "~/.ssh/id_rsa.pub".to_string(),
        }
    }
}

// ── Service settings ─────────────────────────────────────────────────────────

/// What the resource helpers need to build URLs and payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub api_url: String,
    pub app_name: String,
    pub platform: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        HarnessConfig::default().api_settings()
    }
}

/// What the deploy sequencer needs: where to clone from and into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploySettings {
    pub work_dir: PathBuf,
    pub source_repository: String,
}

impl Default for DeploySettings {
    fn default() -> Self {
        HarnessConfig::default().deploy_settings()
    }
}

impl HarnessConfig {
    #[must_use]
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            api_url: self.api.url.clone(),
            app_name: self.app.name.clone(),
            platform: self.app.platform.clone(),
        }
    }

    #[must_use]
    pub fn deploy_settings(&self) -> DeploySettings {
        DeploySettings {
            work_dir: PathBuf::from(&self.deploy.work_dir),
            source_repository: self.deploy.source_repository.clone(),
        }
    }

    /// All settable keys with their current values, in display order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("api.url", self.api.url.clone()),
            ("app.name", self.app.name.clone()),
            ("app.platform", self.app.platform.clone()),
            ("deploy.work_dir", self.deploy.work_dir.clone()),
            (
                "deploy.source_repository",
                self.deploy.source_repository.clone(),
            ),
            ("deploy.timeout_secs", self.deploy.timeout_secs.to_string()),
            ("scenario.email", self.scenario.email.clone()),
            ("scenario.password", "********".to_string()),
            ("scenario.team", self.scenario.team.clone()),
            (
                "scenario.public_key_path",
                self.scenario.public_key_path.clone(),
            ),
        ]
    }

    /// Validate and assign a single `section.field` value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "api.url" => self.api.url = value.to_string(),
            "app.name" => self.app.name = value.to_string(),
            "app.platform" => self.app.platform = value.to_string(),
            "deploy.work_dir" => self.deploy.work_dir = value.to_string(),
            "deploy.source_repository" => self.deploy.source_repository = value.to_string(),
            "deploy.timeout_secs" => self.deploy.timeout_secs = parse_timeout(value)?,
            "scenario.email" => self.scenario.email = value.to_string(),
            "scenario.password" => self.scenario.password = value.to_string(),
            "scenario.team" => self.scenario.team = value.to_string(),
            "scenario.public_key_path" => self.scenario.public_key_path = value.to_string(),
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let expected = match key {
        "api.url" if !(value.starts_with("http://") || value.starts_with("https://")) => {
            "an http:// or https:// URL"
        }
        "app.name" if !is_valid_app_name(value) => {
            "lower-case letters, digits and '-', starting with a letter"
        }
        "deploy.timeout_secs" if parse_timeout(value).is_err() => "a positive number of seconds",
        "app.platform" | "deploy.work_dir" | "deploy.source_repository" | "scenario.team"
            if value.is_empty() =>
        {
            "a non-empty value"
        }
        _ => return Ok(()),
    };
    Err(ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
    .into())
}

fn is_valid_app_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && name.len() <= 63
}

fn parse_timeout(value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => anyhow::bail!("invalid timeout: {value}"),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
