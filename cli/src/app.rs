//! Application context: unified state passed to every command handler.
//!
//! Built once in `Cli::run()` from the global flags and the config file, then
//! handed as `&AppContext` to each handler.

use std::time::Duration;

use anyhow::Result;

use crate::application::services::resources::ApiClient;
use crate::domain::HarnessConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::http::UreqTransport;
use crate::output::{OutputContext, TerminalReporter};

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Overrides `api.url` from the config file.
    pub api_url: Option<String>,
    /// Token for authenticated commands.
    pub token: Option<String>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet, JSON).
    pub output: OutputContext,
    /// Effective configuration (file + flag overrides).
    pub config: HarnessConfig,
    /// Where `config` was loaded from and is saved to.
    pub config_store: YamlConfigStore,
    token: Option<String>,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn new(flags: AppFlags) -> Result<Self> {
        let config_store = YamlConfigStore;
        let mut config = crate::application::services::config_service::load_config(&config_store)?;
        if let Some(url) = flags.api_url {
            config.api.url = url;
        }
        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet, flags.output.json),
            config,
            config_store,
            token: flags.token,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.output.json
    }

    /// The token for authenticated commands.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `--token` nor `PAAS_TOKEN` was given.
    pub fn token(&self) -> Result<&str> {
        self.token.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No token. Pass --token or set PAAS_TOKEN (get one with: paas-integration login)"
            )
        })
    }

    /// Control API client built from the effective configuration.
    #[must_use]
    pub fn api_client(&self) -> ApiClient<UreqTransport> {
        ApiClient::new(UreqTransport::default(), self.config.api_settings())
    }

    /// Process runner bounded by `deploy.timeout_secs`.
    #[must_use]
    pub fn runner(&self) -> TokioCommandRunner {
        TokioCommandRunner::new(Duration::from_secs(self.config.deploy.timeout_secs))
    }

    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}
