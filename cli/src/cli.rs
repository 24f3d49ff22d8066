//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Drive a PaaS control API and its git deploy flow from the command line
#[derive(Parser)]
#[command(
    name = "paas-integration",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log requests and git invocations to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control API base URL (overrides api.url from the config file)
    #[arg(long, global = true, env = "PAAS_API_URL")]
    pub api_url: Option<String>,

    /// Token sent in the Authorization header
    #[arg(long, global = true, env = "PAAS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage users
    #[command(subcommand)]
    User(commands::user::UserCommand),

    /// Obtain a token
    Login(commands::login::LoginArgs),

    /// Manage teams
    #[command(subcommand)]
    Team(commands::team::TeamCommand),

    /// Manage SSH public keys
    #[command(subcommand)]
    Key(commands::key::KeyCommand),

    /// Manage the configured app
    #[command(subcommand)]
    App(commands::app::AppCommand),

    /// Clone the source repository and push it to a remote
    Deploy(commands::deploy::DeployArgs),

    /// Run the full create → deploy → cleanup scenario
    Run(commands::run::RunArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose,
            api_url,
            token,
            command,
        } = self;

        crate::infra::logging::init(verbose);

        if let Command::Version = command {
            return commands::version::run(json);
        }

        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            api_url,
            token,
        })?;

        match command {
            Command::User(cmd) => commands::user::run(&app, cmd).await,
            Command::Login(args) => commands::login::run(&app, args).await,
            Command::Team(cmd) => commands::team::run(&app, cmd).await,
            Command::Key(cmd) => commands::key::run(&app, cmd).await,
            Command::App(cmd) => commands::app::run(&app, cmd).await,
            Command::Deploy(args) => commands::deploy::run(&app, args).await,
            Command::Run(args) => commands::run::run(&app, args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(json),
        }
    }
}
