//! paas-integration - drive a PaaS control API and its git deploy flow

use std::process::ExitCode;

use clap::Parser;
use paas_integration::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
