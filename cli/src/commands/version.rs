//! Version command

use std::process::ExitCode;

use anyhow::Result;

/// Run the version command.
///
/// # Errors
///
/// Infallible; returns `Result` to match the other handlers.
pub fn run(json: bool) -> Result<ExitCode> {
    let version = env!("CARGO_PKG_VERSION");

    if json {
        println!(r#"{{"version":"{version}"}}"#);
    } else {
        println!("paas-integration {version}");
    }
    Ok(ExitCode::SUCCESS)
}
