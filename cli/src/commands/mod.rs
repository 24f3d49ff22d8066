//! Command implementations

pub mod app;
pub mod config;
pub mod deploy;
pub mod key;
pub mod login;
pub mod run;
pub mod team;
pub mod user;
pub mod version;

use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::services::resources::Reply;

/// Print a server reply; a non-2xx status goes to stderr and fails the command.
fn finish(app: &AppContext, reply: &Reply) -> ExitCode {
    if reply.is_success() {
        app.output.raw(&reply.text);
        ExitCode::SUCCESS
    } else {
        app.output.error(&format!(
            "HTTP {}: {}",
            reply.status,
            reply.text.trim_end()
        ));
        ExitCode::FAILURE
    }
}
