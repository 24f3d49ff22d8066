//! Domain layer: pure types, validation, and git argv construction.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod deploy;
pub mod error;

pub use config::{HarnessConfig, validate_config_key, validate_config_value};
pub use deploy::DeployStage;
pub use error::{ApiError, ConfigError};
