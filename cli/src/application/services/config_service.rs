//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::HarnessConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the store cannot read or parse its file.
pub fn load_config(store: &impl ConfigStore) -> Result<HarnessConfig> {
    store.load()
}

/// Load, update one key, and save. Returns the updated configuration.
///
/// Nothing is written when validation fails.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the store fails.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<HarnessConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
