//! Tests for the configuration service.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use paas_integration::application::services::config_service::{load_config, set_value};
use paas_integration::domain::HarnessConfig;

use crate::mocks::MemoryConfigStore;

fn saves(store: &MemoryConfigStore) -> u32 {
    *store.saves.lock().unwrap()
}

#[test]
fn load_config_returns_defaults_for_empty_store() {
    let store = MemoryConfigStore::default();
    let config = load_config(&store).unwrap();
    assert_eq!(config, HarnessConfig::default());
    assert_eq!(saves(&store), 0);
}

#[test]
fn set_value_updates_and_saves_once() {
    let store = MemoryConfigStore::default();
    let config = set_value(&store, "app.name", "blog").unwrap();
    assert_eq!(config.app.name, "blog");
    assert_eq!(saves(&store), 1);
    assert_eq!(load_config(&store).unwrap().app.name, "blog");
}

#[test]
fn set_value_keeps_other_settings() {
    let store = MemoryConfigStore::default();
    set_value(&store, "api.url", "https://paas.example.com").unwrap();
    let config = set_value(&store, "deploy.timeout_secs", "120").unwrap();
    assert_eq!(config.api.url, "https://paas.example.com");
    assert_eq!(config.deploy.timeout_secs, 120);
    assert_eq!(saves(&store), 2);
}

#[test]
fn set_value_unknown_key_does_not_save() {
    let store = MemoryConfigStore::default();
    let err = set_value(&store, "app.owner", "me").unwrap_err();
    assert!(err.to_string().contains("Unknown setting"), "got: {err}");
    assert_eq!(saves(&store), 0);
}

#[test]
fn set_value_invalid_value_does_not_save() {
    let store = MemoryConfigStore::default();
    let err = set_value(&store, "api.url", "localhost:8888").unwrap_err();
    assert!(err.to_string().contains("Invalid value"), "got: {err}");
    assert_eq!(saves(&store), 0);
    assert_eq!(load_config(&store).unwrap(), HarnessConfig::default());
}
