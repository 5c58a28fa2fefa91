//! Shipped configuration environments.

use docshelf_core::config::AppConfig;
use docshelf_core::config::storage::ProviderKind;

fn load(env: &str) -> AppConfig {
    AppConfig::load_from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/config"), env).unwrap()
}

#[test]
fn test_development_uses_remote_stores() {
    let config = load("development");
    assert_eq!(config.storage.provider, ProviderKind::Remote);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_env_without_file_uses_defaults() {
    let config = load("production");
    assert_eq!(config.storage.provider, ProviderKind::Remote);
    assert_eq!(config.storage.list_page_size, 100);
    assert_eq!(config.trash.retention_days, 30);
}

#[test]
fn test_memory_stores_are_opt_in() {
    assert_eq!(load("local").storage.provider, ProviderKind::Memory);
}
