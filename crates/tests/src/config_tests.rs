//! Layered configuration read from the process environment.

use afgscan_core::config::{AppConfig, TotalTransactionsMode};
use serial_test::serial;

const VARS: [&str; 5] = [
    "AFGSCAN__SERVER__BIND_PORT",
    "AFGSCAN__STATS__TOTAL_TRANSACTIONS_MODE",
    "AFGSCAN__INDEXER__URL",
    "NODEREAL_BSC_RPC_URL",
    "RPC_URL",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

fn load() -> AppConfig {
    AppConfig::from_file("config/does-not-exist.toml").unwrap_or_else(|e| panic!("load: {e}"))
}

#[test]
#[serial]
fn test_defaults_without_file_or_env() {
    clear_env();
    let config = load();

    assert_eq!(config.server.bind_port, 3000);
    assert_eq!(config.stats.total_transactions_mode, TotalTransactionsMode::AllTime);
    assert!(config.rpc.url.is_none());
    assert!(config.indexer.url.is_none());
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_prefixed_env_overrides() {
    clear_env();
    std::env::set_var("AFGSCAN__SERVER__BIND_PORT", "8088");
    std::env::set_var("AFGSCAN__STATS__TOTAL_TRANSACTIONS_MODE", "last_24h");

    let config = load();
    clear_env();

    assert_eq!(config.server.bind_port, 8088);
    assert_eq!(config.stats.total_transactions_mode, TotalTransactionsMode::Last24h);
}

#[test]
#[serial]
fn test_legacy_urls_fill_unset_upstreams() {
    clear_env();
    std::env::set_var("NODEREAL_BSC_RPC_URL", "https://bsc-mainnet.nodereal.io/v1/key");
    std::env::set_var("RPC_URL", "  ");

    let config = load();
    assert_eq!(config.indexer.url.as_deref(), Some("https://bsc-mainnet.nodereal.io/v1/key"));
    assert!(config.rpc.url.is_none(), "blank legacy URL is ignored");

    std::env::set_var("AFGSCAN__INDEXER__URL", "https://indexer.example.org");
    let config = load();
    clear_env();

    assert_eq!(config.indexer.url.as_deref(), Some("https://indexer.example.org"));
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_env();
    let mut config = load();
    config.rpc.url = Some("ftp://node.example.org".to_string());
    assert!(config.validate().is_err());

    let mut config = load();
    config.indexer.contract_address = "0x1234".to_string();
    assert!(config.validate().is_err());
}
