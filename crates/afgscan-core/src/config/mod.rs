//! Application configuration with layered loading.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//!
//! 1. **Compiled defaults**: `Default` implementations and `serde` default functions
//! 2. **Config file**: TOML file specified by the `AFGSCAN_CONFIG` env var
//! 3. **Environment variables**: `AFGSCAN__SECTION__FIELD` overrides specific fields
//! 4. **Legacy variables**: `NODEREAL_BSC_RPC_URL` and `RPC_URL` fill the indexer and
//!    node URLs when neither the file nor `AFGSCAN__*` set them
//!
//! # Configuration Sections
//!
//! - [`ServerConfig`]: HTTP server settings (bind address, concurrency)
//! - [`RpcConfig`]: JSON-RPC node endpoint
//! - [`IndexerConfig`]: NodeReal transfer indexer endpoint, token contract, page sizes
//! - [`CacheConfig`]: TTLs of the cached aggregates
//! - [`StatsConfig`]: total-transaction policy and the simulated counter
//! - [`LoggingConfig`]: Log level and format
//!
//! Both upstream URLs are optional. A missing node URL makes the chain routes
//! answer 503; a missing indexer URL switches the home counter to simulation.
//!
//! # Example
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0"
//! bind_port = 3000
//!
//! [rpc]
//! url = "https://bsc-dataseed.example.org"
//!
//! [indexer]
//! url = "https://bsc-mainnet.nodereal.io/v1/API_KEY"
//!
//! [stats]
//! total_transactions_mode = "last_24h"
//! ```

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Token contract whose transfers the explorer indexes.
pub const DEFAULT_TOKEN_CONTRACT: &str = "0x91e9d32262fb1c60575ba1c13205e5b95e5004ac";

/// HTTP server configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// IP address to bind the server to. Defaults to `127.0.0.1`.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port number to listen on. Must be greater than 0. Defaults to `3000`.
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Maximum number of concurrent API requests. Defaults to `256`.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Overall request timeout in seconds, for every route except `/api/v2/stats`.
    /// Must be greater than 0. Defaults to `30`.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    3000
}

fn default_max_concurrent_requests() -> usize {
    256
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_upstream_timeout_seconds() -> u64 {
    10
}

/// JSON-RPC node settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// HTTP(S) endpoint of the EVM node. Chain routes return 503 when unset.
    #[serde(default)]
    pub url: Option<String>,

    /// Per-call timeout in seconds. Defaults to `10`.
    #[serde(default = "default_upstream_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// NodeReal `nr_getAssetTransfers` indexer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// HTTP(S) endpoint including the API key. The simulated counter is used when unset.
    #[serde(default)]
    pub url: Option<String>,

    /// Token contract whose transfers are listed. Defaults to the AFG token.
    #[serde(default = "default_contract_address")]
    pub contract_address: String,

    /// Decimals used when a transfer does not report its own. Defaults to `18`.
    #[serde(default = "default_token_decimals")]
    pub token_decimals: u8,

    /// Transfers per page on `/transactions`. Defaults to `50`.
    #[serde(default = "default_list_page_size")]
    pub list_page_size: u32,

    /// Transfers per page when counting the last 24 hours. Defaults to `100`.
    #[serde(default = "default_stats_page_size")]
    pub stats_page_size: u32,

    /// Transfers per page when counting all transfers ever. Defaults to `1000`.
    #[serde(default = "default_count_page_size")]
    pub count_page_size: u32,

    /// Upper bound on pages walked by one all-time count. Defaults to `10000`.
    #[serde(default = "default_max_count_pages")]
    pub max_count_pages: u32,

    /// Per-call timeout in seconds. Defaults to `10`.
    #[serde(default = "default_upstream_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_contract_address() -> String {
    DEFAULT_TOKEN_CONTRACT.to_string()
}

fn default_token_decimals() -> u8 {
    18
}

fn default_list_page_size() -> u32 {
    50
}

fn default_stats_page_size() -> u32 {
    100
}

fn default_count_page_size() -> u32 {
    1000
}

fn default_max_count_pages() -> u32 {
    10_000
}

/// TTLs of the cached aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of the all-time transfer count. Defaults to `600`.
    #[serde(default = "default_total_transactions_ttl_seconds")]
    pub total_transactions_ttl_seconds: u64,

    /// Lifetime of the first `/transactions` page. Defaults to `30`.
    #[serde(default = "default_transactions_page_ttl_seconds")]
    pub transactions_page_ttl_seconds: u64,
}

fn default_total_transactions_ttl_seconds() -> u64 {
    600
}

fn default_transactions_page_ttl_seconds() -> u64 {
    30
}

/// Which counter feeds `total_transactions` on the home statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalTransactionsMode {
    /// Count every transfer the indexer knows about (cached).
    #[default]
    AllTime,
    /// Count transfers of the last 24 hours.
    Last24h,
}

/// Home statistics policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Counter used while the indexer is configured. Defaults to `all_time`.
    #[serde(default)]
    pub total_transactions_mode: TotalTransactionsMode,

    /// Simulated count at process start. Must be greater than 0. Defaults to `1250000`.
    #[serde(default = "default_simulated_base_transactions")]
    pub simulated_base_transactions: u64,

    /// Simulated transactions added per day of uptime. Defaults to `43200`.
    #[serde(default = "default_simulated_growth_per_day")]
    pub simulated_growth_per_day: u64,

    /// How long `/stats` waits for an all-time count before answering with the
    /// last known value. The walk keeps running and fills the cache. Defaults to `10`.
    #[serde(default = "default_total_transactions_budget_seconds")]
    pub total_transactions_budget_seconds: u64,
}

fn default_simulated_base_transactions() -> u64 {
    1_250_000
}

fn default_simulated_growth_per_day() -> u64 {
    43_200
}

fn default_total_transactions_budget_seconds() -> u64 {
    10
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset. Defaults to `info`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format, `pretty` or `json`. Defaults to `pretty`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Root configuration for the explorer API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub rpc: RpcConfig,

    #[serde(default)]
    pub indexer: IndexerConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub stats: StatsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            max_concurrent_requests: default_max_concurrent_requests(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self { url: None, timeout_seconds: default_upstream_timeout_seconds() }
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            url: None,
            contract_address: default_contract_address(),
            token_decimals: default_token_decimals(),
            list_page_size: default_list_page_size(),
            stats_page_size: default_stats_page_size(),
            count_page_size: default_count_page_size(),
            max_count_pages: default_max_count_pages(),
            timeout_seconds: default_upstream_timeout_seconds(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            total_transactions_ttl_seconds: default_total_transactions_ttl_seconds(),
            transactions_page_ttl_seconds: default_transactions_page_ttl_seconds(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            total_transactions_mode: TotalTransactionsMode::default(),
            simulated_base_transactions: default_simulated_base_transactions(),
            simulated_growth_per_day: default_simulated_growth_per_day(),
            total_transactions_budget_seconds: default_total_transactions_budget_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: default_log_format() }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Loads configuration from a TOML file with environment variable overrides.
    ///
    /// Environment variables with the `AFGSCAN__` prefix can override any value,
    /// using `__` between nested fields (e.g. `AFGSCAN__SERVER__BIND_PORT=8080`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be parsed or deserialized.
    pub fn from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let mut config: AppConfig = Config::builder()
            .set_default("server.bind_address", default_bind_address())?
            .set_default("server.bind_port", i64::from(default_bind_port()))?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .add_source(File::with_name(&config_path.as_ref().to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("AFGSCAN").prefix_separator("__").separator("__"))
            .build()?
            .try_deserialize()?;

        config.apply_legacy_env();
        Ok(config)
    }

    /// Loads configuration from `config/config.toml` with fallback to defaults.
    ///
    /// The path can be overridden using the `AFGSCAN_CONFIG` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("AFGSCAN_CONFIG").unwrap_or_else(|_| "config/config.toml".to_string());
        Self::from_file(&config_path)
    }

    /// Fills unset upstream URLs from the variables older deployments use.
    pub fn apply_legacy_env(&mut self) {
        if self.indexer.url.is_none() {
            self.indexer.url = non_empty_env("NODEREAL_BSC_RPC_URL");
        }
        if self.rpc.url.is_none() {
            self.rpc.url = non_empty_env("RPC_URL");
        }
    }

    /// Returns the parsed socket address for the HTTP server.
    ///
    /// # Errors
    ///
    /// Returns an error string if the address cannot be parsed.
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, String> {
        format!("{}:{}", self.server.bind_address, self.server.bind_port)
            .parse()
            .map_err(|_| {
                format!(
                    "Invalid socket address: {}:{}",
                    self.server.bind_address, self.server.bind_port
                )
            })
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_seconds)
    }

    /// Validates the configuration for correctness and consistency.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [("rpc", &self.rpc.url), ("indexer", &self.indexer.url)] {
            if let Some(url) = url {
                let parsed =
                    url::Url::parse(url).map_err(|e| format!("Invalid {name} URL: {e}"))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(format!("{name} URL must use http or https"));
                }
            }
        }

        if crate::types::Address::try_from(self.indexer.contract_address.as_str()).is_err() {
            return Err(format!(
                "Invalid token contract address: {}",
                self.indexer.contract_address
            ));
        }

        if self.indexer.token_decimals > 77 {
            return Err("Token decimals must be at most 77".to_string());
        }

        for (name, size) in [
            ("list_page_size", self.indexer.list_page_size),
            ("stats_page_size", self.indexer.stats_page_size),
            ("count_page_size", self.indexer.count_page_size),
        ] {
            if size == 0 || size > 1000 {
                return Err(format!("indexer.{name} must be between 1 and 1000"));
            }
        }

        if self.indexer.max_count_pages == 0 {
            return Err("indexer.max_count_pages must be greater than 0".to_string());
        }

        if self.rpc.timeout_seconds == 0 || self.indexer.timeout_seconds == 0 {
            return Err("Upstream timeouts must be greater than 0".to_string());
        }

        if self.server.request_timeout_seconds == 0 {
            return Err("server.request_timeout_seconds must be greater than 0".to_string());
        }

        if self.stats.total_transactions_budget_seconds == 0 {
            return Err(
                "stats.total_transactions_budget_seconds must be greater than 0".to_string()
            );
        }

        if self.cache.total_transactions_ttl_seconds == 0 ||
            self.cache.transactions_page_ttl_seconds == 0
        {
            return Err("Cache TTLs must be greater than 0".to_string());
        }

        if self.stats.simulated_base_transactions == 0 {
            return Err("stats.simulated_base_transactions must be greater than 0".to_string());
        }

        if self.server.max_concurrent_requests == 0 {
            return Err("Max concurrent requests must be greater than 0".to_string());
        }

        if self.server.bind_port == 0 {
            return Err("Bind port must be greater than 0".to_string());
        }

        if !["json", "pretty"].contains(&self.logging.format.as_str()) {
            return Err("Logging format must be 'json' or 'pretty'".to_string());
        }

        Ok(())
    }
}
