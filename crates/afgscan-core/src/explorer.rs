use std::{sync::Arc, time::Duration};

use crate::{
    aggregation::{
        chain_summary, count_all_transfers, count_transfers_since, simulated_transaction_count,
        ChainSummary, HomeStats, TransactionsStats, SECONDS_PER_DAY,
    },
    cache::ExplorerCaches,
    config::{AppConfig, TotalTransactionsMode},
    errors::ExplorerError,
    listing::{
        self, decode_page_cursor, fetch_transactions_page, BlockListQuery, BlocksPage,
        TransactionsPage,
    },
    mapper::{self, AddressRecord, BlockRecord, TokenValue, TransactionRecord},
    types::{Address, Hash32},
    upstream::{
        HttpClient, HttpRpcGateway, IndexerGateway, NodeRealIndexer, RpcGateway, TransferQuery,
    },
    utils::BlockId,
};

/// Token and paging parameters of the explorer.
#[derive(Debug, Clone)]
pub struct ExplorerSettings {
    pub token: Address,
    pub token_decimals: u8,
    pub list_page_size: u32,
    pub stats_page_size: u32,
    pub count_page_size: u32,
    pub max_count_pages: u32,
    pub total_transactions_mode: TotalTransactionsMode,
    pub simulated_base_transactions: u64,
    pub simulated_growth_per_day: u64,
    pub total_transactions_budget: Duration,
}

impl ExplorerSettings {
    /// # Errors
    ///
    /// Returns [`ExplorerError::InvalidInput`] if the token contract is not an address.
    pub fn from_config(config: &AppConfig) -> Result<Self, ExplorerError> {
        let token = Address::try_from(config.indexer.contract_address.as_str()).map_err(|e| {
            ExplorerError::InvalidInput(format!("invalid token contract address: {e}"))
        })?;

        Ok(Self {
            token,
            token_decimals: config.indexer.token_decimals,
            list_page_size: config.indexer.list_page_size,
            stats_page_size: config.indexer.stats_page_size,
            count_page_size: config.indexer.count_page_size,
            max_count_pages: config.indexer.max_count_pages,
            total_transactions_mode: config.stats.total_transactions_mode,
            simulated_base_transactions: config.stats.simulated_base_transactions,
            simulated_growth_per_day: config.stats.simulated_growth_per_day,
            total_transactions_budget: Duration::from_secs(
                config.stats.total_transactions_budget_seconds,
            ),
        })
    }

    fn transfer_query(&self, page_size: u32) -> TransferQuery {
        TransferQuery::erc20(self.token.to_string(), page_size)
    }
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        let config = AppConfig::default();
        Self {
            token: Address::default(),
            token_decimals: config.indexer.token_decimals,
            list_page_size: config.indexer.list_page_size,
            stats_page_size: config.indexer.stats_page_size,
            count_page_size: config.indexer.count_page_size,
            max_count_pages: config.indexer.max_count_pages,
            total_transactions_mode: config.stats.total_transactions_mode,
            simulated_base_transactions: config.stats.simulated_base_transactions,
            simulated_growth_per_day: config.stats.simulated_growth_per_day,
            total_transactions_budget: Duration::from_secs(
                config.stats.total_transactions_budget_seconds,
            ),
        }
    }
}

/// Entry point of every explorer operation.
///
/// Owns the optional upstream gateways and the shared caches. Each method
/// validates its input before checking that the gateway it needs exists, so a
/// malformed hash is a 400 even on a node-less deployment.
pub struct Explorer {
    rpc: Option<Arc<dyn RpcGateway>>,
    indexer: Option<Arc<dyn IndexerGateway>>,
    caches: Arc<ExplorerCaches>,
    settings: ExplorerSettings,
    started_at: i64,
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

impl Explorer {
    /// Explorer without gateways. Attach them with [`with_rpc`](Self::with_rpc)
    /// and [`with_indexer`](Self::with_indexer).
    #[must_use]
    pub fn new(settings: ExplorerSettings, caches: Arc<ExplorerCaches>) -> Self {
        Self { rpc: None, indexer: None, caches, settings, started_at: now_secs() }
    }

    /// Builds the HTTP gateways for every configured upstream URL.
    ///
    /// # Errors
    ///
    /// Fails if the token contract is invalid or the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ExplorerError> {
        let settings = ExplorerSettings::from_config(config)?;
        let caches = Arc::new(ExplorerCaches::new(&config.cache));
        let http_client = Arc::new(HttpClient::new()?);

        let mut explorer = Self::new(settings, caches);

        if let Some(url) = &config.rpc.url {
            let timeout = Duration::from_secs(config.rpc.timeout_seconds);
            explorer = explorer.with_rpc(Arc::new(HttpRpcGateway::new(
                url.clone(),
                timeout,
                Arc::clone(&http_client),
            )));
        } else {
            tracing::warn!("no RPC URL configured, chain routes will answer 503");
        }

        if let Some(url) = &config.indexer.url {
            let timeout = Duration::from_secs(config.indexer.timeout_seconds);
            explorer = explorer.with_indexer(Arc::new(NodeRealIndexer::new(
                url.clone(),
                timeout,
                Arc::clone(&http_client),
            )));
        } else {
            tracing::warn!("no indexer URL configured, transaction totals are simulated");
        }

        Ok(explorer)
    }

    #[must_use]
    pub fn with_rpc(mut self, rpc: Arc<dyn RpcGateway>) -> Self {
        self.rpc = Some(rpc);
        self
    }

    #[must_use]
    pub fn with_indexer(mut self, indexer: Arc<dyn IndexerGateway>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    /// Overrides the process start used by the simulated counter.
    #[must_use]
    pub fn with_started_at(mut self, started_at: i64) -> Self {
        self.started_at = started_at;
        self
    }

    #[must_use]
    pub fn has_rpc(&self) -> bool {
        self.rpc.is_some()
    }

    #[must_use]
    pub fn has_indexer(&self) -> bool {
        self.indexer.is_some()
    }

    #[must_use]
    pub fn started_at(&self) -> i64 {
        self.started_at
    }

    #[must_use]
    pub fn settings(&self) -> &ExplorerSettings {
        &self.settings
    }

    #[must_use]
    pub fn caches(&self) -> &Arc<ExplorerCaches> {
        &self.caches
    }

    fn rpc(&self) -> Result<&dyn RpcGateway, ExplorerError> {
        self.rpc.as_deref().ok_or(ExplorerError::RpcUnconfigured)
    }

    fn indexer(&self) -> Result<&dyn IndexerGateway, ExplorerError> {
        self.indexer.as_deref().ok_or(ExplorerError::IndexerUnconfigured)
    }

    fn cache_key(&self) -> String {
        self.settings.token.to_string()
    }

    /// Home statistics. Never fails; unavailable parts read as zero.
    pub async fn home_stats(&self) -> HomeStats {
        let (summary, total_transactions) = futures::join!(
            async {
                match &self.rpc {
                    Some(rpc) => chain_summary(rpc.as_ref()).await,
                    None => ChainSummary::default(),
                }
            },
            self.total_transactions(),
        );
        HomeStats::new(summary, total_transactions)
    }

    /// `total_transactions` of the home statistics under the configured policy.
    pub async fn total_transactions(&self) -> u64 {
        if self.indexer.is_none() {
            return self.simulated_transactions();
        }

        match self.settings.total_transactions_mode {
            TotalTransactionsMode::AllTime => self.all_time_transactions().await,
            TotalTransactionsMode::Last24h => {
                self.transactions_count_24h().await.unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "24h transaction count failed, reporting zero");
                    0
                })
            }
        }
    }

    #[must_use]
    pub fn simulated_transactions(&self) -> u64 {
        simulated_transaction_count(
            self.started_at,
            now_secs(),
            self.settings.simulated_base_transactions,
            self.settings.simulated_growth_per_day,
        )
    }

    /// Every transfer of the token, cached for the configured TTL.
    ///
    /// The page walk runs on its own task, so it finishes and fills the cache
    /// even when the caller stops waiting. Callers wait at most
    /// `total_transactions_budget`. A failed or unfinished walk falls back to
    /// the last count ever stored, then to zero.
    pub async fn all_time_transactions(&self) -> u64 {
        let Some(indexer) = self.indexer.clone() else {
            return 0;
        };
        let key = self.cache_key();
        if let Some(count) = self.caches.transfer_counts.get(&key) {
            return count;
        }

        let caches = Arc::clone(&self.caches);
        let query = self.settings.transfer_query(self.settings.count_page_size);
        let max_pages = self.settings.max_count_pages;
        let walk_key = key.clone();
        let walk = tokio::spawn(async move {
            let fetch = || count_all_transfers(indexer.as_ref(), query, max_pages);
            caches.transfer_counts.get_or_refresh(&walk_key, fetch).await
        });

        let fallback = || self.caches.transfer_counts.last_known(&key).unwrap_or(0);
        match tokio::time::timeout(self.settings.total_transactions_budget, walk).await {
            Ok(Ok(Ok(count))) => count,
            Ok(Ok(Err(e))) => {
                let fallback = fallback();
                tracing::warn!(error = %e, fallback, "all-time transaction count failed");
                fallback
            }
            Ok(Err(e)) => {
                let fallback = fallback();
                tracing::error!(error = %e, fallback, "all-time transaction count task aborted");
                fallback
            }
            Err(_) => {
                let fallback = fallback();
                tracing::info!(
                    budget_secs = self.settings.total_transactions_budget.as_secs(),
                    fallback,
                    "all-time transaction count still running, serving last known value"
                );
                fallback
            }
        }
    }

    /// Transfers with a block timestamp within the last 24 hours.
    ///
    /// # Errors
    ///
    /// [`ExplorerError::IndexerUnconfigured`] without an indexer, otherwise
    /// the first page failure.
    pub async fn transactions_count_24h(&self) -> Result<u64, ExplorerError> {
        let indexer = self.indexer()?;
        let cutoff = u64::try_from(now_secs()).unwrap_or(0).saturating_sub(SECONDS_PER_DAY);
        let query = self.settings.transfer_query(self.settings.stats_page_size);

        Ok(count_transfers_since(indexer, query, cutoff, self.settings.max_count_pages).await?)
    }

    /// # Errors
    ///
    /// See [`transactions_count_24h`](Self::transactions_count_24h).
    pub async fn transactions_stats(&self) -> Result<TransactionsStats, ExplorerError> {
        self.transactions_count_24h().await.map(TransactionsStats::with_count)
    }

    /// One page of token transfers. The first page is served from cache while fresh;
    /// later pages always go to the indexer and are never cached.
    ///
    /// # Errors
    ///
    /// [`ExplorerError::IndexerUnconfigured`] or the indexer failure.
    pub async fn list_transactions(
        &self,
        next_page_params: Option<&str>,
    ) -> Result<TransactionsPage, ExplorerError> {
        let indexer = self.indexer()?;
        let cursor = decode_page_cursor(next_page_params);
        let first_page = cursor.is_none();
        let query = self.settings.transfer_query(self.settings.list_page_size).with_cursor(cursor);
        let decimals = self.settings.token_decimals;

        if !first_page {
            return Ok(fetch_transactions_page(indexer, &query, decimals).await?);
        }

        let fetch = || fetch_transactions_page(indexer, &query, decimals);
        let page = self.caches.first_transactions.get_or_refresh(&self.cache_key(), fetch).await?;
        Ok(page)
    }

    /// # Errors
    ///
    /// [`ExplorerError::RpcUnconfigured`] or the first upstream failure.
    pub async fn list_blocks(&self, query: BlockListQuery) -> Result<BlocksPage, ExplorerError> {
        Ok(listing::list_blocks(self.rpc()?, query).await?)
    }

    /// # Errors
    ///
    /// [`ExplorerError::RpcUnconfigured`] or the first upstream failure.
    pub async fn main_page_blocks(&self) -> Result<Vec<BlockRecord>, ExplorerError> {
        Ok(listing::main_page_blocks(self.rpc()?).await?)
    }

    /// # Errors
    ///
    /// [`ExplorerError::RpcUnconfigured`] or the first upstream failure.
    pub async fn main_page_transactions(&self) -> Result<Vec<TransactionRecord>, ExplorerError> {
        Ok(listing::main_page_transactions(self.rpc()?).await?)
    }

    /// Block by decimal height or `0x` hash.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for other shapes, `NotFound` when the node does not
    /// know the block or cannot be reached.
    pub async fn block(&self, height_or_hash: &str) -> Result<BlockRecord, ExplorerError> {
        let id = BlockId::parse(height_or_hash.trim())
            .map_err(|e| ExplorerError::InvalidInput(format!("Invalid height or hash: {e}")))?;
        let rpc = self.rpc()?;

        match rpc.block(id, false).await {
            Ok(Some(block)) => Ok(mapper::block_record(&block)),
            Ok(None) => Err(ExplorerError::NotFound("Block not found".into())),
            Err(e) => {
                tracing::warn!(error = %e, block = %id, "block lookup failed");
                Err(ExplorerError::NotFound("Block not found".into()))
            }
        }
    }

    /// Transaction with its receipt and block, fetched concurrently.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed hash, `NotFound` when the transaction
    /// cannot be fetched.
    pub async fn transaction(&self, hash: &str) -> Result<TransactionRecord, ExplorerError> {
        let hash = parse_hash(hash)?;
        let rpc = self.rpc()?;

        let tx = match rpc.transaction(hash).await {
            Ok(Some(tx)) => tx,
            Ok(None) => return Err(ExplorerError::NotFound("Transaction not found".into())),
            Err(e) => {
                tracing::warn!(error = %e, tx = %hash, "transaction lookup failed");
                return Err(ExplorerError::NotFound("Transaction not found".into()));
            }
        };

        let block_hash = tx.block_hash.as_deref().and_then(|h| Hash32::try_from(h).ok());
        let (receipt, block) = futures::join!(
            async { rpc.receipt(hash).await.ok().flatten() },
            async {
                match block_hash {
                    Some(block_hash) => {
                        rpc.block(BlockId::Hash(block_hash), false).await.ok().flatten()
                    }
                    None => None,
                }
            },
        );

        let confirmations = match &block {
            Some(block) if tx.block_number().is_some() => rpc
                .latest_height()
                .await
                .map(|latest| latest.saturating_sub(block.height()).saturating_add(1))
                .unwrap_or(0),
            _ => 0,
        };

        Ok(mapper::transaction_record(
            &tx,
            receipt.as_ref(),
            block.as_ref(),
            confirmations,
            tx.position(),
        ))
    }

    /// Balance and contract detection for an account.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed address, `NotFound` when the balance
    /// cannot be fetched. A failed code lookup reads as "not a contract".
    pub async fn address(&self, hash: &str) -> Result<AddressRecord, ExplorerError> {
        let address = Address::try_from(hash.trim())
            .map_err(|_| ExplorerError::InvalidInput("Missing or invalid hash".into()))?;
        let rpc = self.rpc()?;

        let (balance, code) = futures::join!(rpc.balance(address), rpc.code(address));
        let balance = balance.map_err(|e| {
            tracing::warn!(error = %e, address = %address, "balance lookup failed");
            ExplorerError::NotFound("Address not found".into())
        })?;
        let code = code
            .inspect_err(|e| tracing::debug!(error = %e, address = %address, "code lookup failed"))
            .ok();

        Ok(mapper::address_record(hash.trim(), balance, code.as_deref()))
    }

    /// Amount of the token moved by a transaction, `null` whenever it cannot be told.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed hash, `RpcUnconfigured` without a node.
    pub async fn token_value(&self, hash: &str) -> Result<TokenValue, ExplorerError> {
        let hash = parse_hash(hash)?;
        let rpc = self.rpc()?;

        Ok(match rpc.receipt(hash).await {
            Ok(Some(receipt)) => {
                mapper::token_value(&receipt, &self.settings.token, self.settings.token_decimals)
            }
            Ok(None) => TokenValue { value: None },
            Err(e) => {
                tracing::debug!(error = %e, tx = %hash, "receipt lookup failed");
                TokenValue { value: None }
            }
        })
    }
}

fn parse_hash(hash: &str) -> Result<Hash32, ExplorerError> {
    Hash32::try_from(hash.trim())
        .map_err(|_| ExplorerError::InvalidInput("Missing or invalid hash".into()))
}
