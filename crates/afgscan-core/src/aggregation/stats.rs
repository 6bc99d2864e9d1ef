//! Home-page statistics records and the chain half of their computation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    upstream::{RpcGateway, UpstreamError},
    utils::BlockId,
};

/// `/stats` body.
///
/// Only the block and transaction counters are live; market and gas fields
/// are fixed placeholders in the Blockscout shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HomeStats {
    pub total_blocks: String,
    pub total_addresses: String,
    pub total_transactions: String,
    /// Milliseconds between the two newest blocks.
    pub average_block_time: u64,
    pub coin_price: Option<String>,
    pub coin_price_change_percentage: Option<f64>,
    pub total_gas_used: String,
    pub transactions_today: Option<String>,
    pub gas_used_today: String,
    pub gas_prices: Option<serde_json::Value>,
    pub gas_price_updated_at: Option<String>,
    pub gas_prices_update_in: u64,
    pub static_gas_price: Option<String>,
    pub market_cap: Option<String>,
    pub network_utilization_percentage: f64,
    pub tvl: Option<String>,
}

impl HomeStats {
    #[must_use]
    pub fn new(summary: ChainSummary, total_transactions: u64) -> Self {
        Self {
            total_blocks: summary.total_blocks.to_string(),
            total_addresses: "0".to_string(),
            total_transactions: total_transactions.to_string(),
            average_block_time: summary.average_block_time_ms,
            coin_price: None,
            coin_price_change_percentage: None,
            total_gas_used: "0".to_string(),
            transactions_today: None,
            gas_used_today: "0".to_string(),
            gas_prices: None,
            gas_price_updated_at: None,
            gas_prices_update_in: 0,
            static_gas_price: None,
            market_cap: None,
            network_utilization_percentage: 0.0,
            tvl: None,
        }
    }
}

/// `/transactions/stats` body. Fee and pending counters are not tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransactionsStats {
    pub transactions_count_24h: String,
    pub pending_transactions_count: String,
    pub transaction_fees_sum_24h: String,
    pub transaction_fees_avg_24h: String,
}

impl TransactionsStats {
    #[must_use]
    pub fn with_count(transactions_count_24h: u64) -> Self {
        Self {
            transactions_count_24h: transactions_count_24h.to_string(),
            pending_transactions_count: "0".to_string(),
            transaction_fees_sum_24h: "0".to_string(),
            transaction_fees_avg_24h: "0".to_string(),
        }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::with_count(0)
    }
}

/// Block-derived half of the home statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainSummary {
    pub total_blocks: u64,
    pub average_block_time_ms: u64,
}

/// Reads the latest height and the gap between the two newest blocks.
///
/// Never fails: an unreachable node yields zeros and a failed block lookup
/// leaves the average at zero.
pub async fn chain_summary(rpc: &dyn RpcGateway) -> ChainSummary {
    let latest = match rpc.latest_height().await {
        Ok(latest) => latest,
        Err(e) => {
            tracing::warn!(error = %e, "latest height unavailable, reporting zero blocks");
            return ChainSummary::default();
        }
    };

    let average_block_time_ms = if latest > 0 {
        match average_block_time_ms(rpc, latest).await {
            Ok(avg) => avg.unwrap_or(0),
            Err(e) => {
                tracing::debug!(error = %e, latest, "block time lookup failed");
                0
            }
        }
    } else {
        0
    };

    ChainSummary { total_blocks: latest, average_block_time_ms }
}

/// `(latest.timestamp - previous.timestamp) * 1000`, `None` if either block is missing.
async fn average_block_time_ms(
    rpc: &dyn RpcGateway,
    latest: u64,
) -> Result<Option<u64>, UpstreamError> {
    let (newest, previous) = futures::try_join!(
        rpc.block(BlockId::Number(latest), false),
        rpc.block(BlockId::Number(latest - 1), false),
    )?;

    Ok(newest.zip(previous).map(|(newest, previous)| {
        newest.timestamp_secs().saturating_sub(previous.timestamp_secs()).saturating_mul(1000)
    }))
}
