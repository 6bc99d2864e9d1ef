//! Wire shapes returned by the node and the transfer indexer.
//!
//! Quantities stay as the hex strings the node sent; the accessor methods
//! decode them on demand so a single odd field never fails a whole block.

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::BlockParameter;

fn quantity(value: Option<&str>) -> Option<u64> {
    value.and_then(BlockParameter::parse_hex)
}

fn big_quantity(value: Option<&str>) -> Option<U256> {
    value.and_then(BlockParameter::parse_u256)
}

/// `eth_getBlockBy*` result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub number: Option<String>,
    pub hash: Option<String>,
    #[serde(default)]
    pub parent_hash: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub miner: String,
    pub size: Option<String>,
    pub difficulty: Option<String>,
    pub total_difficulty: Option<String>,
    #[serde(default)]
    pub gas_used: String,
    #[serde(default)]
    pub gas_limit: String,
    pub nonce: Option<String>,
    pub base_fee_per_gas: Option<String>,
    #[serde(default)]
    pub extra_data: String,
    #[serde(default)]
    pub state_root: String,
    #[serde(default)]
    pub uncles: Vec<String>,
    pub withdrawals: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub transactions: Vec<BlockTransaction>,
}

/// Entry of a block's `transactions` array: hashes unless full objects were requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockTransaction {
    Hash(String),
    Full(Box<RawTransaction>),
}

impl BlockTransaction {
    #[must_use]
    pub fn hash(&self) -> &str {
        match self {
            BlockTransaction::Hash(hash) => hash,
            BlockTransaction::Full(tx) => &tx.hash,
        }
    }
}

impl RawBlock {
    /// Height, or 0 for pending blocks which have none.
    #[must_use]
    pub fn height(&self) -> u64 {
        quantity(self.number.as_deref()).unwrap_or(0)
    }

    /// Unix seconds.
    #[must_use]
    pub fn timestamp_secs(&self) -> u64 {
        BlockParameter::parse_hex(&self.timestamp).unwrap_or(0)
    }

    #[must_use]
    pub fn size(&self) -> Option<u64> {
        quantity(self.size.as_deref())
    }

    #[must_use]
    pub fn gas_used(&self) -> U256 {
        BlockParameter::parse_u256(&self.gas_used).unwrap_or_default()
    }

    #[must_use]
    pub fn gas_limit(&self) -> U256 {
        BlockParameter::parse_u256(&self.gas_limit).unwrap_or_default()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<U256> {
        big_quantity(self.difficulty.as_deref())
    }

    #[must_use]
    pub fn total_difficulty(&self) -> Option<U256> {
        big_quantity(self.total_difficulty.as_deref())
    }

    #[must_use]
    pub fn base_fee_per_gas(&self) -> Option<U256> {
        big_quantity(self.base_fee_per_gas.as_deref())
    }

    /// Full transaction objects, skipping bare hashes.
    pub fn full_transactions(&self) -> impl Iterator<Item = &RawTransaction> {
        self.transactions.iter().filter_map(|entry| match entry {
            BlockTransaction::Full(tx) => Some(tx.as_ref()),
            BlockTransaction::Hash(_) => None,
        })
    }
}

/// `eth_getTransactionByHash` result or a full entry of a block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub hash: String,
    pub block_hash: Option<String>,
    pub block_number: Option<String>,
    pub transaction_index: Option<String>,
    pub from: String,
    pub to: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub gas: String,
    pub gas_price: Option<String>,
    pub max_fee_per_gas: Option<String>,
    pub max_priority_fee_per_gas: Option<String>,
    #[serde(default)]
    pub nonce: String,
    #[serde(default)]
    pub input: String,
    #[serde(rename = "type")]
    pub tx_type: Option<String>,
}

impl RawTransaction {
    #[must_use]
    pub fn block_number(&self) -> Option<u64> {
        quantity(self.block_number.as_deref())
    }

    #[must_use]
    pub fn position(&self) -> Option<u64> {
        quantity(self.transaction_index.as_deref())
    }

    #[must_use]
    pub fn value(&self) -> U256 {
        BlockParameter::parse_u256(&self.value).unwrap_or_default()
    }

    #[must_use]
    pub fn gas(&self) -> U256 {
        BlockParameter::parse_u256(&self.gas).unwrap_or_default()
    }

    #[must_use]
    pub fn gas_price(&self) -> Option<U256> {
        big_quantity(self.gas_price.as_deref())
    }

    #[must_use]
    pub fn max_fee_per_gas(&self) -> Option<U256> {
        big_quantity(self.max_fee_per_gas.as_deref())
    }

    #[must_use]
    pub fn max_priority_fee_per_gas(&self) -> Option<U256> {
        big_quantity(self.max_priority_fee_per_gas.as_deref())
    }

    #[must_use]
    pub fn nonce(&self) -> u64 {
        BlockParameter::parse_hex(&self.nonce).unwrap_or(0)
    }

    #[must_use]
    pub fn tx_type(&self) -> Option<u64> {
        quantity(self.tx_type.as_deref())
    }
}

/// `eth_getTransactionReceipt` result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    pub transaction_hash: Option<String>,
    pub status: Option<String>,
    pub gas_used: Option<String>,
    pub effective_gas_price: Option<String>,
    pub contract_address: Option<String>,
    #[serde(default)]
    pub logs: Vec<RawLog>,
}

impl RawReceipt {
    /// `true` for `status == 0x1`. Pre-Byzantium receipts without status count as success.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.status.as_deref().and_then(BlockParameter::parse_hex).map_or(true, |s| s == 1)
    }

    #[must_use]
    pub fn gas_used(&self) -> Option<U256> {
        big_quantity(self.gas_used.as_deref())
    }

    #[must_use]
    pub fn effective_gas_price(&self) -> Option<U256> {
        big_quantity(self.effective_gas_price.as_deref())
    }
}

/// Receipt log entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLog {
    pub address: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub data: String,
}

/// Opaque indexer continuation token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(pub String);

impl Cursor {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One token transfer as reported by `nr_getAssetTransfers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub block_num: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    /// Raw integer amount, hex or decimal.
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub block_time_stamp: Option<u64>,
    #[serde(default)]
    pub decimal: Option<String>,
    #[serde(default)]
    pub contract_address: Option<String>,
}

impl TransferRecord {
    #[must_use]
    pub fn block_number(&self) -> u64 {
        BlockParameter::parse_flexible(&self.block_num).unwrap_or(0)
    }

    #[must_use]
    pub fn raw_value(&self) -> U256 {
        BlockParameter::parse_u256(&self.value).unwrap_or_default()
    }

    /// Decimals reported by the indexer, if any and parseable.
    #[must_use]
    pub fn decimals(&self) -> Option<u8> {
        self.decimal
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .and_then(|d| d.parse().ok())
    }

    /// Block timestamp in unix seconds, ignoring zero.
    #[must_use]
    pub fn timestamp(&self) -> Option<u64> {
        self.block_time_stamp.filter(|ts| *ts > 0)
    }
}

/// Accepts a JSON number, a decimal or hex string, or null.
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => {
            n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        }
        Some(serde_json::Value::String(s)) => BlockParameter::parse_flexible(&s),
        _ => None,
    })
}

/// `result` object of `nr_getAssetTransfers`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransfersResult {
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,
    #[serde(default)]
    pub page_key: Option<String>,
}
