//! Explorer output schema.
//!
//! Field names and nullability follow the Blockscout v2 API so existing
//! explorer front ends can consume the responses unchanged. Fields the
//! explorer cannot know from RPC data alone are always `null`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reference to an account embedded in other records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddressParam {
    pub hash: String,
    pub name: Option<String>,
    pub implementations: Option<Vec<String>>,
    pub is_contract: bool,
    pub is_verified: bool,
    pub ens_domain_name: Option<String>,
    pub private_tags: Option<Vec<String>>,
    pub public_tags: Option<Vec<String>>,
    pub watchlist_names: Option<Vec<String>>,
}

impl AddressParam {
    #[must_use]
    pub fn new(hash: impl Into<String>, is_contract: bool) -> Self {
        Self {
            hash: hash.into(),
            name: None,
            implementations: None,
            is_contract,
            is_verified: false,
            ens_domain_name: None,
            private_tags: None,
            public_tags: None,
            watchlist_names: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlockRecord {
    pub height: u64,
    pub timestamp: Option<String>,
    pub transactions_count: usize,
    pub internal_transactions_count: u64,
    pub miner: AddressParam,
    pub size: Option<u64>,
    pub hash: Option<String>,
    pub parent_hash: String,
    pub difficulty: Option<String>,
    pub total_difficulty: Option<String>,
    pub gas_used: String,
    pub gas_limit: String,
    pub nonce: Option<String>,
    pub base_fee_per_gas: Option<String>,
    pub burnt_fees: Option<String>,
    pub priority_fee: Option<String>,
    pub extra_data: String,
    pub state_root: String,
    pub gas_target_percentage: Option<String>,
    pub gas_used_percentage: Option<String>,
    pub burnt_fees_percentage: Option<String>,
    #[serde(rename = "type")]
    pub block_type: String,
    pub transaction_fees: Option<String>,
    pub uncles_hashes: Vec<String>,
    pub withdrawals_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Fee {
    #[serde(rename = "type")]
    pub fee_type: String,
    pub value: Option<String>,
}

impl Fee {
    #[must_use]
    pub fn actual(value: Option<String>) -> Self {
        Self { fee_type: "actual".to_string(), value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransactionRecord {
    pub hash: String,
    pub from: AddressParam,
    pub to: Option<AddressParam>,
    pub created_contract: Option<AddressParam>,
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub confirmations: u64,
    pub confirmation_duration: Option<Vec<u64>>,
    pub block_number: Option<u64>,
    pub timestamp: Option<String>,
    /// Native value in wei, or exact token units for indexed transfers.
    pub value: String,
    pub fee: Fee,
    pub gas_price: Option<String>,
    pub gas_used: Option<String>,
    pub gas_limit: String,
    pub base_fee_per_gas: Option<String>,
    pub max_fee_per_gas: Option<String>,
    pub max_priority_fee_per_gas: Option<String>,
    pub priority_fee: Option<String>,
    pub transaction_burnt_fee: Option<String>,
    pub nonce: u64,
    pub position: Option<u64>,
    #[serde(rename = "type")]
    pub tx_type: Option<u64>,
    pub raw_input: String,
    pub revert_reason: Option<String>,
    pub decoded_input: Option<String>,
    pub has_error_in_internal_transactions: Option<bool>,
    pub token_transfers: Option<Vec<String>>,
    pub token_transfers_overflow: bool,
    pub exchange_rate: Option<String>,
    pub method: Option<String>,
    pub transaction_types: Vec<String>,
    pub transaction_tag: Option<String>,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddressRecord {
    pub hash: String,
    /// Balance in wei.
    pub coin_balance: String,
    pub block_number_balance_updated_at: Option<u64>,
    pub creator_address_hash: Option<String>,
    pub creation_transaction_hash: Option<String>,
    pub creation_status: Option<String>,
    pub exchange_rate: Option<String>,
    pub ens_domain_name: Option<String>,
    pub has_logs: bool,
    pub has_token_transfers: bool,
    pub has_tokens: bool,
    pub has_validated_blocks: bool,
    pub implementations: Option<Vec<String>>,
    pub is_contract: bool,
    pub is_verified: bool,
    pub name: Option<String>,
    pub token: Option<String>,
    pub watchlist_address_id: Option<u64>,
    pub private_tags: Option<Vec<String>>,
    pub public_tags: Option<Vec<String>>,
    pub watchlist_names: Option<Vec<String>>,
}

/// Token amount moved by one transaction, `null` when it moved none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenValue {
    pub value: Option<String>,
}
