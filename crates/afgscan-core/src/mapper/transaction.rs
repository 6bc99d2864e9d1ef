use alloy_primitives::U256;

use crate::{
    mapper::{
        records::{AddressParam, Fee, TokenValue, TransactionRecord},
        units::{format_units, iso_timestamp},
    },
    types::Address,
    upstream::{RawBlock, RawReceipt, RawTransaction, TransferRecord},
};

/// `keccak256("Transfer(address,address,uint256)")`
pub const TRANSFER_TOPIC: &str =
    "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

/// Maps a node transaction with whatever receipt and block could be fetched.
#[must_use]
pub fn transaction_record(
    tx: &RawTransaction,
    receipt: Option<&RawReceipt>,
    block: Option<&RawBlock>,
    confirmations: u64,
    position: Option<u64>,
) -> TransactionRecord {
    let gas_price = receipt.and_then(RawReceipt::effective_gas_price).or_else(|| tx.gas_price());
    let gas_used = receipt.and_then(RawReceipt::gas_used);
    let fee = match (gas_used, gas_price) {
        (Some(used), Some(price)) => Some(used.saturating_mul(price).to_string()),
        _ => None,
    };

    TransactionRecord {
        hash: tx.hash.clone(),
        from: AddressParam::new(tx.from.clone(), false),
        to: tx.to.clone().map(|to| AddressParam::new(to, false)),
        created_contract: receipt
            .and_then(|r| r.contract_address.clone())
            .map(|addr| AddressParam::new(addr, true)),
        result: String::new(),
        status: receipt.map(|r| if r.succeeded() { "ok" } else { "error" }.to_string()),
        confirmations,
        confirmation_duration: None,
        block_number: block.map(RawBlock::height).or_else(|| tx.block_number()),
        timestamp: block.and_then(|b| iso_timestamp(b.timestamp_secs())),
        value: tx.value().to_string(),
        fee: Fee::actual(fee),
        gas_price: gas_price.map(|p| p.to_string()),
        gas_used: gas_used.map(|g| g.to_string()),
        gas_limit: tx.gas().to_string(),
        base_fee_per_gas: block.and_then(RawBlock::base_fee_per_gas).map(|f| f.to_string()),
        max_fee_per_gas: tx.max_fee_per_gas().map(|f| f.to_string()),
        max_priority_fee_per_gas: tx.max_priority_fee_per_gas().map(|f| f.to_string()),
        priority_fee: None,
        transaction_burnt_fee: None,
        nonce: tx.nonce(),
        position,
        tx_type: tx.tx_type(),
        raw_input: tx.input.clone(),
        revert_reason: None,
        decoded_input: None,
        has_error_in_internal_transactions: None,
        token_transfers: None,
        token_transfers_overflow: false,
        exchange_rate: None,
        method: None,
        transaction_types: Vec::new(),
        transaction_tag: None,
        actions: Vec::new(),
    }
}

/// Maps an indexed token transfer to a transaction-shaped record.
///
/// `value` carries the exact token amount; gas fields are zeroed since the
/// indexer does not report them.
#[must_use]
pub fn transfer_transaction_record(
    transfer: &TransferRecord,
    default_decimals: u8,
) -> TransactionRecord {
    let decimals = transfer.decimals().unwrap_or(default_decimals);

    TransactionRecord {
        hash: transfer.hash.clone(),
        from: AddressParam::new(transfer.from.clone(), false),
        to: Some(AddressParam::new(transfer.to.clone(), false)),
        created_contract: None,
        result: "success".to_string(),
        status: Some("ok".to_string()),
        confirmations: 0,
        confirmation_duration: None,
        block_number: Some(transfer.block_number()),
        timestamp: transfer.timestamp().and_then(iso_timestamp),
        value: format_units(transfer.raw_value(), decimals),
        fee: Fee::actual(Some("0".to_string())),
        gas_price: Some("0".to_string()),
        gas_used: None,
        gas_limit: "0".to_string(),
        base_fee_per_gas: None,
        max_fee_per_gas: None,
        max_priority_fee_per_gas: None,
        priority_fee: None,
        transaction_burnt_fee: None,
        nonce: 0,
        position: None,
        tx_type: None,
        raw_input: "0x".to_string(),
        revert_reason: None,
        decoded_input: None,
        has_error_in_internal_transactions: Some(false),
        token_transfers: None,
        token_transfers_overflow: false,
        exchange_rate: None,
        method: None,
        transaction_types: vec!["token_transfer".to_string()],
        transaction_tag: None,
        actions: Vec::new(),
    }
}

/// Sums the `Transfer` events emitted by `token` in a receipt.
///
/// Logs from other contracts, with other topics, or without the three
/// indexed topics of an ERC-20 transfer are ignored. A zero total is `null`.
#[must_use]
pub fn token_value(receipt: &RawReceipt, token: &Address, decimals: u8) -> TokenValue {
    let total = receipt
        .logs
        .iter()
        .filter(|log| Address::try_from(log.address.as_str()).is_ok_and(|addr| addr == *token))
        .filter(|log| {
            log.topics.len() >= 3 &&
                log.topics.first().is_some_and(|t| t.eq_ignore_ascii_case(TRANSFER_TOPIC))
        })
        .filter_map(|log| {
            let data = log.data.strip_prefix("0x").unwrap_or(&log.data);
            let word = data.get(..64).unwrap_or(data);
            if word.is_empty() {
                return None;
            }
            U256::from_str_radix(word, 16).ok()
        })
        .fold(U256::ZERO, |acc, value| acc.saturating_add(value));

    TokenValue { value: (!total.is_zero()).then(|| format_units(total, decimals)) }
}
