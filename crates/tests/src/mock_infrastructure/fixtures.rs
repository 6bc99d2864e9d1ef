//! JSON payloads shaped like what the node and NodeReal return.

use serde_json::{json, Value};

/// Seconds between fixture blocks.
pub const BLOCK_TIME: u64 = 3;
pub const GENESIS_TIME: u64 = 1_700_000_000;

#[must_use]
pub fn block_hash(height: u64) -> String {
    format!("0x{height:064x}")
}

#[must_use]
pub fn tx_hash(height: u64, index: u64) -> String {
    format!("0x{height:056x}{index:08x}")
}

/// `eth_getBlockByNumber` result with `tx_count` transaction hashes.
#[must_use]
pub fn block_json(height: u64, tx_count: u64) -> Value {
    let transactions: Vec<Value> = (0..tx_count).map(|i| json!(tx_hash(height, i))).collect();
    json!({
        "number": format!("0x{height:x}"),
        "hash": block_hash(height),
        "parentHash": block_hash(height.saturating_sub(1)),
        "timestamp": format!("0x{:x}", GENESIS_TIME + height * BLOCK_TIME),
        "miner": "0x00000000000000000000000000000000000000aa",
        "size": "0x220",
        "difficulty": "0x2",
        "totalDifficulty": format!("0x{:x}", height * 2),
        "gasUsed": "0x5208",
        "gasLimit": "0x1c9c380",
        "nonce": "0x0000000000000000",
        "baseFeePerGas": "0x0",
        "extraData": "0x",
        "stateRoot": block_hash(height + 1_000_000),
        "uncles": [],
        "transactions": transactions
    })
}

/// The same block with full transaction objects.
#[must_use]
pub fn full_block_json(height: u64, tx_count: u64) -> Value {
    let mut block = block_json(height, 0);
    block["transactions"] = (0..tx_count)
        .map(|i| {
            json!({
                "hash": tx_hash(height, i),
                "nonce": format!("0x{i:x}"),
                "blockHash": block_hash(height),
                "blockNumber": format!("0x{height:x}"),
                "transactionIndex": format!("0x{i:x}"),
                "from": "0x00000000000000000000000000000000000000f1",
                "to": "0x00000000000000000000000000000000000000f2",
                "value": "0xde0b6b3a7640000",
                "gas": "0x5208",
                "gasPrice": "0x3b9aca00",
                "input": "0x",
                "type": "0x0"
            })
        })
        .collect();
    block
}

#[must_use]
pub fn receipt_json(tx: &str) -> Value {
    json!({
        "transactionHash": tx,
        "status": "0x1",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "logs": []
    })
}

/// One `nr_getAssetTransfers` entry of 1 token with the given block timestamp.
#[must_use]
pub fn transfer_json(index: u64, timestamp: u64) -> Value {
    json!({
        "category": "20",
        "blockNum": format!("0x{:x}", 1_000 + index),
        "from": "0x00000000000000000000000000000000000000f1",
        "to": "0x00000000000000000000000000000000000000f2",
        "value": "0xde0b6b3a7640000",
        "hash": format!("0x{index:064x}"),
        "blockTimeStamp": timestamp,
        "decimal": "18",
        "contractAddress": "0x91e9d32262fb1c60575ba1c13205e5b95e5004ac"
    })
}

/// `count` transfers, newest first, the newest at `newest` and each one
/// `step` seconds older than the previous.
#[must_use]
pub fn transfers_descending(first_index: u64, count: u64, newest: u64, step: u64) -> Vec<Value> {
    (0..count).map(|i| transfer_json(first_index + i, newest.saturating_sub(i * step))).collect()
}

#[must_use]
pub fn now_secs() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}
