use crate::{
    mapper::{
        records::{AddressParam, BlockRecord},
        units::iso_timestamp,
    },
    upstream::RawBlock,
};

#[must_use]
pub fn block_record(block: &RawBlock) -> BlockRecord {
    BlockRecord {
        height: block.height(),
        timestamp: iso_timestamp(block.timestamp_secs()),
        transactions_count: block.transactions.len(),
        internal_transactions_count: 0,
        miner: AddressParam::new(block.miner.clone(), false),
        size: block.size(),
        hash: block.hash.clone(),
        parent_hash: block.parent_hash.clone(),
        difficulty: block.difficulty().map(|d| d.to_string()),
        total_difficulty: block.total_difficulty().map(|d| d.to_string()),
        gas_used: block.gas_used().to_string(),
        gas_limit: block.gas_limit().to_string(),
        nonce: block.nonce.clone(),
        base_fee_per_gas: block.base_fee_per_gas().map(|fee| fee.to_string()),
        burnt_fees: None,
        priority_fee: None,
        extra_data: block.extra_data.clone(),
        state_root: block.state_root.clone(),
        gas_target_percentage: None,
        gas_used_percentage: None,
        burnt_fees_percentage: None,
        block_type: "block".to_string(),
        transaction_fees: None,
        uncles_hashes: block.uncles.clone(),
        withdrawals_count: block.withdrawals.as_ref().map(Vec::len),
    }
}
