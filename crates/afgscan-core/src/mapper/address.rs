use alloy_primitives::U256;

use crate::mapper::records::AddressRecord;

/// An account is a contract iff it has non-empty code.
#[must_use]
pub fn is_contract_code(code: Option<&str>) -> bool {
    code.is_some_and(|c| !c.is_empty() && c != "0x")
}

/// `code` is `None` when it could not be fetched, which reads as "not a contract".
#[must_use]
pub fn address_record(hash: &str, balance: U256, code: Option<&str>) -> AddressRecord {
    AddressRecord {
        hash: hash.to_string(),
        coin_balance: balance.to_string(),
        block_number_balance_updated_at: None,
        creator_address_hash: None,
        creation_transaction_hash: None,
        creation_status: None,
        exchange_rate: None,
        ens_domain_name: None,
        has_logs: false,
        has_token_transfers: false,
        has_tokens: false,
        has_validated_blocks: false,
        implementations: None,
        is_contract: is_contract_code(code),
        is_verified: false,
        name: None,
        token: None,
        watchlist_address_id: None,
        private_tags: None,
        public_tags: None,
        watchlist_names: None,
    }
}
