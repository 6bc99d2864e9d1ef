//! Exact-pattern search. Nothing is looked up; the query shape alone decides.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::{Address, Hash32};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchMatch {
    Block,
    Transaction,
    Address,
}

/// Classifies a trimmed query: `0x` + 64 hex is a transaction, `0x` + 40 hex
/// an address, ASCII digits a block height.
///
/// ```
/// use afgscan_core::search::{classify, SearchMatch};
///
/// assert_eq!(classify(" 12345 "), Some((SearchMatch::Block, "12345")));
/// assert_eq!(classify("0x12"), None);
/// ```
#[must_use]
pub fn classify(query: &str) -> Option<(SearchMatch, &str)> {
    let query = query.trim();
    let kind = if query.is_empty() {
        return None;
    } else if Hash32::try_from(query).is_ok() {
        SearchMatch::Transaction
    } else if Address::try_from(query).is_ok() {
        SearchMatch::Address
    } else if query.bytes().all(|b| b.is_ascii_digit()) {
        SearchMatch::Block
    } else {
        return None;
    };
    Some((kind, query))
}

/// `/search/check-redirect` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchRedirect {
    pub redirect: bool,
    #[serde(rename = "type")]
    pub kind: Option<SearchMatch>,
    pub parameter: Option<String>,
}

impl SearchRedirect {
    #[must_use]
    pub fn none() -> Self {
        Self { redirect: false, kind: None, parameter: None }
    }
}

#[must_use]
pub fn check_redirect(query: &str) -> SearchRedirect {
    classify(query).map_or_else(SearchRedirect::none, |(kind, parameter)| SearchRedirect {
        redirect: true,
        kind: Some(kind),
        parameter: Some(parameter.to_string()),
    })
}

/// `/search/quick` item, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchResultItem {
    Block { block_number: String, block_hash: String, timestamp: String },
    Transaction { transaction_hash: String, timestamp: String },
    Address { address_hash: String, name: Option<String>, is_smart_contract_verified: bool },
}

/// At most one item, built from the classification alone.
#[must_use]
pub fn quick_search(query: &str) -> Vec<SearchResultItem> {
    let Some((kind, parameter)) = classify(query) else {
        return Vec::new();
    };
    let parameter = parameter.to_string();

    vec![match kind {
        SearchMatch::Block => SearchResultItem::Block {
            block_number: parameter,
            block_hash: String::new(),
            timestamp: String::new(),
        },
        SearchMatch::Transaction => {
            SearchResultItem::Transaction { transaction_hash: parameter, timestamp: String::new() }
        }
        SearchMatch::Address => SearchResultItem::Address {
            address_hash: parameter,
            name: None,
            is_smart_contract_verified: false,
        },
    }]
}
