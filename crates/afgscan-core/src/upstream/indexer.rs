use async_trait::async_trait;
use serde_json::json;
use std::{sync::Arc, time::Duration};

use crate::upstream::{
    endpoint::JsonRpcEndpoint,
    http_client::HttpClient,
    models::{AssetTransfersResult, Cursor, TransferRecord},
    UpstreamError,
};

/// ERC-20 category in NodeReal's asset transfer API.
pub const ERC20_CATEGORY: &str = "20";

/// One request for a page of token transfers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferQuery {
    pub contract: String,
    pub category: &'static str,
    pub page_size: u32,
    pub cursor: Option<Cursor>,
}

impl TransferQuery {
    #[must_use]
    pub fn erc20(contract: impl Into<String>, page_size: u32) -> Self {
        Self { contract: contract.into(), category: ERC20_CATEGORY, page_size, cursor: None }
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: Option<Cursor>) -> Self {
        self.cursor = cursor;
        self
    }
}

/// One page of transfers, newest first.
#[derive(Debug, Clone, Default)]
pub struct TransferPage {
    pub transfers: Vec<TransferRecord>,
    /// Absent on the last page.
    pub next_cursor: Option<Cursor>,
}

/// Paginated access to indexed token transfers.
///
/// Pages are ordered newest first. Callers loop over `next_cursor` themselves.
#[async_trait]
pub trait IndexerGateway: Send + Sync {
    async fn transfer_page(&self, query: &TransferQuery) -> Result<TransferPage, UpstreamError>;
}

/// [`IndexerGateway`] backed by NodeReal's `nr_getAssetTransfers`.
pub struct NodeRealIndexer {
    endpoint: JsonRpcEndpoint,
}

impl NodeRealIndexer {
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration, http_client: Arc<HttpClient>) -> Self {
        Self { endpoint: JsonRpcEndpoint::new("nodereal", url, timeout, http_client) }
    }

    fn params(query: &TransferQuery) -> serde_json::Value {
        let mut params = json!({
            "contractAddresses": [query.contract],
            "category": [query.category],
            "maxCount": format!("0x{:x}", query.page_size),
            "order": "desc",
        });
        if let (Some(cursor), Some(obj)) = (&query.cursor, params.as_object_mut()) {
            obj.insert("pageKey".to_string(), json!(cursor.as_str()));
        }
        json!([params])
    }
}

#[async_trait]
impl IndexerGateway for NodeRealIndexer {
    async fn transfer_page(&self, query: &TransferQuery) -> Result<TransferPage, UpstreamError> {
        let result: AssetTransfersResult = self
            .endpoint
            .call("nr_getAssetTransfers", Self::params(query))
            .await?
            .unwrap_or_default();

        tracing::debug!(
            transfers = result.transfers.len(),
            has_next = result.page_key.is_some(),
            "fetched transfer page"
        );

        Ok(TransferPage {
            transfers: result.transfers,
            next_cursor: result.page_key.filter(|key| !key.is_empty()).map(Cursor),
        })
    }
}
