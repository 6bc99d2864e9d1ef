use alloy_primitives::U256;
use async_trait::async_trait;
use serde_json::json;
use std::{sync::Arc, time::Duration};

use crate::{
    types::{Address, Hash32},
    upstream::{
        endpoint::JsonRpcEndpoint,
        http_client::HttpClient,
        models::{RawBlock, RawReceipt, RawTransaction},
        UpstreamError,
    },
    utils::{BlockId, BlockParameter},
};

/// Read access to an EVM node.
#[async_trait]
pub trait RpcGateway: Send + Sync {
    /// Current chain height (`eth_blockNumber`).
    async fn latest_height(&self) -> Result<u64, UpstreamError>;

    /// Block by height or hash, `None` when the node does not know it.
    async fn block(
        &self,
        id: BlockId,
        include_transactions: bool,
    ) -> Result<Option<RawBlock>, UpstreamError>;

    async fn transaction(&self, hash: Hash32) -> Result<Option<RawTransaction>, UpstreamError>;

    async fn receipt(&self, hash: Hash32) -> Result<Option<RawReceipt>, UpstreamError>;

    /// Balance at the latest block, in wei.
    async fn balance(&self, address: Address) -> Result<U256, UpstreamError>;

    /// Deployed bytecode at the latest block, `"0x"` for accounts without code.
    async fn code(&self, address: Address) -> Result<String, UpstreamError>;
}

/// [`RpcGateway`] over HTTP JSON-RPC.
pub struct HttpRpcGateway {
    endpoint: JsonRpcEndpoint,
}

impl HttpRpcGateway {
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration, http_client: Arc<HttpClient>) -> Self {
        Self { endpoint: JsonRpcEndpoint::new("rpc", url, timeout, http_client) }
    }
}

#[async_trait]
impl RpcGateway for HttpRpcGateway {
    async fn latest_height(&self) -> Result<u64, UpstreamError> {
        let raw: String = self
            .endpoint
            .call("eth_blockNumber", json!([]))
            .await?
            .ok_or_else(|| UpstreamError::InvalidResponse("eth_blockNumber: null".into()))?;

        BlockParameter::parse_hex(&raw)
            .ok_or_else(|| UpstreamError::InvalidResponse(format!("eth_blockNumber: {raw}")))
    }

    async fn block(
        &self,
        id: BlockId,
        include_transactions: bool,
    ) -> Result<Option<RawBlock>, UpstreamError> {
        let (method, param) = id.rpc_call();
        self.endpoint.call(method, json!([param, include_transactions])).await
    }

    async fn transaction(&self, hash: Hash32) -> Result<Option<RawTransaction>, UpstreamError> {
        self.endpoint.call("eth_getTransactionByHash", json!([hash.to_string()])).await
    }

    async fn receipt(&self, hash: Hash32) -> Result<Option<RawReceipt>, UpstreamError> {
        self.endpoint.call("eth_getTransactionReceipt", json!([hash.to_string()])).await
    }

    async fn balance(&self, address: Address) -> Result<U256, UpstreamError> {
        let raw: String = self
            .endpoint
            .call("eth_getBalance", json!([address.to_string(), "latest"]))
            .await?
            .ok_or_else(|| UpstreamError::InvalidResponse("eth_getBalance: null".into()))?;

        BlockParameter::parse_u256(&raw)
            .ok_or_else(|| UpstreamError::InvalidResponse(format!("eth_getBalance: {raw}")))
    }

    async fn code(&self, address: Address) -> Result<String, UpstreamError> {
        Ok(self
            .endpoint
            .call("eth_getCode", json!([address.to_string(), "latest"]))
            .await?
            .unwrap_or_else(|| "0x".to_string()))
    }
}
