use serde::de::DeserializeOwned;
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use crate::{
    types::{JsonRpcRequest, JsonRpcResponse},
    upstream::{http_client::HttpClient, UpstreamError},
};

/// Splits a JSON-RPC response into its `result`, or the `error` object as
/// [`UpstreamError::RpcError`] so the client's retry policy sees it.
fn decode_envelope(bytes: bytes::Bytes) -> Result<Option<serde_json::Value>, UpstreamError> {
    let response: JsonRpcResponse = serde_json::from_slice(&bytes)
        .map_err(|e| UpstreamError::InvalidResponse(format!("Invalid JSON: {e}")))?;

    match response.error {
        Some(error) => Err(UpstreamError::RpcError(error.code, error.message)),
        None => Ok(response.result),
    }
}

/// A single JSON-RPC endpoint (node or indexer) reached through the shared [`HttpClient`].
pub struct JsonRpcEndpoint {
    name: &'static str,
    url: String,
    timeout: Duration,
    http_client: Arc<HttpClient>,
    next_id: AtomicU64,
}

impl JsonRpcEndpoint {
    #[must_use]
    pub fn new(
        name: &'static str,
        url: impl Into<String>,
        timeout: Duration,
        http_client: Arc<HttpClient>,
    ) -> Self {
        Self { name, url: url.into(), timeout, http_client, next_id: AtomicU64::new(1) }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Calls `method` and decodes its `result`.
    ///
    /// A `null` result is returned as `Ok(None)`, which is how nodes report
    /// unknown blocks, transactions and receipts.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::RpcError`] if the response carries a JSON-RPC error object
    /// - [`UpstreamError::InvalidResponse`] if the body or the result cannot be decoded
    /// - any transport error from [`HttpClient::post_json_with`]
    ///
    /// Retryable JSON-RPC codes such as NodeReal's `-32005` are retried by the client.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<Option<T>, UpstreamError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(method, params, id);
        let body = serde_json::to_vec(&request)
            .map_err(|e| UpstreamError::InvalidResponse(format!("request encoding: {e}")))?;

        let start = Instant::now();
        let result = self
            .http_client
            .post_json_with(&self.url, bytes::Bytes::from(body), self.timeout, decode_envelope)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    upstream = self.name,
                    method,
                    kind = e.kind(),
                    error = %e,
                    "upstream call failed"
                );
            })?;

        tracing::debug!(
            upstream = self.name,
            method,
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "upstream call completed"
        );

        match result {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| UpstreamError::InvalidResponse(format!("{method}: {e}"))),
        }
    }
}
