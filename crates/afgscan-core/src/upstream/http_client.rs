use reqwest::{Client, ClientBuilder};
use std::{sync::Arc, time::Duration};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::upstream::UpstreamError;

const MAX_ERROR_BODY: usize = 256;

/// Settings for the shared upstream HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Maximum number of upstream requests in flight at once
    pub concurrent_limit: usize,
    /// How long a caller waits for a free slot before giving up, in milliseconds
    pub permit_timeout_ms: u64,
    /// TCP connect timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Retries of transient failures (5xx, 429, connection, retryable JSON-RPC codes)
    pub max_retries: u32,
    /// Base delay of the exponential retry backoff, in milliseconds
    pub retry_base_delay_ms: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            concurrent_limit: 64,
            permit_timeout_ms: 2_000,
            connect_timeout_ms: 5_000,
            max_retries: 2,
            retry_base_delay_ms: 100,
        }
    }
}

/// JSON-over-HTTP client used by both upstream gateways.
///
/// Bounds concurrent upstream calls with a semaphore and retries failures
/// classified as transient with exponential backoff. Error messages are sanitized so that
/// upstream URLs (which may embed API keys) never reach logs or clients.
pub struct HttpClient {
    client: Client,
    permits: Arc<Semaphore>,
    config: HttpClientConfig,
}

/// Holds a concurrency slot for the lifetime of one upstream call.
struct PermitGuard {
    _permit: OwnedSemaphorePermit,
    semaphore: Arc<Semaphore>,
}

impl PermitGuard {
    fn new(permit: OwnedSemaphorePermit, semaphore: Arc<Semaphore>) -> Self {
        Self { _permit: permit, semaphore }
    }
}

impl Drop for PermitGuard {
    fn drop(&mut self) {
        tracing::trace!(
            available_permits = self.semaphore.available_permits(),
            "upstream permit released"
        );
    }
}

impl HttpClient {
    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to build.
    pub fn new() -> Result<Self, UpstreamError> {
        Self::with_config(HttpClientConfig::default())
    }

    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to build.
    pub fn with_config(config: HttpClientConfig) -> Result<Self, UpstreamError> {
        let client = ClientBuilder::new()
            .pool_idle_timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .use_rustls_tls()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("afgscan-api/", env!("CARGO_PKG_VERSION")))
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!(error = %e, "failed to build http client");
                UpstreamError::ConnectionFailed(format!("HTTP client build failed: {e}"))
            })?;

        Ok(Self { client, permits: Arc::new(Semaphore::new(config.concurrent_limit)), config })
    }

    fn sanitize_network_error(error: &reqwest::Error) -> String {
        if error.is_connect() {
            "connection refused or unreachable".to_string()
        } else if error.is_body() || error.is_decode() {
            "response body error".to_string()
        } else if error.is_redirect() {
            "unexpected redirect".to_string()
        } else {
            "network error".to_string()
        }
    }

    fn network_error(error: &reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::ConnectionFailed(Self::sanitize_network_error(error))
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.config.retry_base_delay_ms.saturating_mul(1 << attempt.min(6)))
    }

    /// POSTs a JSON body and returns the raw response bytes.
    ///
    /// # Errors
    ///
    /// See [`post_json_with`](Self::post_json_with).
    pub async fn post_json(
        &self,
        url: &str,
        body: bytes::Bytes,
        timeout: Duration,
    ) -> Result<bytes::Bytes, UpstreamError> {
        self.post_json_with(url, body, timeout, Ok).await
    }

    /// POSTs a JSON body and hands the response bytes to `decode`.
    ///
    /// `timeout` bounds each attempt. Failures of the request and of `decode`
    /// alike are retried with backoff while
    /// [`UpstreamError::is_transient`] holds and retries remain, so a
    /// decoder that surfaces JSON-RPC error objects gets rate limits retried.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Timeout`] if no slot frees up in time or an attempt times out
    /// - [`UpstreamError::HttpError`] for non-success HTTP status codes
    /// - [`UpstreamError::ConnectionFailed`] for network failures
    /// - whatever `decode` returns
    pub async fn post_json_with<T, F>(
        &self,
        url: &str,
        body: bytes::Bytes,
        timeout: Duration,
        mut decode: F,
    ) -> Result<T, UpstreamError>
    where
        F: FnMut(bytes::Bytes) -> Result<T, UpstreamError>,
    {
        let permit = tokio::time::timeout(
            Duration::from_millis(self.config.permit_timeout_ms),
            Arc::clone(&self.permits).acquire_owned(),
        )
        .await
        .map_err(|_| {
            tracing::warn!(
                available_permits = self.permits.available_permits(),
                "upstream slot acquisition timed out"
            );
            UpstreamError::Timeout
        })?
        .map_err(|_| UpstreamError::ConcurrencyLimit("http client".to_string()))?;

        let _guard = PermitGuard::new(permit, Arc::clone(&self.permits));
        let mut attempt = 0;

        loop {
            let result = self.send_once(url, body.clone(), timeout).await.and_then(&mut decode);

            match result {
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::debug!(error = %e, kind = e.kind(), attempt, "retrying upstream call");
                    tokio::time::sleep(self.backoff(attempt)).await;
                }
                other => return other,
            }
        }
    }

    async fn send_once(
        &self,
        url: &str,
        body: bytes::Bytes,
        timeout: Duration,
    ) -> Result<bytes::Bytes, UpstreamError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::network_error(&e))?;

        let status = response.status();
        if status.is_success() {
            return response.bytes().await.map_err(|e| Self::network_error(&e));
        }

        let mut text = response.text().await.unwrap_or_default();
        if text.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            text.truncate(cut);
            text.push_str("... (truncated)");
        }
        Err(UpstreamError::HttpError(status.as_u16(), text))
    }

    #[cfg(test)]
    #[must_use]
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }
}
