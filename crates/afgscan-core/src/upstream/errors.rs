use thiserror::Error;

/// What a JSON-RPC `error.code` from the node or NodeReal says about retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcErrorCategory {
    /// `-32700`: the upstream could not parse the request body.
    ParseError,
    /// `-32600..=-32602`: bad request, unknown method or bad params.
    ClientError,
    /// `-32005`: NodeReal compute-unit or request-rate limit.
    RateLimit,
    /// Anything else, e.g. `-32000 header not found` while the node catches up.
    ProviderError,
}

impl RpcErrorCategory {
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            -32700 => Self::ParseError,
            -32602..=-32600 => Self::ClientError,
            -32005 => Self::RateLimit,
            _ => Self::ProviderError,
        }
    }

    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::RateLimit | Self::ProviderError)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParseError => "rpc_parse_error",
            Self::ClientError => "rpc_client_error",
            Self::RateLimit => "rpc_rate_limited",
            Self::ProviderError => "rpc_provider_error",
        }
    }
}

/// Failure of one call to the node or the transfer indexer.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UpstreamError {
    /// The call did not complete within its timeout, or no client slot freed up.
    #[error("Request timeout")]
    Timeout,

    /// Connection refused, reset or otherwise unusable. The message is sanitized.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Non-2xx status with the truncated response body.
    #[error("HTTP error: {0}")]
    HttpError(u16, String),

    /// JSON-RPC `error` object: code and message.
    #[error("RPC error {0}: {1}")]
    RpcError(i32, String),

    /// Body or `result` that does not decode into the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The shared client's semaphore was closed.
    #[error("Concurrency limit reached for {0}")]
    ConcurrencyLimit(String),
}

impl UpstreamError {
    /// Whether [`HttpClient`](crate::upstream::HttpClient) retries the call.
    ///
    /// Timeouts are final: the attempt already used the whole per-call budget.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) => true,
            Self::HttpError(status, _) => *status >= 500 || *status == 429,
            Self::RpcError(code, _) => RpcErrorCategory::from_code(*code).is_transient(),
            Self::Timeout | Self::InvalidResponse(_) | Self::ConcurrencyLimit(_) => false,
        }
    }

    /// Label for the `kind` field of upstream log events.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ConnectionFailed(_) => "connection_failed",
            Self::HttpError(..) => "http_status",
            Self::RpcError(code, _) => RpcErrorCategory::from_code(*code).as_str(),
            Self::InvalidResponse(_) => "invalid_response",
            Self::ConcurrencyLimit(_) => "concurrency_limit",
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}
