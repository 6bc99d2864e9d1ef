use thiserror::Error;

use crate::upstream::UpstreamError;

/// Outcome of an explorer operation that could not produce its record.
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("RPC client not configured")]
    RpcUnconfigured,

    #[error("NODEREAL_BSC_RPC_URL is not configured")]
    IndexerUnconfigured,

    #[error("Upstream failure: {0}")]
    Upstream(#[from] UpstreamError),
}

impl ExplorerError {
    /// HTTP status the server answers with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            ExplorerError::InvalidInput(_) => 400,
            ExplorerError::NotFound(_) => 404,
            ExplorerError::IndexerUnconfigured => 500,
            ExplorerError::Upstream(_) => 502,
            ExplorerError::RpcUnconfigured => 503,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ExplorerError::InvalidInput(_) => "invalid_input",
            ExplorerError::NotFound(_) => "not_found",
            ExplorerError::RpcUnconfigured | ExplorerError::IndexerUnconfigured => "unconfigured",
            ExplorerError::Upstream(_) => "upstream",
        }
    }
}
