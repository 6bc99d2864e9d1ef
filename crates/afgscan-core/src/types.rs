//! Core type definitions shared by the gateways and the explorer layer.
//!
//! - [`JsonRpcRequest`], [`JsonRpcResponse`], [`JsonRpcError`]: the JSON-RPC 2.0
//!   envelope used for both the node and the NodeReal indexer
//! - [`Hash32`], [`Address`]: validated `0x`-prefixed hex identifiers

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub const JSONRPC_VERSION: &str = "2.0";

pub const JSONRPC_VERSION_COW: Cow<'static, str> = Cow::Borrowed(JSONRPC_VERSION);

/// JSON-RPC 2.0 request sent to an upstream.
///
/// # Example
///
/// ```
/// use afgscan_core::types::JsonRpcRequest;
/// use serde_json::json;
///
/// let request = JsonRpcRequest::new("eth_blockNumber", json!([]), 1);
/// assert_eq!(request.method, "eth_blockNumber");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: Cow<'static, str>,
    pub method: String,
    pub params: serde_json::Value,
    pub id: u64,
}

impl JsonRpcRequest {
    #[must_use]
    pub fn new(method: impl Into<String>, params: serde_json::Value, id: u64) -> Self {
        Self { jsonrpc: JSONRPC_VERSION_COW, method: method.into(), params, id }
    }
}

/// JSON-RPC 2.0 response envelope. Exactly one of `result` / `error` is expected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
    #[serde(default)]
    pub id: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Error type for hash and address parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashParseError {
    #[error("missing 0x prefix")]
    MissingPrefix,
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

fn parse_fixed_hex<const N: usize>(value: &str) -> Result<[u8; N], HashParseError> {
    let hex_str = value.strip_prefix("0x").ok_or(HashParseError::MissingPrefix)?;

    // hex::decode rejects odd lengths, so report length first for clearer errors
    if hex_str.len() != N * 2 {
        return Err(HashParseError::InvalidLength { expected: N, actual: hex_str.len() / 2 });
    }

    let mut arr = [0u8; N];
    hex::decode_to_slice(hex_str, &mut arr)
        .map_err(|e| HashParseError::InvalidHex(e.to_string()))?;
    Ok(arr)
}

/// 32-byte hash (transaction and block hashes).
///
/// # Example
/// ```
/// use afgscan_core::types::Hash32;
///
/// let hash: Hash32 = "0xabcd1234abcd1234abcd1234abcd1234abcd1234abcd1234abcd1234abcd1234"
///     .try_into()
///     .unwrap();
/// assert_eq!(hash.as_bytes()[0], 0xab);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash32(pub [u8; 32]);

impl Hash32 {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl TryFrom<&str> for Hash32 {
    type Error = HashParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_fixed_hex::<32>(value).map(Hash32)
    }
}

impl std::str::FromStr for Hash32 {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl std::fmt::Display for Hash32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// 20-byte account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl TryFrom<&str> for Address {
    type Error = HashParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_fixed_hex::<20>(value).map(Address)
    }
}

impl std::str::FromStr for Address {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Lowercase hex, matching how nodes report addresses in logs.
impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
