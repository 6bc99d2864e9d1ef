//! Block identifier and quantity parsing.
//!
//! Handles the two shapes a block can be addressed by on the explorer
//! routes (decimal height or `0x` hash) and the hex quantities returned
//! by the node.

use alloy_primitives::U256;
use thiserror::Error;

use crate::types::Hash32;

/// Error types for block parameter parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("invalid block hash: {0}")]
    InvalidHash(String),
}

/// How a block is looked up on the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockId {
    /// `eth_getBlockByNumber`
    Number(u64),
    /// `eth_getBlockByHash`
    Hash(Hash32),
}

impl BlockId {
    /// Parses the `{height_or_hash}` path segment.
    ///
    /// A `0x` prefix selects hash lookup and must be followed by exactly 64
    /// hex digits; anything else must be a decimal height.
    ///
    /// ```
    /// use afgscan_core::utils::BlockId;
    ///
    /// assert_eq!(BlockId::parse("100").unwrap(), BlockId::Number(100));
    /// assert!(BlockId::parse("0x64").is_err());
    /// assert!(BlockId::parse("latest").is_err());
    /// ```
    ///
    /// # Errors
    /// Returns `ParseError` if the input is neither a decimal height nor a 32-byte hash.
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        if value.starts_with("0x") {
            Hash32::try_from(value)
                .map(BlockId::Hash)
                .map_err(|e| ParseError::InvalidHash(e.to_string()))
        } else if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            value
                .parse::<u64>()
                .map(BlockId::Number)
                .map_err(|_| ParseError::InvalidNumber(value.to_string()))
        } else {
            Err(ParseError::InvalidNumber(value.to_string()))
        }
    }

    /// JSON-RPC method and first parameter for fetching this block.
    #[must_use]
    pub fn rpc_call(&self) -> (&'static str, String) {
        match self {
            BlockId::Number(n) => ("eth_getBlockByNumber", BlockParameter::format_hex(*n)),
            BlockId::Hash(h) => ("eth_getBlockByHash", h.to_string()),
        }
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockId::Number(n) => write!(f, "{n}"),
            BlockId::Hash(h) => write!(f, "{h}"),
        }
    }
}

/// Quantity parsing helpers
pub struct BlockParameter;

impl BlockParameter {
    /// Parse a hex string to u64 (with or without 0x prefix).
    ///
    /// ```
    /// use afgscan_core::utils::BlockParameter;
    ///
    /// assert_eq!(BlockParameter::parse_hex("0xff"), Some(255));
    /// assert_eq!(BlockParameter::parse_hex("ff"), Some(255));
    /// assert_eq!(BlockParameter::parse_hex("invalid"), None);
    /// ```
    #[must_use]
    pub fn parse_hex(s: &str) -> Option<u64> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.is_empty() {
            return None;
        }
        u64::from_str_radix(s, 16).ok()
    }

    /// Parses a number that may be `0x` hex or plain decimal, as the indexer
    /// reports block numbers either way.
    ///
    /// ```
    /// use afgscan_core::utils::BlockParameter;
    ///
    /// assert_eq!(BlockParameter::parse_flexible("0x10"), Some(16));
    /// assert_eq!(BlockParameter::parse_flexible("16"), Some(16));
    /// ```
    #[must_use]
    pub fn parse_flexible(s: &str) -> Option<u64> {
        match s.strip_prefix("0x") {
            Some(hex) if !hex.is_empty() => u64::from_str_radix(hex, 16).ok(),
            Some(_) => None,
            None => s.parse().ok(),
        }
    }

    /// Parses an unbounded hex quantity (balances, gas, values).
    ///
    /// `"0x"` is accepted as zero since some nodes emit it for empty values.
    #[must_use]
    pub fn parse_u256(s: &str) -> Option<U256> {
        match s.strip_prefix("0x") {
            Some("") => Some(U256::ZERO),
            Some(hex) => U256::from_str_radix(hex, 16).ok(),
            None => U256::from_str_radix(s, 10).ok(),
        }
    }

    /// Extract a u64 quantity from a JSON value.
    #[must_use]
    pub fn from_json_value(value: &serde_json::Value) -> Option<u64> {
        value.as_str().and_then(Self::parse_hex)
    }

    /// Encodes a height as a JSON-RPC quantity.
    #[must_use]
    pub fn format_hex(n: u64) -> String {
        format!("0x{n:x}")
    }
}
