//! Parsing helpers for JSON-RPC quantities and block identifiers.
//!
//! Nodes report every number as a `0x`-prefixed hex quantity while the
//! indexer mixes hex and decimal strings; everything funnels through
//! [`block_param`] so the mappers never parse hex themselves.

pub mod block_param;

pub use block_param::{BlockId, BlockParameter, ParseError as BlockParseError};
