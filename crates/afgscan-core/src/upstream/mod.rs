//! Upstream gateways: the EVM JSON-RPC node and the NodeReal transfer indexer.
//!
//! Both are reached through one [`HttpClient`] and exposed behind traits
//! ([`RpcGateway`], [`IndexerGateway`]) so the explorer layer can be driven
//! by in-memory fakes in tests.
//!
//! ```text
//! Explorer ──► RpcGateway ─────► HttpRpcGateway ──┐
//!          └─► IndexerGateway ─► NodeRealIndexer ─┴─► JsonRpcEndpoint ─► HttpClient
//! ```

pub mod endpoint;
pub mod errors;
pub mod http_client;
pub mod indexer;
pub mod models;
pub mod rpc;

pub use endpoint::JsonRpcEndpoint;
pub use errors::{RpcErrorCategory, UpstreamError};
pub use http_client::{HttpClient, HttpClientConfig};
pub use indexer::{IndexerGateway, NodeRealIndexer, TransferPage, TransferQuery};
pub use models::{
    BlockTransaction, Cursor, RawBlock, RawLog, RawReceipt, RawTransaction, TransferRecord,
};
pub use rpc::{HttpRpcGateway, RpcGateway};
