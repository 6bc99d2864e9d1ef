//! # AFGScan Core
//!
//! Core library for the AFGScan explorer API: it reshapes an EVM JSON-RPC
//! node and the NodeReal transfer indexer into Blockscout-style explorer records.
//!
//! - **[`upstream`]**: `RpcGateway` and `IndexerGateway` traits with HTTP
//!   implementations sharing one bounded, retrying `HttpClient`.
//!
//! - **[`mapper`]**: Pure mappings from node and indexer records to block,
//!   transaction and address records, with exact decimal unit formatting.
//!
//! - **[`aggregation`]**: Home statistics, all-time / 24h transfer counters
//!   and the simulated counter used without an indexer.
//!
//! - **[`cache`]**: TTL caches with single-flight refresh.
//!
//! - **[`listing`]**: Cursor pagination over the indexer and height
//!   pagination over the chain.
//!
//! - **[`search`]**: Query classification for the search routes.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                          Explorer                          │
//! │  ┌──────────────┐   ┌──────────────┐   ┌────────────────┐  │
//! │  │ aggregation  │   │   listing    │   │ detail lookups │  │
//! │  └──────┬───────┘   └──────┬───────┘   └───────┬────────┘  │
//! │         │    ExplorerCaches│(TtlCache)         │           │
//! │         └──────────┬───────┴──────────┬────────┘           │
//! │                    v                  v                    │
//! │             ┌──────────────┐   ┌───────────────┐           │
//! │             │  RpcGateway  │   │IndexerGateway │           │
//! │             └──────┬───────┘   └───────┬───────┘           │
//! └────────────────────┼───────────────────┼───────────────────┘
//!                      v                   v
//!                  EVM node        nr_getAssetTransfers
//! ```
//!
//! Both gateways are optional. Routes that need a missing gateway fail with
//! [`errors::ExplorerError`]; the home statistics degrade instead.

pub mod aggregation;
pub mod cache;
pub mod config;
pub mod errors;
pub mod explorer;
pub mod listing;
pub mod mapper;
pub mod search;
pub mod types;
pub mod upstream;
pub mod utils;

#[cfg(test)]
mod testing;

pub use errors::ExplorerError;
pub use explorer::{Explorer, ExplorerSettings};
