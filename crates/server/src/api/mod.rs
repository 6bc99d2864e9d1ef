//! Explorer API handlers mounted under `/api/v2`.
//!
//! Handlers only extract parameters and translate [`ExplorerError`] into HTTP
//! responses; every decision lives in [`afgscan_core::Explorer`].
//!
//! [`ExplorerError`]: afgscan_core::ExplorerError

#![allow(clippy::needless_for_each)]

pub mod addresses;
pub mod blocks;
pub mod error;
pub mod main_page;
pub mod search;
pub mod stats;
pub mod system;
pub mod transactions;

use std::{sync::Arc, time::Instant};

use afgscan_core::Explorer;
use utoipa::OpenApi;

pub use error::{method_not_allowed, ApiError, ErrorBody};

/// Shared state of all API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub explorer: Arc<Explorer>,
    pub start_time: Instant,
    pub version: &'static str,
}

impl ApiState {
    #[must_use]
    pub fn new(explorer: Arc<Explorer>) -> Self {
        Self { explorer, start_time: Instant::now(), version: env!("CARGO_PKG_VERSION") }
    }
}

/// `OpenAPI` document served at `/api/v2/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AFGScan Explorer API",
        description = "Blockscout-compatible explorer API over an EVM node and the NodeReal indexer"
    ),
    paths(
        addresses::get_address,
        blocks::get_block,
        blocks::list_blocks,
        main_page::get_main_page_blocks,
        main_page::get_main_page_transactions,
        transactions::get_transaction,
        transactions::list_transactions,
        transactions::get_token_value,
        stats::get_transactions_stats,
        stats::get_stats,
        search::check_redirect,
        search::quick_search,
        system::get_health,
    ),
    tags(
        (name = "Chain", description = "Blocks, transactions and addresses read from the node"),
        (name = "Indexer", description = "Token transfers read from the indexer"),
        (name = "Stats", description = "Home page statistics"),
        (name = "Search", description = "Query classification"),
        (name = "System", description = "Liveness and documentation"),
    )
)]
pub struct ApiDoc;
