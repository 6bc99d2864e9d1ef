//! Statistics aggregation over the node and the transfer indexer.
//!
//! ```text
//!            home_stats
//!   ┌────────────┴─────────────┐
//!   v                          v
//! chain_summary          total transactions
//! (latest + prev block)  ├─ all_time:  count_all_transfers  (TtlCache, 10 min)
//!                        ├─ last_24h:  count_transfers_since
//!                        └─ no indexer: simulated_transaction_count
//! ```
//!
//! Everything here is best effort. Upstream failures degrade single fields
//! to zero instead of failing the response.

pub mod counters;
pub mod stats;

pub use counters::{
    count_all_transfers, count_transfers_since, simulated_transaction_count, walk_transfer_pages,
    SECONDS_PER_DAY,
};
pub use stats::{chain_summary, ChainSummary, HomeStats, TransactionsStats};
