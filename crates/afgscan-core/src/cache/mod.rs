//! Short-lived caches for the expensive explorer aggregates.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               ExplorerCaches                 │
//! │  (owned by the Explorer, shared via Arc)     │
//! └──────────────────────────────────────────────┘
//!          │                         │
//!  ┌───────▼────────────┐   ┌────────▼─────────────┐
//!  │ transfer_counts    │   │ first_transactions   │
//!  │ all-time count     │   │ first /transactions  │
//!  │ TTL 10 min         │   │ page, TTL 30 s       │
//!  └────────────────────┘   └──────────────────────┘
//! ```
//!
//! Both are keyed by token contract so one process can serve several tokens.
//! Caches are per process; nothing is persisted.

pub mod ttl;

pub use ttl::{CacheEntry, RefreshGuard, TtlCache};

use std::time::Duration;

use crate::{config::CacheConfig, listing::TransactionsPage};

pub struct ExplorerCaches {
    pub transfer_counts: TtlCache<String, u64>,
    pub first_transactions: TtlCache<String, TransactionsPage>,
}

impl ExplorerCaches {
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            transfer_counts: TtlCache::new(Duration::from_secs(
                config.total_transactions_ttl_seconds,
            )),
            first_transactions: TtlCache::new(Duration::from_secs(
                config.transactions_page_ttl_seconds,
            )),
        }
    }
}

impl Default for ExplorerCaches {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
