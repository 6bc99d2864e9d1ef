//! The two listing protocols.
//!
//! Transactions page over the indexer with its opaque cursor; blocks page
//! over the chain with the numeric height of the last block returned.

pub mod blocks;
pub mod cursor;
pub mod transactions;

pub use blocks::{
    list_blocks, main_page_blocks, BlockListQuery, BlocksPage, BlocksPageParams,
    DEFAULT_ITEMS_COUNT, MAX_ITEMS_COUNT,
};
pub use cursor::{decode_page_cursor, TransactionsPageParams};
pub use transactions::{fetch_transactions_page, main_page_transactions, TransactionsPage};
