//! In-memory gateways for unit tests.

use alloy_primitives::U256;
use async_trait::async_trait;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use crate::{
    types::{Address, Hash32},
    upstream::{
        BlockTransaction, Cursor, IndexerGateway, RawBlock, RawReceipt, RawTransaction,
        RpcGateway, TransferPage, TransferQuery, TransferRecord, UpstreamError,
    },
    utils::BlockId,
};

pub const GENESIS_TIME: u64 = 1_700_000_000;

pub fn block_hash(height: u64) -> String {
    format!("0x{height:064x}")
}

pub fn tx_hash(height: u64, index: u64) -> String {
    format!("0x{height:056x}{index:08x}")
}

/// A linear chain `0..=latest` with one block every `block_time` seconds.
pub struct FakeRpc {
    latest: Option<u64>,
    block_time: u64,
    txs_per_block: u64,
    missing: HashSet<u64>,
    failing_receipts: bool,
    codes: HashMap<Address, String>,
    balances: HashMap<Address, U256>,
    pub block_calls: AtomicUsize,
    pub receipt_calls: AtomicUsize,
}

impl FakeRpc {
    pub fn with_chain(latest: u64, block_time: u64) -> Self {
        Self {
            latest: Some(latest),
            block_time,
            txs_per_block: 0,
            missing: HashSet::new(),
            failing_receipts: false,
            codes: HashMap::new(),
            balances: HashMap::new(),
            block_calls: AtomicUsize::new(0),
            receipt_calls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self { latest: None, ..Self::with_chain(0, 0) }
    }

    pub fn without_block(mut self, height: u64) -> Self {
        self.missing.insert(height);
        self
    }

    pub fn with_transactions(mut self, per_block: u64) -> Self {
        self.txs_per_block = per_block;
        self
    }

    pub fn with_failing_receipts(mut self) -> Self {
        self.failing_receipts = true;
        self
    }

    pub fn with_account(mut self, address: Address, balance: U256, code: &str) -> Self {
        self.balances.insert(address, balance);
        self.codes.insert(address, code.to_string());
        self
    }

    fn height_of(&self, id: &BlockId) -> Option<u64> {
        let height = match id {
            BlockId::Number(n) => *n,
            BlockId::Hash(hash) => {
                let bytes = hash.as_bytes();
                let mut low = [0u8; 8];
                low.copy_from_slice(&bytes[24..]);
                if bytes[..24].iter().any(|b| *b != 0) {
                    return None;
                }
                u64::from_be_bytes(low)
            }
        };
        (height <= self.latest? && !self.missing.contains(&height)).then_some(height)
    }

    fn transaction_at(&self, height: u64, index: u64) -> RawTransaction {
        RawTransaction {
            hash: tx_hash(height, index),
            block_hash: Some(block_hash(height)),
            block_number: Some(format!("0x{height:x}")),
            transaction_index: Some(format!("0x{index:x}")),
            from: format!("0x{:040x}", index + 1),
            to: Some(format!("0x{:040x}", index + 2)),
            value: "0xde0b6b3a7640000".into(),
            gas: "0x5208".into(),
            gas_price: Some("0x3b9aca00".into()),
            nonce: format!("0x{index:x}"),
            input: "0x".into(),
            tx_type: Some("0x0".into()),
            ..Default::default()
        }
    }

    pub fn block_at(&self, height: u64, include_transactions: bool) -> RawBlock {
        let transactions = (0..self.txs_per_block)
            .map(|i| {
                if include_transactions {
                    BlockTransaction::Full(Box::new(self.transaction_at(height, i)))
                } else {
                    BlockTransaction::Hash(tx_hash(height, i))
                }
            })
            .collect();

        RawBlock {
            number: Some(format!("0x{height:x}")),
            hash: Some(block_hash(height)),
            parent_hash: block_hash(height.saturating_sub(1)),
            timestamp: format!("0x{:x}", GENESIS_TIME + height * self.block_time),
            miner: format!("0x{:040x}", 0xbeef),
            size: Some("0x220".into()),
            gas_used: "0x5208".into(),
            gas_limit: "0x1c9c380".into(),
            extra_data: "0x".into(),
            state_root: block_hash(0),
            transactions,
            ..Default::default()
        }
    }

    fn unreachable_error() -> UpstreamError {
        UpstreamError::ConnectionFailed("fake node offline".into())
    }
}

#[async_trait]
impl RpcGateway for FakeRpc {
    async fn latest_height(&self) -> Result<u64, UpstreamError> {
        self.latest.ok_or_else(Self::unreachable_error)
    }

    async fn block(
        &self,
        id: BlockId,
        include_transactions: bool,
    ) -> Result<Option<RawBlock>, UpstreamError> {
        self.block_calls.fetch_add(1, Ordering::SeqCst);
        if self.latest.is_none() {
            return Err(Self::unreachable_error());
        }
        Ok(self.height_of(&id).map(|h| self.block_at(h, include_transactions)))
    }

    async fn transaction(&self, hash: Hash32) -> Result<Option<RawTransaction>, UpstreamError> {
        let latest = self.latest.ok_or_else(Self::unreachable_error)?;
        let hash = hash.to_string();
        Ok((0..=latest)
            .rev()
            .filter(|h| !self.missing.contains(h))
            .flat_map(|h| (0..self.txs_per_block).map(move |i| (h, i)))
            .find(|(h, i)| tx_hash(*h, *i) == hash)
            .map(|(h, i)| self.transaction_at(h, i)))
    }

    async fn receipt(&self, hash: Hash32) -> Result<Option<RawReceipt>, UpstreamError> {
        self.receipt_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_receipts {
            return Err(UpstreamError::Timeout);
        }
        Ok(Some(RawReceipt {
            transaction_hash: Some(hash.to_string()),
            status: Some("0x1".into()),
            gas_used: Some("0x5208".into()),
            effective_gas_price: Some("0x3b9aca00".into()),
            ..Default::default()
        }))
    }

    async fn balance(&self, address: Address) -> Result<U256, UpstreamError> {
        self.latest.ok_or_else(Self::unreachable_error)?;
        Ok(self.balances.get(&address).copied().unwrap_or_default())
    }

    async fn code(&self, address: Address) -> Result<String, UpstreamError> {
        self.latest.ok_or_else(Self::unreachable_error)?;
        Ok(self.codes.get(&address).cloned().unwrap_or_else(|| "0x".to_string()))
    }
}

pub fn transfer(index: usize, timestamp: Option<u64>) -> TransferRecord {
    TransferRecord {
        category: "20".into(),
        block_num: format!("0x{:x}", 1_000 + index),
        from: format!("0x{:040x}", 1),
        to: format!("0x{:040x}", 2),
        value: "0xde0b6b3a7640000".into(),
        hash: format!("0x{index:064x}"),
        block_time_stamp: timestamp,
        decimal: None,
        contract_address: None,
    }
}

/// Serves a fixed chain of pages. Page `i > 0` is addressed by cursor `p{i}`.
pub struct FakeIndexer {
    pages: Vec<TransferPage>,
    fail_at: Option<usize>,
    delay: Duration,
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<TransferQuery>>,
}

impl FakeIndexer {
    pub fn new(pages: Vec<Vec<TransferRecord>>) -> Self {
        let count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, transfers)| TransferPage {
                transfers,
                next_cursor: (i + 1 < count).then(|| Cursor(format!("p{}", i + 1))),
            })
            .collect();
        Self {
            pages,
            fail_at: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Pages of transfers carrying the given timestamps.
    pub fn with_timestamps(pages: &[&[Option<u64>]]) -> Self {
        let mut index = 0;
        Self::new(
            pages
                .iter()
                .map(|page| {
                    page.iter()
                        .map(|ts| {
                            index += 1;
                            transfer(index, *ts)
                        })
                        .collect()
                })
                .collect(),
        )
    }

    pub fn failing_at(mut self, page: usize) -> Self {
        self.fail_at = Some(page);
        self
    }

    /// Every page answers after `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IndexerGateway for FakeIndexer {
    async fn transfer_page(&self, query: &TransferQuery) -> Result<TransferPage, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(query.clone());
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let index = match &query.cursor {
            None => 0,
            Some(cursor) => cursor
                .as_str()
                .strip_prefix('p')
                .and_then(|i| i.parse().ok())
                .ok_or_else(|| UpstreamError::RpcError(-32602, "invalid pageKey".into()))?,
        };

        if self.fail_at == Some(index) {
            return Err(UpstreamError::HttpError(503, "indexer unavailable".into()));
        }

        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }
}
