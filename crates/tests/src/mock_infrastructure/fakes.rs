//! In-memory gateways for tests that need call counts or paused time.

use afgscan_core::upstream::{
    Cursor, IndexerGateway, TransferPage, TransferQuery, TransferRecord, UpstreamError,
};
use async_trait::async_trait;
use serde_json::Value;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

/// Indexer over fixed pages; page `i > 0` answers cursor `p{i}`.
pub struct ScriptedIndexer {
    pages: Vec<Vec<TransferRecord>>,
    fail: bool,
    delay: Duration,
    calls: AtomicUsize,
    cursors: Mutex<Vec<Option<String>>>,
}

impl ScriptedIndexer {
    /// Builds records from `nr_getAssetTransfers` JSON entries.
    ///
    /// # Panics
    ///
    /// If an entry does not decode as a transfer.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn from_json(pages: Vec<Vec<Value>>) -> Self {
        let pages = pages
            .into_iter()
            .map(|page| {
                page.into_iter()
                    .map(|entry| serde_json::from_value(entry).expect("fixture transfer"))
                    .collect()
            })
            .collect();
        Self {
            pages,
            fail: false,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            cursors: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self { fail: true, ..Self::from_json(Vec::new()) }
    }

    /// Each page answers after `delay` of tokio time.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Cursors in request order, `None` for first-page requests.
    ///
    /// # Panics
    ///
    /// If the mutex was poisoned by a panicking request.
    #[allow(clippy::unwrap_used)]
    pub fn cursors(&self) -> Vec<Option<String>> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl IndexerGateway for ScriptedIndexer {
    #[allow(clippy::unwrap_used)]
    async fn transfer_page(&self, query: &TransferQuery) -> Result<TransferPage, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.cursors.lock().unwrap().push(query.cursor.as_ref().map(|c| c.as_str().to_string()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fail {
            return Err(UpstreamError::HttpError(503, "indexer down".into()));
        }

        let index = match &query.cursor {
            None => 0,
            Some(cursor) => cursor
                .as_str()
                .strip_prefix('p')
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| UpstreamError::InvalidResponse(format!("bad cursor {cursor:?}")))?,
        };
        let transfers = self.pages.get(index).cloned().unwrap_or_default();
        let next_cursor = (index + 1 < self.pages.len()).then(|| Cursor(format!("p{}", index + 1)));

        Ok(TransferPage { transfers, next_cursor })
    }
}
