use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    listing::cursor::TransactionsPageParams,
    mapper::{transaction_record, transfer_transaction_record, TransactionRecord},
    types::Hash32,
    upstream::{IndexerGateway, RpcGateway, TransferQuery, UpstreamError},
    utils::BlockId,
};

pub const MAIN_PAGE_TRANSACTIONS: usize = 5;

/// One page of `/transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransactionsPage {
    pub items: Vec<TransactionRecord>,
    /// `null` once the indexer reports no further page.
    pub next_page_params: Option<TransactionsPageParams>,
}

/// Fetches exactly one indexer page and maps every transfer.
///
/// # Errors
///
/// Returns the indexer error unchanged.
pub async fn fetch_transactions_page(
    indexer: &dyn IndexerGateway,
    query: &TransferQuery,
    default_decimals: u8,
) -> Result<TransactionsPage, UpstreamError> {
    let page = indexer.transfer_page(query).await?;

    Ok(TransactionsPage {
        items: page
            .transfers
            .iter()
            .map(|transfer| transfer_transaction_record(transfer, default_decimals))
            .collect(),
        next_page_params: page.next_cursor.as_ref().map(TransactionsPageParams::from_cursor),
    })
}

/// First five transactions of the newest block with their receipts.
///
/// Receipts are fetched concurrently; a failed receipt leaves that record
/// without status or fee.
///
/// # Errors
///
/// Fails when the height or the block cannot be fetched.
pub async fn main_page_transactions(
    rpc: &dyn RpcGateway,
) -> Result<Vec<TransactionRecord>, UpstreamError> {
    let latest = rpc.latest_height().await?;
    let Some(block) = rpc.block(BlockId::Number(latest), true).await? else {
        return Ok(Vec::new());
    };

    let txs: Vec<_> = block.full_transactions().take(MAIN_PAGE_TRANSACTIONS).collect();
    let receipts = futures::future::join_all(txs.iter().map(|tx| async move {
        let hash = Hash32::try_from(tx.hash.as_str()).ok()?;
        rpc.receipt(hash)
            .await
            .inspect_err(|e| tracing::debug!(error = %e, tx = %hash, "receipt fetch failed"))
            .ok()
            .flatten()
    }))
    .await;

    Ok(txs
        .iter()
        .zip(&receipts)
        .enumerate()
        .map(|(position, (tx, receipt))| {
            transaction_record(tx, receipt.as_ref(), Some(&block), 1, Some(position as u64))
        })
        .collect())
}
