use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    mapper::{block_record, BlockRecord},
    upstream::{RpcGateway, UpstreamError},
    utils::BlockId,
};

pub const DEFAULT_ITEMS_COUNT: u32 = 50;
pub const MAX_ITEMS_COUNT: u32 = 50;
pub const MAIN_PAGE_BLOCKS: u64 = 5;

/// Continuation of the block listing: the height of the last block returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlocksPageParams {
    pub block_number: u64,
    pub items_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlocksPage {
    pub items: Vec<BlockRecord>,
    pub next_page_params: Option<BlocksPageParams>,
}

/// Parsed `/blocks` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockListQuery {
    /// Exclusive upper bound on the heights returned.
    pub block_number: Option<u64>,
    pub items_count: u32,
}

impl Default for BlockListQuery {
    fn default() -> Self {
        Self { block_number: None, items_count: DEFAULT_ITEMS_COUNT }
    }
}

impl BlockListQuery {
    /// Lenient parsing: an unparseable `block_number` is ignored and an
    /// unparseable `items_count` falls back to the default. Numeric counts
    /// are clamped to `1..=50`.
    #[must_use]
    pub fn parse(block_number: Option<&str>, items_count: Option<&str>) -> Self {
        let block_number = block_number.and_then(|v| v.trim().parse::<u64>().ok());
        let items_count = items_count
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map_or(DEFAULT_ITEMS_COUNT, |n| {
                u32::try_from(n.clamp(1, i64::from(MAX_ITEMS_COUNT))).unwrap_or(DEFAULT_ITEMS_COUNT)
            });
        Self { block_number, items_count }
    }
}

/// Walks heights downward from `min(block_number - 1, latest)`, one block per
/// call, until `items_count` blocks were collected or height 0 was passed.
/// Heights the node does not know are skipped and do not count.
///
/// # Errors
///
/// Fails on the first upstream error.
pub async fn list_blocks(
    rpc: &dyn RpcGateway,
    query: BlockListQuery,
) -> Result<BlocksPage, UpstreamError> {
    let latest = rpc.latest_height().await?;
    let start = match query.block_number {
        Some(0) => None,
        Some(before) => Some((before - 1).min(latest)),
        None => Some(latest),
    };

    let wanted = query.items_count as usize;
    let mut items = Vec::with_capacity(wanted);
    let mut next_height = start;

    while items.len() < wanted {
        let Some(height) = next_height else { break };
        match rpc.block(BlockId::Number(height), false).await? {
            Some(block) => items.push(block_record(&block)),
            None => tracing::debug!(height, "skipping unknown block"),
        }
        next_height = height.checked_sub(1);
    }

    let next_page_params = items
        .last()
        .map(|last| last.height)
        .filter(|height| *height > 1)
        .map(|block_number| BlocksPageParams { block_number, items_count: query.items_count });

    Ok(BlocksPage { items, next_page_params })
}

/// Up to five newest blocks, newest first.
///
/// # Errors
///
/// Fails on the first upstream error.
pub async fn main_page_blocks(rpc: &dyn RpcGateway) -> Result<Vec<BlockRecord>, UpstreamError> {
    let latest = rpc.latest_height().await?;
    let count = latest.min(MAIN_PAGE_BLOCKS);

    let blocks = futures::future::try_join_all(
        (0..count).map(|offset| rpc.block(BlockId::Number(latest - offset), false)),
    )
    .await?;

    Ok(blocks.iter().flatten().map(block_record).collect())
}
