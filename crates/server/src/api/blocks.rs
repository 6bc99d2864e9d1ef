use afgscan_core::{
    listing::{BlockListQuery, BlocksPage},
    mapper::BlockRecord,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::{ApiError, ApiState, ErrorBody};

/// Raw `/blocks` query. Values stay strings so bad input falls back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlocksParams {
    /// Exclusive upper bound; the `block_number` of the previous page's `next_page_params`.
    pub block_number: Option<String>,
    /// 1 to 50, default 50.
    pub items_count: Option<String>,
}

/// GET /api/v2/blocks/{height_or_hash}
#[utoipa::path(
    get,
    path = "/api/v2/blocks/{height_or_hash}",
    tag = "Chain",
    params(("height_or_hash" = String, Path, description = "Decimal height or 0x block hash")),
    responses(
        (status = 200, description = "Block record", body = BlockRecord),
        (status = 400, description = "Neither a height nor a hash", body = ErrorBody),
        (status = 404, description = "Block not found", body = ErrorBody),
        (status = 503, description = "No node configured", body = ErrorBody)
    )
)]
pub async fn get_block(
    State(state): State<ApiState>,
    Path(height_or_hash): Path<String>,
) -> Result<Json<BlockRecord>, ApiError> {
    Ok(Json(state.explorer.block(&height_or_hash).await?))
}

/// GET /api/v2/blocks
#[utoipa::path(
    get,
    path = "/api/v2/blocks",
    tag = "Chain",
    params(BlocksParams),
    responses(
        (status = 200, description = "Blocks, newest first", body = BlocksPage),
        (status = 502, description = "Node request failed", body = ErrorBody),
        (status = 503, description = "No node configured", body = ErrorBody)
    )
)]
pub async fn list_blocks(
    State(state): State<ApiState>,
    Query(params): Query<BlocksParams>,
) -> Result<Json<BlocksPage>, ApiError> {
    let query =
        BlockListQuery::parse(params.block_number.as_deref(), params.items_count.as_deref());
    Ok(Json(state.explorer.list_blocks(query).await?))
}
