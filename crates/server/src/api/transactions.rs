use afgscan_core::{
    listing::TransactionsPage,
    mapper::{TokenValue, TransactionRecord},
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::{ApiError, ApiState, ErrorBody};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionsParams {
    /// URL-encoded JSON `{"pageKey": "..."}` from the previous page. Omit for the first page.
    pub next_page_params: Option<String>,
}

/// GET /api/v2/transactions/{hash}
#[utoipa::path(
    get,
    path = "/api/v2/transactions/{hash}",
    tag = "Chain",
    params(("hash" = String, Path, description = "0x-prefixed 32-byte transaction hash")),
    responses(
        (status = 200, description = "Transaction record", body = TransactionRecord),
        (status = 400, description = "Malformed hash", body = ErrorBody),
        (status = 404, description = "Transaction not found", body = ErrorBody),
        (status = 503, description = "No node configured", body = ErrorBody)
    )
)]
pub async fn get_transaction(
    State(state): State<ApiState>,
    Path(hash): Path<String>,
) -> Result<Json<TransactionRecord>, ApiError> {
    Ok(Json(state.explorer.transaction(&hash).await?))
}

/// GET /api/v2/transactions
///
/// Token transfers of the configured contract, newest first.
#[utoipa::path(
    get,
    path = "/api/v2/transactions",
    tag = "Indexer",
    params(TransactionsParams),
    responses(
        (status = 200, description = "One page of transfers", body = TransactionsPage),
        (status = 500, description = "No indexer configured", body = ErrorBody),
        (status = 502, description = "Indexer request failed", body = ErrorBody)
    )
)]
pub async fn list_transactions(
    State(state): State<ApiState>,
    Query(params): Query<TransactionsParams>,
) -> Result<Json<TransactionsPage>, ApiError> {
    Ok(Json(state.explorer.list_transactions(params.next_page_params.as_deref()).await?))
}

/// GET /api/v2/transactions/{hash}/afg-value
#[utoipa::path(
    get,
    path = "/api/v2/transactions/{hash}/afg-value",
    tag = "Chain",
    params(("hash" = String, Path, description = "0x-prefixed 32-byte transaction hash")),
    responses(
        (status = 200, description = "Token amount moved, or null", body = TokenValue),
        (status = 400, description = "Malformed hash", body = ErrorBody),
        (status = 503, description = "No node configured", body = ErrorBody)
    )
)]
pub async fn get_token_value(
    State(state): State<ApiState>,
    Path(hash): Path<String>,
) -> Result<Json<TokenValue>, ApiError> {
    Ok(Json(state.explorer.token_value(&hash).await?))
}
