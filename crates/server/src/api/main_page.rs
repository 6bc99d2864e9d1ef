use afgscan_core::mapper::{BlockRecord, TransactionRecord};
use axum::{extract::State, Json};

use crate::api::{ApiError, ApiState, ErrorBody};

/// GET /api/v2/main-page/blocks
#[utoipa::path(
    get,
    path = "/api/v2/main-page/blocks",
    tag = "Chain",
    responses(
        (status = 200, description = "Up to five newest blocks", body = [BlockRecord]),
        (status = 502, description = "Node request failed", body = ErrorBody),
        (status = 503, description = "No node configured", body = ErrorBody)
    )
)]
pub async fn get_main_page_blocks(
    State(state): State<ApiState>,
) -> Result<Json<Vec<BlockRecord>>, ApiError> {
    Ok(Json(state.explorer.main_page_blocks().await?))
}

/// GET /api/v2/main-page/transactions
#[utoipa::path(
    get,
    path = "/api/v2/main-page/transactions",
    tag = "Chain",
    responses(
        (status = 200, description = "Newest transactions", body = [TransactionRecord]),
        (status = 502, description = "Node request failed", body = ErrorBody),
        (status = 503, description = "No node configured", body = ErrorBody)
    )
)]
pub async fn get_main_page_transactions(
    State(state): State<ApiState>,
) -> Result<Json<Vec<TransactionRecord>>, ApiError> {
    Ok(Json(state.explorer.main_page_transactions().await?))
}
