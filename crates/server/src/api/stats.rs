use afgscan_core::{
    aggregation::{HomeStats, TransactionsStats},
    ExplorerError,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::{ApiError, ApiState, ErrorBody};

/// GET /api/v2/transactions/stats
///
/// An indexer failure answers 502 with the all-zero body so dashboards keep rendering.
#[utoipa::path(
    get,
    path = "/api/v2/transactions/stats",
    tag = "Stats",
    responses(
        (status = 200, description = "Transfers of the last 24 hours", body = TransactionsStats),
        (status = 500, description = "No indexer configured", body = ErrorBody),
        (status = 502, description = "Indexer request failed", body = TransactionsStats)
    )
)]
pub async fn get_transactions_stats(State(state): State<ApiState>) -> Response {
    match state.explorer.transactions_stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(ExplorerError::Upstream(e)) => {
            tracing::warn!(error = %e, "24h transaction count failed");
            (StatusCode::BAD_GATEWAY, Json(TransactionsStats::zero())).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// GET /api/v2/stats
#[utoipa::path(
    get,
    path = "/api/v2/stats",
    tag = "Stats",
    responses(
        (status = 200, description = "Home statistics", body = HomeStats)
    )
)]
pub async fn get_stats(State(state): State<ApiState>) -> Json<HomeStats> {
    Json(state.explorer.home_stats().await)
}
