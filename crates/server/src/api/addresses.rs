use afgscan_core::mapper::AddressRecord;
use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::{ApiError, ApiState, ErrorBody};

/// GET /api/v2/addresses/{hash}
#[utoipa::path(
    get,
    path = "/api/v2/addresses/{hash}",
    tag = "Chain",
    params(("hash" = String, Path, description = "0x-prefixed 20-byte address")),
    responses(
        (status = 200, description = "Address record", body = AddressRecord),
        (status = 400, description = "Malformed address", body = ErrorBody),
        (status = 404, description = "Balance unavailable", body = ErrorBody),
        (status = 503, description = "No node configured", body = ErrorBody)
    )
)]
pub async fn get_address(
    State(state): State<ApiState>,
    Path(hash): Path<String>,
) -> Result<Json<AddressRecord>, ApiError> {
    Ok(Json(state.explorer.address(&hash).await?))
}
