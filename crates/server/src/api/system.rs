use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::api::{ApiDoc, ApiState};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub rpc_configured: bool,
    pub indexer_configured: bool,
    pub timestamp: String,
}

/// GET /health
///
/// Liveness only; upstreams are reported as configured, not contacted.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses((status = 200, description = "Process is serving", body = HealthStatus))
)]
pub async fn get_health(State(state): State<ApiState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: state.version,
        uptime_seconds: state.start_time.elapsed().as_secs(),
        rpc_configured: state.explorer.has_rpc(),
        indexer_configured: state.explorer.has_indexer(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /api/v2/openapi.json
pub async fn get_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
