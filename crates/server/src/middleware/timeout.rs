use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;

use crate::api::ErrorBody;

/// Bounds the whole request by `limit`.
///
/// An elapsed request answers 504 with the regular `{"error": ...}` body.
pub async fn request_timeout_middleware(
    State(limit): State<Duration>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(path = %path, limit_ms = limit.as_millis(), "request timed out");
            let body = ErrorBody { error: "Request timed out".to_string() };
            (StatusCode::GATEWAY_TIMEOUT, Json(body)).into_response()
        }
    }
}
