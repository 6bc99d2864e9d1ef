use afgscan_core::ExplorerError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// `{ "error": "<message>" }` body of every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler error carrying the explorer outcome to the HTTP layer.
#[derive(Debug)]
pub struct ApiError(pub ExplorerError);

impl From<ExplorerError> for ApiError {
    fn from(e: ExplorerError) -> Self {
        Self(e)
    }
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = status.as_u16();
        if status.is_server_error() {
            tracing::warn!(status = code, kind = self.0.kind(), error = %self.0, "request failed");
        } else {
            tracing::debug!(
                status = code,
                kind = self.0.kind(),
                error = %self.0,
                "request rejected"
            );
        }

        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

/// 405 with `Allow: GET` and the given JSON body.
pub fn method_not_allowed<T: Serialize>(body: T) -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET")], Json(body)).into_response()
}
