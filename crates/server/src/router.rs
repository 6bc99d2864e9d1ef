//! Route table and the tower stack around it.

use afgscan_core::{config::ServerConfig, search::SearchRedirect};
use axum::{
    handler::Handler,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Json, Router,
};
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{
    api::{
        addresses, blocks, main_page, method_not_allowed, search, stats, system, transactions,
        ApiState, ErrorBody,
    },
    middleware::{request_id_layers, request_span, request_timeout_middleware},
};

/// Requests are bodiless GETs; anything larger is rejected early.
const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024;

async fn generic_not_allowed() -> Response {
    method_not_allowed(ErrorBody { error: "Method not allowed".to_string() })
}

async fn redirect_not_allowed() -> Response {
    method_not_allowed(SearchRedirect::none())
}

async fn quick_search_not_allowed() -> Response {
    method_not_allowed(Vec::<()>::new())
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorBody { error: "Not found".to_string() })).into_response()
}

/// GET-only route whose other methods answer 405 with the generic error body.
fn get_only<H, T>(handler: H) -> MethodRouter<ApiState>
where
    H: Handler<T, ApiState>,
    T: 'static,
{
    get(handler).fallback(generic_not_allowed)
}

/// Explorer routes relative to `/api/v2`, except `/stats`.
fn api_routes() -> Router<ApiState> {
    Router::new()
        .route("/addresses/{hash}", get_only(addresses::get_address))
        .route("/blocks", get_only(blocks::list_blocks))
        .route("/blocks/{height_or_hash}", get_only(blocks::get_block))
        .route("/main-page/blocks", get_only(main_page::get_main_page_blocks))
        .route("/main-page/transactions", get_only(main_page::get_main_page_transactions))
        .route("/transactions", get_only(transactions::list_transactions))
        .route("/transactions/stats", get_only(stats::get_transactions_stats))
        .route("/transactions/{hash}", get_only(transactions::get_transaction))
        .route("/transactions/{hash}/afg-value", get_only(transactions::get_token_value))
        .route(
            "/search/check-redirect",
            get(search::check_redirect).fallback(redirect_not_allowed),
        )
        .route("/search/quick", get(search::quick_search).fallback(quick_search_not_allowed))
        .route("/openapi.json", get_only(system::get_openapi))
}

/// Routes under the whole-request timeout.
fn bounded_routes() -> Router<ApiState> {
    Router::new().route("/health", get_only(system::get_health)).nest("/api/v2", api_routes())
}

/// `/api/v2/stats` bounds its slow part itself and always answers 200.
fn stats_routes() -> Router<ApiState> {
    Router::new().route("/api/v2/stats", get_only(stats::get_stats))
}

fn routes(state: ApiState, request_timeout: Option<Duration>) -> Router {
    let mut bounded = bounded_routes();
    if let Some(limit) = request_timeout {
        bounded =
            bounded.layer(middleware::from_fn_with_state(limit, request_timeout_middleware));
    }

    bounded.merge(stats_routes()).fallback(not_found).with_state(state)
}

/// Bare route table, without middleware.
pub fn create_router(state: ApiState) -> Router {
    routes(state, None)
}

/// Route table wrapped in the production tower stack.
pub fn create_app(state: ApiState, config: &ServerConfig) -> Router {
    let (set_request_id, propagate_request_id) = request_id_layers();

    routes(state, Some(Duration::from_secs(config.request_timeout_seconds)))
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(propagate_request_id)
        .layer(set_request_id)
}
