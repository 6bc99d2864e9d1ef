use afgscan_core::search::{self, SearchRedirect, SearchResultItem};
use axum::{extract::Query, Json};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Transaction hash, address or block height.
    pub q: Option<String>,
}

/// GET /api/v2/search/check-redirect
#[utoipa::path(
    get,
    path = "/api/v2/search/check-redirect",
    tag = "Search",
    params(SearchParams),
    responses((status = 200, description = "Where the query points", body = SearchRedirect))
)]
pub async fn check_redirect(Query(params): Query<SearchParams>) -> Json<SearchRedirect> {
    Json(search::check_redirect(params.q.as_deref().unwrap_or_default()))
}

/// GET /api/v2/search/quick
#[utoipa::path(
    get,
    path = "/api/v2/search/quick",
    tag = "Search",
    params(SearchParams),
    responses((status = 200, description = "At most one match", body = [SearchResultItem]))
)]
pub async fn quick_search(Query(params): Query<SearchParams>) -> Json<Vec<SearchResultItem>> {
    Json(search::quick_search(params.q.as_deref().unwrap_or_default()))
}
