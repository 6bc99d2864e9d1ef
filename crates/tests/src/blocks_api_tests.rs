//! Block routes over a mockito node.

use crate::mock_infrastructure::{
    block_hash, block_json, full_block_json, receipt_json, tx_hash, NodeMock, TestApp,
};
use axum::http::StatusCode;
use serde_json::json;

async fn chain(latest: u64, heights: impl IntoIterator<Item = u64>) -> NodeMock {
    let mut node = NodeMock::new().await;
    node.mock_block_number(latest);
    for height in heights {
        node.mock_block(&block_json(height, 2));
    }
    node
}

fn heights(body: &serde_json::Value) -> Vec<u64> {
    body["items"]
        .as_array()
        .map(|items| items.iter().filter_map(|b| b["height"].as_u64()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_first_page_of_three_from_the_tip() {
    let node = chain(100, 95..=100).await;
    let app = TestApp::with_urls(Some(node.url()), None);

    let response = app.get("/api/v2/blocks?items_count=3").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(heights(&response.body), vec![100, 99, 98]);
    assert_eq!(response.body["next_page_params"], json!({"block_number": 98, "items_count": 3}));
}

#[tokio::test]
async fn test_following_page_and_repeatability() {
    let node = chain(100, 95..=100).await;
    let app = TestApp::with_urls(Some(node.url()), None);

    let first = app.get("/api/v2/blocks?block_number=98&items_count=3").await;
    let second = app.get("/api/v2/blocks?block_number=98&items_count=3").await;

    assert_eq!(heights(&first.body), vec![97, 96, 95]);
    assert_eq!(first.body, second.body);
    assert_eq!(first.body["next_page_params"]["block_number"], 95);
}

#[tokio::test]
async fn test_bad_paging_values_fall_back_to_defaults() {
    let node = chain(3, 1..=3).await;
    let app = TestApp::with_urls(Some(node.url()), None);

    let response = app.get("/api/v2/blocks?block_number=abc&items_count=zero").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(heights(&response.body), vec![3, 2, 1]);
    assert_eq!(response.body["next_page_params"], json!(null));
}

#[tokio::test]
async fn test_block_by_height_matches_block_by_hash() {
    let node = chain(100, [42]).await;
    let app = TestApp::with_urls(Some(node.url()), None);

    let by_height = app.get("/api/v2/blocks/42").await;
    let by_hash = app.get(&format!("/api/v2/blocks/{}", block_hash(42))).await;

    assert_eq!(by_height.status, StatusCode::OK);
    assert_eq!(by_height.body, by_hash.body);
    assert_eq!(by_height.body["height"], 42);
    assert_eq!(by_height.body["transactions_count"], 2);
    assert_eq!(by_height.body["type"], "block");
}

#[tokio::test]
async fn test_block_detail_errors() {
    let mut node = chain(100, []).await;
    node.mock_missing_block(7);
    let app = TestApp::with_urls(Some(node.url()), None);

    let invalid = app.get("/api/v2/blocks/latest").await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    let message = invalid.body["error"].as_str().unwrap_or_default();
    assert!(message.starts_with("Invalid height or hash"), "{message}");

    let missing = app.get("/api/v2/blocks/7").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body, json!({"error": "Block not found"}));
}

#[tokio::test]
async fn test_node_error_is_bad_gateway_for_listings() {
    let mut node = NodeMock::new().await;
    node.mock_rpc_error("eth_blockNumber", -32000, "header not found");
    let app = TestApp::with_urls(Some(node.url()), None);

    let blocks = app.get("/api/v2/blocks").await;
    assert_eq!(blocks.status, StatusCode::BAD_GATEWAY);

    let main_page = app.get("/api/v2/main-page/blocks").await;
    assert_eq!(main_page.status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_main_page_blocks_and_transactions() {
    let mut node = chain(10, 6..=10).await;
    node.mock_full_block(&full_block_json(10, 2));
    for i in 0..2 {
        let hash = tx_hash(10, i);
        node.mock_receipt(&hash, &receipt_json(&hash));
    }
    let app = TestApp::with_urls(Some(node.url()), None);

    let blocks = app.get("/api/v2/main-page/blocks").await;
    assert_eq!(blocks.status, StatusCode::OK);
    let blocks = blocks.body.as_array().cloned().unwrap_or_default();
    let heights: Vec<_> = blocks.iter().filter_map(|b| b["height"].as_u64()).collect();
    assert_eq!(heights, vec![10, 9, 8, 7, 6]);

    let txs = app.get("/api/v2/main-page/transactions").await;
    assert_eq!(txs.status, StatusCode::OK);
    let txs = txs.body.as_array().cloned().unwrap_or_default();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0]["hash"], tx_hash(10, 0));
    assert_eq!(txs[0]["status"], "ok");
    assert_eq!(txs[1]["position"], 1);
}

#[tokio::test]
async fn test_chain_routes_without_node() {
    let app = TestApp::with_urls(None, None);

    for uri in ["/api/v2/blocks", "/api/v2/blocks/1", "/api/v2/main-page/blocks"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        assert_eq!(response.body, json!({"error": "RPC client not configured"}));
    }
}
