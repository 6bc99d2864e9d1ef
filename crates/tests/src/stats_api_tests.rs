//! Home statistics and the 24-hour transfer counter.

use crate::mock_infrastructure::{
    block_json, now_secs, transfers_descending, IndexerMock, NodeMock, ScriptedIndexer, TestApp,
};
use afgscan_core::config::TotalTransactionsMode;
use axum::http::StatusCode;
use serde_json::json;
use std::{sync::Arc, time::Duration};

const HOUR: u64 = 3_600;

#[tokio::test]
async fn test_simulated_total_without_indexer() {
    let app = TestApp::with_urls(None, None);

    let response = app.get("/api/v2/stats").await;

    assert_eq!(response.status, StatusCode::OK);
    let total: u64 =
        response.body["total_transactions"].as_str().unwrap_or("0").parse().unwrap_or(0);
    assert!(total >= 1_250_000, "simulated total {total}");
    assert_eq!(response.body["total_blocks"], "0");
    assert_eq!(response.body["average_block_time"], 0);
    assert_eq!(response.body["gas_prices_update_in"], 0);
}

#[tokio::test]
async fn test_chain_summary_from_node() {
    let mut node = NodeMock::new().await;
    node.mock_block_number(100).mock_block(&block_json(100, 0)).mock_block(&block_json(99, 0));
    let app = TestApp::with_urls(Some(node.url()), None);

    let response = app.get("/api/v2/stats").await;

    assert_eq!(response.body["total_blocks"], "100");
    assert_eq!(response.body["average_block_time"], 3_000);
}

#[tokio::test]
async fn test_all_time_total_walks_pages_once_per_ttl() {
    let newest = now_secs();
    let mut indexer = IndexerMock::new().await;
    indexer.mock_pages(
        &[
            transfers_descending(0, 3, newest, 10),
            transfers_descending(3, 3, newest - 30, 10),
            transfers_descending(6, 1, newest - 60, 10),
        ],
        1,
    );
    let app = TestApp::with_urls(None, Some(indexer.url()));

    let first = app.get("/api/v2/stats").await;
    let second = app.get("/api/v2/stats").await;

    assert_eq!(first.body["total_transactions"], "7");
    assert_eq!(second.body["total_transactions"], "7");
    indexer.assert_all().await;
}

#[tokio::test(start_paused = true)]
async fn test_all_time_total_refreshes_after_ttl() {
    let indexer = Arc::new(ScriptedIndexer::from_json(vec![
        transfers_descending(0, 2, 1_000, 1),
        transfers_descending(2, 2, 900, 1),
    ]));
    let app = TestApp::with_indexer(indexer.clone(), TotalTransactionsMode::AllTime);

    assert_eq!(app.explorer().all_time_transactions().await, 4);
    assert_eq!(app.explorer().all_time_transactions().await, 4);
    assert_eq!(indexer.calls(), 2);

    tokio::time::advance(Duration::from_secs(601)).await;

    assert_eq!(app.explorer().all_time_transactions().await, 4);
    assert_eq!(indexer.calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_slow_all_time_walk_still_answers_and_warms_cache() {
    let pages = (0..6).map(|i| transfers_descending(i * 2, 2, 1_000 - i * 10, 1)).collect();
    let indexer = Arc::new(
        ScriptedIndexer::from_json(pages).with_delay(Duration::from_millis(400)),
    );
    let app = TestApp::with_indexer_config(indexer.clone(), |config| {
        config.server.request_timeout_seconds = 1;
        config.stats.total_transactions_budget_seconds = 2;
    });

    // The walk needs 2.4s: past the request timeout and the stats budget.
    let first = app.get("/api/v2/stats").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["total_transactions"], "0");

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(indexer.calls(), 6);

    let second = app.get("/api/v2/stats").await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["total_transactions"], "12");
    assert_eq!(indexer.calls(), 6);
}

#[tokio::test]
async fn test_24h_count_stops_at_first_older_transfer() {
    let now = now_secs();
    let mut first = transfers_descending(0, 3, now - 60, HOUR);
    first.extend(transfers_descending(3, 2, now - 30 * HOUR, HOUR));
    let indexer = Arc::new(ScriptedIndexer::from_json(vec![
        first,
        transfers_descending(5, 5, now - 40 * HOUR, HOUR),
    ]));
    let app = TestApp::with_indexer(indexer.clone(), TotalTransactionsMode::AllTime);

    let response = app.get("/api/v2/transactions/stats").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "transactions_count_24h": "3",
            "pending_transactions_count": "0",
            "transaction_fees_sum_24h": "0",
            "transaction_fees_avg_24h": "0"
        })
    );
    assert_eq!(indexer.cursors(), vec![None]);
}

#[tokio::test]
async fn test_24h_count_follows_cursor_while_recent() {
    let now = now_secs();
    let indexer = Arc::new(ScriptedIndexer::from_json(vec![
        transfers_descending(0, 2, now - 60, HOUR),
        transfers_descending(2, 2, now - 3 * HOUR, HOUR),
    ]));
    let app = TestApp::with_indexer(indexer.clone(), TotalTransactionsMode::Last24h);

    let stats = app.get("/api/v2/transactions/stats").await;
    assert_eq!(stats.body["transactions_count_24h"], "4");
    assert_eq!(indexer.cursors(), vec![None, Some("p1".to_string())]);

    let home = app.get("/api/v2/stats").await;
    assert_eq!(home.body["total_transactions"], "4");
}

#[tokio::test]
async fn test_24h_failure_answers_bad_gateway_with_zero_body() {
    let app = TestApp::with_indexer(
        Arc::new(ScriptedIndexer::failing()),
        TotalTransactionsMode::Last24h,
    );

    let stats = app.get("/api/v2/transactions/stats").await;
    assert_eq!(stats.status, StatusCode::BAD_GATEWAY);
    assert_eq!(stats.body["transactions_count_24h"], "0");

    let home = app.get("/api/v2/stats").await;
    assert_eq!(home.status, StatusCode::OK);
    assert_eq!(home.body["total_transactions"], "0");
}

#[tokio::test]
async fn test_24h_stats_require_indexer() {
    let app = TestApp::with_urls(None, None);
    let response = app.get("/api/v2/transactions/stats").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}
