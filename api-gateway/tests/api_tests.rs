use std::sync::Arc;

use api_gateway::{app, AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use common::error::{Error, Result};
use common::model::history::HistoryPoint;
use common::model::market::{AltcoinMarket, BitcoinStats};
use common::model::sentiment::FearGreedIndex;
use common::model::snapshot::MarketSnapshot;
use common::model::trade::TradeRecord;
use market_data::{MarketDataService, MarketFeed, SimulatedFeed};
use tower::ServiceExt;

/// Feed whose every dataset is unavailable
struct FailingFeed;

#[async_trait]
impl MarketFeed for FailingFeed {
    async fn snapshot(&self) -> Result<MarketSnapshot> {
        Err(Error::upstream_http("coingecko", 503))
    }

    async fn stats(&self) -> Result<BitcoinStats> {
        Err(Error::upstream_http("coingecko", 503))
    }

    async fn history(&self) -> Result<Vec<HistoryPoint>> {
        Err(Error::upstream_http("coingecko", 503))
    }

    async fn altcoins(&self) -> Result<Vec<AltcoinMarket>> {
        Err(Error::upstream_http("coingecko", 503))
    }

    async fn recent_trades(&self, _limit: usize) -> Result<Vec<TradeRecord>> {
        Err(Error::upstream_http("binance", 503))
    }

    async fn sentiment(&self) -> Result<FearGreedIndex> {
        Err(Error::upstream_http("alternative.me", 503))
    }
}

fn simulated_app() -> Router {
    let service = MarketDataService::with_feed(Arc::new(SimulatedFeed::new()));
    app(Arc::new(AppState {
        market_data_service: Arc::new(service),
    }))
}

fn failing_app() -> Router {
    let service = MarketDataService::with_feed(Arc::new(FailingFeed));
    app(Arc::new(AppState {
        market_data_service: Arc::new(service),
    }))
}

async fn get_json(router: Router, path: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();

    (status, body)
}

#[tokio::test]
async fn test_get_bitcoin_returns_snapshot() {
    let (status, body) = get_json(simulated_app(), "/api/v1/bitcoin").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["price"].as_f64().unwrap() > 0.0);
    assert!(body["volume"].as_f64().unwrap() > 0.0);
    assert!(body["change"].is_number());
}

#[tokio::test]
async fn test_get_bitcoin_stats() {
    let (status, body) = get_json(simulated_app(), "/api/v1/bitcoin/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["price"].as_f64().unwrap() > 0.0);
    assert!(body["market_cap"].is_number());
    assert!(body["max_supply"].is_number());
}

#[tokio::test]
async fn test_get_bitcoin_history() {
    let (status, body) = get_json(simulated_app(), "/api/v1/bitcoin/history").await;

    assert_eq!(status, StatusCode::OK);
    let points = body.as_array().unwrap();
    assert_eq!(points.len(), 31);
    assert!(points[0]["price"].is_number());
    assert!(points[0]["time"].is_i64());
}

#[tokio::test]
async fn test_get_altcoins() {
    let (status, body) = get_json(simulated_app(), "/api/v1/altcoins").await;

    assert_eq!(status, StatusCode::OK);
    let coins = body.as_array().unwrap();
    assert!(!coins.is_empty());

    // id/symbol/name are typed; the remaining market fields flatten in
    assert!(coins[0]["id"].is_string());
    assert!(coins[0]["symbol"].is_string());
    assert!(coins[0]["current_price"].is_number());
}

#[tokio::test]
async fn test_get_transactions_default_limit() {
    let (status, body) = get_json(simulated_app(), "/api/v1/transactions").await;

    assert_eq!(status, StatusCode::OK);
    let trades = body.as_array().unwrap();
    assert_eq!(trades.len(), 15);

    let side = trades[0]["side"].as_str().unwrap();
    assert!(side == "buy" || side == "sell");
}

#[tokio::test]
async fn test_get_transactions_custom_limit() {
    let (status, body) = get_json(simulated_app(), "/api/v1/transactions?limit=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_get_transactions_rejects_bad_limit() {
    let (status, body) = get_json(simulated_app(), "/api/v1/transactions?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = get_json(simulated_app(), "/api/v1/transactions?limit=1000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_get_sentiment() {
    let (status, body) = get_json(simulated_app(), "/api/v1/sentiment").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["value"].as_u64().unwrap() <= 100);
    assert!(body["classification"].is_string());
}

#[tokio::test]
async fn test_upstream_failure_returns_error_body() {
    // Every upstream failure surfaces as 500 with a {"error"} body
    for path in [
        "/api/v1/bitcoin",
        "/api/v1/bitcoin/stats",
        "/api/v1/bitcoin/history",
        "/api/v1/altcoins",
        "/api/v1/transactions",
        "/api/v1/sentiment",
    ] {
        let (status, body) = get_json(failing_app(), path).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "path {}", path);
        assert!(!body["error"].as_str().unwrap().is_empty(), "path {}", path);
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = simulated_app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
