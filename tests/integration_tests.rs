//! End-to-end tests across the workspace crates: feed -> service -> gateway
//! routes, plus the polling loop over a feed-backed provider.

use std::sync::Arc;
use std::time::Duration;

use api_gateway::{app, AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::error::Result;
use common::model::snapshot::MarketSnapshot;
use market_data::{
    MarketDataService, MarketFeed, SimulatedFeed, SnapshotPoller, SnapshotProvider,
};
use tokio::time::{sleep, timeout};
use tower::ServiceExt;

/// Snapshot provider backed by a market feed
///
/// Lets the polling loop run over the simulated feed without touching any
/// upstream provider.
struct FeedProvider {
    feed: SimulatedFeed,
}

#[async_trait]
impl SnapshotProvider for FeedProvider {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        self.feed.snapshot().await
    }
}

fn gateway() -> axum::Router {
    let service = MarketDataService::with_feed(Arc::new(SimulatedFeed::new()));
    app(Arc::new(AppState {
        market_data_service: Arc::new(service),
    }))
}

async fn get_body(router: axum::Router, path: &str) -> serde_json::Value {
    let response = router
        .oneshot(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_snapshot_route_is_pass_through() {
    // The snapshot endpoint is uncached: two polls against the random
    // generator should produce different readings
    let service = Arc::new(MarketDataService::with_feed(Arc::new(SimulatedFeed::new())));
    let state = Arc::new(AppState {
        market_data_service: service,
    });

    let first = get_body(app(state.clone()), "/api/v1/bitcoin").await;
    let second = get_body(app(state), "/api/v1/bitcoin").await;

    assert_ne!(first["price"], second["price"]);
}

#[tokio::test]
async fn test_slow_datasets_are_cached_across_requests() {
    // The altcoin listing is served through an hourly throttle owned by the
    // service, so consecutive requests see the same body
    let service = Arc::new(MarketDataService::with_feed(Arc::new(SimulatedFeed::new())));
    let state = Arc::new(AppState {
        market_data_service: service,
    });

    let first = get_body(app(state.clone()), "/api/v1/altcoins").await;
    let second = get_body(app(state), "/api/v1/altcoins").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_transactions_shape_matches_frontend_contract() {
    let body = get_body(gateway(), "/api/v1/transactions?limit=3").await;

    let trades = body.as_array().unwrap();
    assert_eq!(trades.len(), 3);

    for trade in trades {
        assert!(trade["price"].is_number());
        assert!(trade["quantity"].is_number());
        assert!(trade["time"].is_i64());
        let side = trade["side"].as_str().unwrap();
        assert!(side == "buy" || side == "sell");
    }
}

#[tokio::test]
async fn test_polling_loop_over_feed() {
    let provider = Arc::new(FeedProvider {
        feed: SimulatedFeed::new(),
    });
    let (handle, mut rx) = SnapshotPoller::spawn(provider, Duration::from_millis(10));

    // The first tick publishes a snapshot
    timeout(Duration::from_secs(1), rx.changed())
        .await
        .expect("timed out waiting for poller")
        .unwrap();
    assert!(rx.borrow_and_update().expect("snapshot published").price > 0.0);

    // After cancellation no further snapshots arrive
    handle.cancel();
    sleep(Duration::from_millis(50)).await;
    assert!(!rx.has_changed().unwrap_or(false));
}
