use std::sync::Arc;

use market_data::{MarketDataService, MarketFeed, SimulatedFeed};

#[tokio::test]
async fn test_simulated_snapshot_is_plausible() {
    let feed = SimulatedFeed::new();

    let snapshot = feed.snapshot().await.unwrap();
    assert!(snapshot.price > 0.0);
    assert!(snapshot.volume > 0.0);
    assert!(snapshot.change.abs() <= 3.0);
}

#[tokio::test]
async fn test_simulated_trades_are_newest_first() {
    let feed = SimulatedFeed::new();

    let trades = feed.recent_trades(15).await.unwrap();
    assert_eq!(trades.len(), 15);

    for pair in trades.windows(2) {
        assert!(pair[0].time >= pair[1].time);
    }
}

#[tokio::test]
async fn test_simulated_history_is_oldest_first() {
    let feed = SimulatedFeed::new();

    let history = feed.history().await.unwrap();
    assert_eq!(history.len(), 31);

    for pair in history.windows(2) {
        assert!(pair[0].time < pair[1].time);
    }
}

#[tokio::test]
async fn test_simulated_sentiment_in_range() {
    let feed = SimulatedFeed::new();

    let index = feed.sentiment().await.unwrap();
    assert!(index.value <= 100);
    assert!(!index.classification.is_empty());
}

#[tokio::test]
async fn test_simulated_altcoins_have_identities() {
    let feed = SimulatedFeed::new();

    let coins = feed.altcoins().await.unwrap();
    assert!(!coins.is_empty());

    for coin in &coins {
        assert!(!coin.id.is_empty());
        assert!(!coin.symbol.is_empty());
        assert!(coin.market_fields.contains_key("current_price"));
    }
}

#[tokio::test]
async fn test_service_caches_slow_datasets() {
    let service = MarketDataService::with_feed(Arc::new(SimulatedFeed::new()));

    // The generator is random, so identical results prove the cache served
    // the second call
    let first = serde_json::to_value(service.altcoins().await.unwrap()).unwrap();
    let second = serde_json::to_value(service.altcoins().await.unwrap()).unwrap();
    assert_eq!(first, second);

    let first = serde_json::to_value(service.sentiment().await.unwrap()).unwrap();
    let second = serde_json::to_value(service.sentiment().await.unwrap()).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_service_snapshot_passes_through() {
    let service = MarketDataService::with_feed(Arc::new(SimulatedFeed::new()));

    let snapshot = service.snapshot().await.unwrap();
    assert!(snapshot.price > 0.0);

    let trades = service.recent_trades(5).await.unwrap();
    assert_eq!(trades.len(), 5);
}
